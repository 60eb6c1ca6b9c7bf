use crate::transition::{Link, Model, Observation, State, Vector};

use log::{debug, trace};
use thiserror::Error;

/// The reason a sample could not be matched.
///
/// Neither is fatal, the sample is skipped and the next sample is
/// matched against the last matched one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmatched {
    #[error("no candidates were found for the sample")]
    NoCandidate,

    #[error("no candidate could be reached from the previous sample")]
    NoTransition,
}

/// The online forward filter of a Hidden-Markov-Model.
///
/// Given the current state, the filter decodes a new sample into a
/// [`Vector`] of candidates, each linked onto its most probable
/// predecessor. All problem-specific behaviour is supplied by the [`Model`].
pub struct Filter<'m, M> {
    model: &'m M,
}

impl<'m, M> Filter<'m, M>
where
    M: Model,
{
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Decodes the `sample`, against the last matched layer of the `state`.
    pub fn execute(
        &self,
        state: &State<M::Candidate, M::Transition, M::Sample>,
        sample: &M::Sample,
    ) -> Result<Vector<M::Candidate, M::Transition>, Unmatched> {
        let predecessors = state.layer();
        let prior = predecessors
            .map(|layer| layer.vector.candidates.as_slice())
            .unwrap_or_default();

        let (candidates, emissions): (Vec<_>, Vec<_>) = self
            .model
            .candidates(prior, sample)
            .into_iter()
            .filter(|(_, emission)| emission.is_finite() && *emission > 0.0)
            .unzip();

        if candidates.is_empty() {
            debug!("HMM break - no candidates");
            return Err(Unmatched::NoCandidate);
        }

        let Some(predecessors) = predecessors else {
            let links = emissions.iter().map(|e| Link::fresh(e.ln())).collect();
            return Ok(Vector { candidates, links });
        };

        let transitions = self.model.transitions(
            Observation::new(&predecessors.sample, prior),
            Observation::new(sample, &candidates),
        );

        trace!("{} transitions", transitions.len());

        let links = emissions
            .iter()
            .enumerate()
            .map(|(index, emission)| {
                let emission = emission.ln();

                predecessors
                    .vector
                    .links
                    .iter()
                    .enumerate()
                    .filter_map(|(predecessor, link)| {
                        let (transition, probability) = transitions.get(predecessor, index)?;
                        (*probability > 0.0).then(|| Link {
                            score: link.score + emission + probability.ln(),
                            predecessor: Some(predecessor),
                            transition: Some(transition.clone()),
                        })
                    })
                    .fold(None, |best: Option<Link<M::Transition>>, link| match best {
                        Some(best) if best.score >= link.score => Some(best),
                        _ => Some(link),
                    })
                    .unwrap_or_else(|| Link::fresh(emission))
            })
            .collect::<Vec<_>>();

        if links.iter().all(|link| link.predecessor.is_none()) {
            debug!("HMM break - no transitions");
            return Err(Unmatched::NoTransition);
        }

        Ok(Vector { candidates, links })
    }
}

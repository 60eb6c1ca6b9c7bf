use crate::graph::{Cost, Router, SpatialIndex, Topology};
use crate::matcher::{MatchError, Matcher, MatcherState, Sample};
use crate::transition::{Filter, Unmatched};

use itertools::Itertools;
use log::{debug, info, trace, warn};
use measure_time::debug_time;

impl<G, C> Matcher<'_, G, C>
where
    G: SpatialIndex + Router + Topology + Sync,
    C: Cost,
{
    /// Matches a single `sample` onto the network, appending it to the `state`.
    ///
    /// This is the online interface of the matcher, samples must be supplied
    /// in chronological order. Returns why the sample was unmatched, if it was.
    pub fn execute(&self, state: &mut MatcherState, sample: Sample) -> Result<(), Unmatched> {
        debug_time!("sample matching");

        let result = Filter::new(self).execute(state, &sample);
        let outcome = result.as_ref().map(|_| ()).map_err(|reason| *reason);

        state.update(result, sample);
        outcome
    }

    /// Matches an entire trace of `samples` onto the network.
    ///
    /// Samples are matched in chronological order. A sample closer than
    /// `min_distance` meters, or `min_interval` milliseconds, to the previously
    /// accepted sample is skipped entirely.
    ///
    /// ### Errors
    /// Should more than [`max_failure`](crate::matcher::MatcherConfig::max_failure)
    /// consecutive samples be unmatched, matching is aborted with
    /// [`MatchError::Aborted`], which carries the state reached so far.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = tracing::Level::INFO))]
    pub fn mmatch(
        &self,
        samples: &[Sample],
        min_distance: f64,
        min_interval: i64,
    ) -> Result<MatcherState, MatchError> {
        debug_time!("trace matching");

        let min_distance = min_distance.max(0.0);
        let min_interval = min_interval.max(0);

        let mut state = MatcherState::new();
        for sample in samples.iter().sorted_by_key(|sample| sample.time) {
            if let Some(last) = state.sample() {
                if last.distance(sample) < min_distance || sample.elapsed(last) < min_interval {
                    trace!("Skipping sample at {}", sample.time);
                    continue;
                }
            }

            if let Err(reason) = self.execute(&mut state, *sample) {
                debug!("Unmatched sample at {} ({reason})", sample.time);
            }

            if let Some(max) = self.config.max_failure {
                if state.failures() > max {
                    warn!(
                        "Aborting match after {} consecutive failures",
                        state.failures()
                    );

                    return Err(MatchError::Aborted {
                        failures: state.failures(),
                        state: Box::new(state),
                    });
                }
            }
        }

        info!(
            "Matched {} of {} samples ({} accepted)",
            state.sequence().len(),
            samples.len(),
            state.accepted()
        );

        Ok(state)
    }
}

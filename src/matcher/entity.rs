use crate::graph::{Cost, Route, Router, SpatialIndex, TimePriority, Topology};
use crate::matcher::{CandidateId, MatchCandidate, MatcherConfig, Sample};
use crate::transition::{Model, Observation, Transitions};

use std::sync::atomic::{AtomicU64, Ordering};

/// A map matcher, matching traces of [`Sample`](crate::matcher::Sample)s onto a road network.
///
/// The matcher is the [`Model`](crate::transition::Model) of the online
/// Hidden-Markov-Model filter. Candidates of a sample are the road points
/// surrounding it, weighted by their distance (and bearing) to the sample.
/// Transitions between candidates are the routes between them, weighted
/// by how far the cost of the route exceeds what the samples suggest.
///
/// The network is only ever read, so any number of matchers may share it.
///
/// ### Example
///
/// ```rust
/// use trackmatch::fixtures::{grid, sample};
/// use trackmatch::matcher::{Matcher, MatcherConfig};
///
/// let graph = grid(4, 4, 250.0).unwrap();
/// let matcher = Matcher::new(&graph, MatcherConfig::default());
///
/// let trace = vec![
///     sample(0, 0.3, 0.0),
///     sample(1_000, 0.4, 0.0),
///     sample(2_000, 0.5, 0.0),
/// ];
///
/// let state = matcher.mmatch(&trace, 0.0, 0).unwrap();
/// assert_eq!(state.matched().len(), 3);
/// ```
pub struct Matcher<'a, G, C = TimePriority> {
    pub(crate) network: &'a G,
    pub(crate) config: MatcherConfig,
    pub(crate) cost: C,

    counter: AtomicU64,
}

impl<'a, G> Matcher<'a, G>
where
    G: SpatialIndex + Router + Topology + Sync,
{
    /// Creates a matcher which routes by [`TimePriority`].
    pub fn new(network: &'a G, config: MatcherConfig) -> Self {
        Self {
            network,
            config,
            cost: TimePriority,
            counter: AtomicU64::new(0),
        }
    }
}

impl<'a, G, C> Matcher<'a, G, C>
where
    G: SpatialIndex + Router + Topology + Sync,
    C: Cost,
{
    /// Replaces the cost function used to route, and weigh, transitions.
    pub fn with_cost<D: Cost>(self, cost: D) -> Matcher<'a, G, D> {
        Matcher {
            network: self.network,
            config: self.config,
            cost,
            counter: self.counter,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn network(&self) -> &'a G {
        self.network
    }

    #[inline]
    pub(crate) fn next_id(&self) -> CandidateId {
        CandidateId(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl<G, C> Model for Matcher<'_, G, C>
where
    G: SpatialIndex + Router + Topology + Sync,
    C: Cost,
{
    type Sample = Sample;
    type Candidate = MatchCandidate;
    type Transition = Route;

    fn candidates(
        &self,
        predecessors: &[MatchCandidate],
        sample: &Sample,
    ) -> Vec<(MatchCandidate, f64)> {
        self.generate(predecessors, sample)
    }

    fn transitions(
        &self,
        predecessors: Observation<'_, Sample, MatchCandidate>,
        candidates: Observation<'_, Sample, MatchCandidate>,
    ) -> Transitions<Route> {
        self.connect(predecessors, candidates)
    }
}

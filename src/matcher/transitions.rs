use crate::graph::{
    Cost, Distance, RoadPoint, Route, Router, SpatialIndex, TimePriority, Topology,
};
use crate::matcher::costing::transition;
use crate::matcher::{MatchCandidate, Matcher, Sample};
use crate::transition::{Observation, Transitions};

use log::{debug, trace};
use measure_time::debug_time;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rustc_hash::FxHashMap;

/// Travel speed, in meters per second, below which a route
/// between two samples is never penalised.
const BASE_SPEED: f64 = 60.0;

impl<G, C> Matcher<'_, G, C>
where
    G: SpatialIndex + Router + Topology + Sync,
    C: Cost,
{
    /// Routes from every predecessor to every candidate, weighting each
    /// reachable pair by its transition probability.
    ///
    /// Routes are searched with the matcher's cost function, but always
    /// weighted by their [`TimePriority`] cost. Each predecessor is routed
    /// independently (in parallel), and owns the partition of the result
    /// holding its transitions.
    pub(crate) fn connect(
        &self,
        predecessors: Observation<'_, Sample, MatchCandidate>,
        candidates: Observation<'_, Sample, MatchCandidate>,
    ) -> Transitions<Route> {
        debug_time!("transition generation");

        let elapsed = candidates.sample.elapsed(predecessors.sample);
        let bound = self.config.bound(elapsed);
        let base = predecessors.sample.distance(candidates.sample) / BASE_SPEED;
        let beta = self.config.lambda.beta(elapsed);

        let targets = candidates
            .candidates
            .iter()
            .map(|candidate| candidate.point)
            .collect::<Vec<RoadPoint>>();

        let transitions = predecessors
            .candidates
            .par_iter()
            .map(|predecessor| {
                let routes =
                    self.network
                        .route(&predecessor.point, &targets, &self.cost, &Distance, bound);

                trace!(
                    "{} routes from candidate {} (bound {bound:.1})",
                    routes.len(),
                    predecessor.id.0
                );

                routes
                    .into_iter()
                    .map(|(index, edges)| {
                        let route = Route::new(predecessor.point, targets[index], edges);
                        let probability = transition(route.cost(&TimePriority), base, beta);

                        (index, (route, probability))
                    })
                    .collect::<FxHashMap<_, _>>()
            })
            .collect::<Transitions<Route>>();

        debug!("{} transitions", transitions.len());
        transitions
    }
}

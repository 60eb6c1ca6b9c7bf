use crate::graph::minset::minimize;
use crate::graph::{Cost, EdgeId, Heading, RoadPoint, Router, SpatialIndex, Topology};
use crate::matcher::costing::{azimuth, emission};
use crate::matcher::{MatchCandidate, Matcher, Sample};

use geo::{Distance, Haversine};
use log::{debug, trace};
use measure_time::debug_time;
use rustc_hash::FxHashMap;
use wkt::ToWkt;

/// Whether the `fresh` point should be replaced by the `anchor` of the previous sample.
///
/// A fresh point lying slightly behind its anchor, in the direction of
/// travel, would otherwise force a route backwards around the network.
/// This commonly occurs when stationary, or moving slowly.
#[inline]
pub(crate) fn persists(anchor: &RoadPoint, fresh: &RoadPoint, sigma: f64) -> bool {
    let behind = match fresh.heading() {
        Heading::Forward => fresh.fraction < anchor.fraction,
        Heading::Backward => fresh.fraction > anchor.fraction,
    };

    behind && Haversine.distance(fresh.position, anchor.position) < sigma
}

impl<G, C> Matcher<'_, G, C>
where
    G: SpatialIndex + Router + Topology + Sync,
    C: Cost,
{
    /// Generates the weighted candidates of a `sample`, given the candidates
    /// of the last matched sample.
    pub(crate) fn generate(
        &self,
        predecessors: &[MatchCandidate],
        sample: &Sample,
    ) -> Vec<(MatchCandidate, f64)> {
        debug_time!("candidate generation");

        let points = self.network.radius(&sample.position, self.config.max_radius);
        let found = points.len();
        let points = minimize(self.network, points);

        let anchors = predecessors
            .iter()
            .map(|candidate| (candidate.point.id(), &candidate.point))
            .collect::<FxHashMap<EdgeId, &RoadPoint>>();

        let candidates = points
            .into_iter()
            .map(|point| match anchors.get(&point.id()) {
                Some(&anchor) if persists(anchor, &point, self.config.sigma) => *anchor,
                _ => point,
            })
            .filter_map(|point| {
                let distance = Haversine.distance(point.position, sample.position);
                let mut weight = emission(distance, self.config.sigma);

                if let Some(bearing) = sample.azimuth {
                    weight *= azimuth(bearing, point.bearing(), self.config.sigma_azimuth);
                }

                let candidate = MatchCandidate::new(self.next_id(), point);
                trace!(
                    "candidate {} ({}) {} {}",
                    candidate.id.0,
                    point.edge.id,
                    point.position.wkt_string(),
                    weight
                );

                (weight > 0.0).then_some((candidate, weight))
            })
            .collect::<Vec<_>>();

        debug!("{} ({}) candidates", candidates.len(), found);
        candidates
    }
}

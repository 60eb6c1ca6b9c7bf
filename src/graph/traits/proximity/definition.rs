use crate::graph::RoadPoint;
use geo::Point;

/// Trait containing utility functions to find edges near a position.
pub trait SpatialIndex {
    /// Returns every [`RoadPoint`] within `radius` meters of the `point`.
    ///
    /// Each edge in range contributes one point, the projection of `point`
    /// onto the edge's geometry. Both edges of a bidirectional road are
    /// therefore returned, sharing the same position.
    ///
    /// ### Note
    /// The output is sorted by distance to `point`, then by edge,
    /// such that identical queries yield identical results.
    fn radius(&self, point: &Point, radius: f64) -> Vec<RoadPoint>;
}

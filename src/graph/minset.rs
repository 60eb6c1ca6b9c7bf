//! Reduction of spatially clustered road points to a minimal covering set.

use crate::graph::{EdgeId, RoadPoint, Topology};
use rustc_hash::{FxHashMap, FxHashSet};

const PRECISION: f64 = 1e8;

#[inline]
fn round(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// Reduces a set of road points, ordered by preference (closest first),
/// to a minimal set which still covers every edge they lie upon.
///
/// 1. Only the first point on each edge is kept.
/// 2. A point at the very end of its edge is dropped if every edge
///    leaving that end node carries a point at its very start. Those
///    points occupy the same location and reach everything the dropped
///    point could.
///
/// The relative order of the surviving points is preserved.
pub fn minimize<T>(network: &T, points: Vec<RoadPoint>) -> Vec<RoadPoint>
where
    T: Topology,
{
    let mut seen = FxHashSet::default();
    let points = points
        .into_iter()
        .filter(|point| seen.insert(point.id()))
        .collect::<Vec<_>>();

    let travelled = points
        .iter()
        .map(|point| (point.id(), round(point.travelled())))
        .collect::<FxHashMap<EdgeId, f64>>();

    let starts = |edge: &EdgeId| travelled.get(edge).is_some_and(|&t| t == 0.0);

    points
        .iter()
        .filter(|point| {
            if round(point.travelled()) != 1.0 {
                return true;
            }

            let mut successors = network.successors(&point.edge).peekable();
            let covered = successors.peek().is_some() && successors.all(|edge| starts(&edge.id));
            !covered
        })
        .copied()
        .collect()
}

use crate::graph::{Cost, Edge, RoadPoint};
use rustc_hash::FxHashMap;

pub trait Router {
    /// Finds the cheapest path, under `cost`, from the `origin` to each of the `targets`.
    ///
    /// The search abandons any path whose accumulated `bound_cost` exceeds `bound`.
    /// Returns the ordered edges of each reachable target keyed by its index within
    /// `targets`, where the first edge is the edge of the origin and the last is
    /// the edge of the target. Unreachable targets are absent from the mapping.
    fn route<C, B>(
        &self,
        origin: &RoadPoint,
        targets: &[RoadPoint],
        cost: &C,
        bound_cost: &B,
        bound: f64,
    ) -> FxHashMap<usize, Vec<Edge>>
    where
        C: Cost,
        B: Cost;
}

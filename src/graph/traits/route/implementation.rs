use crate::graph::primitives::Dijkstra;
use crate::graph::traits::route::definition::Router;
use crate::graph::{Cost, Edge, Graph, RoadPoint};

use log::debug;
use rustc_hash::FxHashMap;

#[cfg(feature = "tracing")]
use tracing::Level;

impl Router for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
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
        B: Cost,
    {
        debug!(
            "Routing {} -> {} targets (bound {bound:.1})",
            origin.edge.id,
            targets.len()
        );

        if targets.is_empty() {
            return FxHashMap::default();
        }

        Dijkstra::new(self, cost, bound_cost, bound).run(origin, targets)
    }
}

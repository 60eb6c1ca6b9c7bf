use crate::graph::{Cost, Distance, Edge, Graph, NodeId, RoadPoint};

use geo::LineString;
use itertools::Itertools;

/// The path between two [`RoadPoint`]s.
///
/// The first edge is the edge of the `source` point, and the last edge is
/// the edge of the `target` point. A route which stays on a single edge
/// therefore holds exactly one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub source: RoadPoint,
    pub target: RoadPoint,
    pub edges: Vec<Edge>,
}

impl Route {
    pub fn new(source: RoadPoint, target: RoadPoint, edges: Vec<Edge>) -> Self {
        Self {
            source,
            target,
            edges,
        }
    }

    /// A route which does not move, from and to the same point.
    pub fn stationary(point: RoadPoint) -> Self {
        Self::new(point, point, vec![point.edge])
    }

    /// The geometric length of the route, in meters.
    pub fn length(&self) -> f64 {
        self.cost(&Distance)
    }

    /// Evaluates the route under the given cost function.
    ///
    /// The source and target edges only contribute the
    /// fraction of them which is actually travelled.
    pub fn cost(&self, cost: &impl Cost) -> f64 {
        match self.edges.as_slice() {
            [] => 0.0,
            [edge] => {
                let fraction = self.target.travelled() - self.source.travelled();
                cost.partial(edge, fraction.max(0.0))
            }
            [first, middle @ .., last] => {
                let head = cost.partial(first, 1.0 - self.source.travelled());
                let tail = cost.partial(last, self.target.travelled());

                head + tail + middle.iter().map(|edge| cost.cost(edge)).sum::<f64>()
            }
        }
    }

    /// The nodes passed through, in order of travel.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().skip(1).map(|edge| edge.source)
    }

    /// The geometry of the route, from the source point
    /// through every traversed node, to the target point.
    pub fn geometry(&self, graph: &Graph) -> LineString {
        std::iter::once(self.source.position)
            .chain(self.nodes().filter_map(|node| graph.get_position(&node)))
            .chain(std::iter::once(self.target.position))
            .dedup()
            .collect()
    }
}

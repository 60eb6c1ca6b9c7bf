use crate::graph::{Edge, Graph};

/// Adjacency between the directed edges of a network.
pub trait Topology {
    /// The edges which may be entered after leaving `edge` at its target node.
    fn successors<'a>(&'a self, edge: &Edge) -> impl Iterator<Item = &'a Edge>;
}

impl Topology for Graph {
    #[inline]
    fn successors<'a>(&'a self, edge: &Edge) -> impl Iterator<Item = &'a Edge> {
        Graph::successors(self, edge)
    }
}

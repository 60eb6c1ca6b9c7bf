use crate::graph::{NodeId, RoadId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("road {road:?} references node {node:?}, which does not exist")]
    MissingNode { road: RoadId, node: NodeId },

    #[error("road {0:?} was supplied more than once")]
    DuplicateRoad(RoadId),

    #[error("road {road:?} duplicates the connection {from:?} -> {target:?}")]
    ParallelEdge {
        road: RoadId,
        from: NodeId,
        target: NodeId,
    },

    #[error("road {0:?} starts and ends at the same node")]
    Degenerate(RoadId),
}

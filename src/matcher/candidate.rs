use crate::graph::RoadPoint;

/// Uniquely identifies a candidate across an entire matching run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CandidateId(pub u64);

/// A hypothesised position of a sample upon the road network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchCandidate {
    pub id: CandidateId,
    pub point: RoadPoint,
}

impl MatchCandidate {
    pub fn new(id: CandidateId, point: RoadPoint) -> Self {
        Self { id, point }
    }
}

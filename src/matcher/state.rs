use crate::graph::{EdgeId, Graph, RoadPoint, Route};
use crate::matcher::{MatchCandidate, Sample};
use crate::transition::State;

use geo::LineString;
use itertools::Itertools;

/// The state of a matching run, see [`State`].
pub type MatcherState = State<MatchCandidate, Route, Sample>;

impl MatcherState {
    /// The matched position of every matched sample, in chronological order.
    pub fn matched(&self) -> Vec<RoadPoint> {
        self.sequence()
            .into_iter()
            .map(|matched| matched.candidate.point)
            .collect()
    }

    /// The edges travelled along the matched path, in order of travel.
    ///
    /// Where the path is broken, such that a candidate has no route from its
    /// predecessor, the path resumes from the edge of that candidate.
    pub fn edges(&self) -> Vec<EdgeId> {
        self.sequence()
            .into_iter()
            .flat_map(|matched| match matched.transition {
                Some(route) => route.edges.iter().map(|edge| edge.id).collect::<Vec<_>>(),
                None => vec![matched.candidate.point.id()],
            })
            .dedup()
            .collect()
    }

    /// The geometry of the matched path.
    pub fn geometry(&self, graph: &Graph) -> LineString {
        let sequence = self.sequence();

        sequence
            .iter()
            .flat_map(|matched| match &matched.transition {
                Some(route) => route.geometry(graph).0,
                None => vec![matched.candidate.point.position.0],
            })
            .dedup()
            .collect()
    }
}

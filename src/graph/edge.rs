use geo::{Line, Point};
use rstar::{RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use strum::Display as StrumDisplay;

/// The identifier of a node (junction) within the road network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(pub u64);

/// The identifier of a road within the road network.
///
/// A road is the undirected geometry between two nodes, from which
/// one or two directed [`Edge`]s are derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RoadId(pub u64);

/// The travel direction of an edge, relative to the geometry of its road.
///
/// A [`Heading::Forward`] edge travels from the road's source to its target,
/// whilst a [`Heading::Backward`] edge travels from the target to the source.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    StrumDisplay,
)]
#[strum(serialize_all = "snake_case")]
pub enum Heading {
    #[default]
    Forward,
    Backward,
}

/// Represents the identifier of an edge, along with the directionality of the edge.
///
/// Since the road network is a directed graph, it does not support bidirectional edges.
/// Meaning, any road which is bidirectional is converted into two edges, each
/// with a different heading, sharing the same [`RoadId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId {
    pub road: RoadId,
    pub heading: Heading,
}

impl EdgeId {
    pub const fn forward(road: RoadId) -> Self {
        Self {
            road,
            heading: Heading::Forward,
        }
    }

    pub const fn backward(road: RoadId) -> Self {
        Self {
            road,
            heading: Heading::Backward,
        }
    }
}

impl Ord for EdgeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.road.cmp(&other.road) {
            Ordering::Equal => self.heading.cmp(&other.heading),
            ord => ord,
        }
    }
}

impl PartialOrd for EdgeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.road.0, self.heading)
    }
}

/// A junction within the road network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
}

impl Node {
    pub fn new(position: Point, id: NodeId) -> Self {
        Self { id, position }
    }
}

const DEFAULT_SPEED: f64 = 50.0; // km/h
const DEFAULT_PRIORITY: f64 = 1.0;

/// The input description of a road, used to construct the [`Graph`](crate::graph::Graph).
///
/// Roads are straight segments between two nodes. Unless marked
/// [one-way](Road::one_way), a road is traversable in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub id: RoadId,
    pub source: NodeId,
    pub target: NodeId,

    /// The maximum speed on the road, in kilometers per hour.
    pub speed: f64,

    /// A multiplicative routing penalty (`1.0` is neutral), larger values
    /// discourage routing along the road.
    pub priority: f64,

    pub oneway: bool,
}

impl Road {
    pub fn new(id: RoadId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            speed: DEFAULT_SPEED,
            priority: DEFAULT_PRIORITY,
            oneway: false,
        }
    }

    pub fn one_way(self) -> Self {
        Self {
            oneway: true,
            ..self
        }
    }

    pub fn with_speed(self, speed: f64) -> Self {
        Self { speed, ..self }
    }

    pub fn with_priority(self, priority: f64) -> Self {
        Self { priority, ..self }
    }
}

/// A directed, traversable edge of the road network.
///
/// Edges are small and `Copy`, so routes and road points carry them by value
/// instead of looking them up through the graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,

    /// The node the edge departs from, in its direction of travel.
    pub source: NodeId,
    /// The node the edge arrives at, in its direction of travel.
    pub target: NodeId,

    /// Length of the edge, in meters.
    pub length: f64,
    /// Maximum speed, in kilometers per hour.
    pub speed: f64,
    pub priority: f64,

    /// Bearing of the direction of travel, in degrees `[0, 360)`.
    pub bearing: f64,
}

impl Edge {
    #[inline]
    pub const fn heading(&self) -> Heading {
        self.id.heading
    }

    #[inline]
    pub const fn road(&self) -> RoadId {
        self.id.road
    }
}

/// The geometry of a road, as stored in the spatial index.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub road: RoadId,
    pub line: Line,
}

impl RTreeObject for Segment {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.line.start_point(), self.line.end_point())
    }
}

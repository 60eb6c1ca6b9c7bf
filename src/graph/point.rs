use crate::graph::{Edge, EdgeId, Heading};

use geo::Point;
use std::fmt::{Debug, Formatter};
use wkt::ToWkt;

/// A position snapped onto a directed [`Edge`].
///
/// The `fraction` is measured along the geometry of the underlying road,
/// where `0` is the road's source node and `1` its target node, regardless
/// of the edge's [`Heading`]. Use [`RoadPoint::travelled`] for the fraction
/// in the direction of travel.
#[derive(Clone, Copy, PartialEq)]
pub struct RoadPoint {
    pub edge: Edge,
    pub fraction: f64,
    pub position: Point,
}

impl Debug for RoadPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RoadPoint({} @ {:.4}, {})",
            self.edge.id,
            self.fraction,
            self.position.wkt_string()
        )
    }
}

impl RoadPoint {
    pub fn new(edge: Edge, fraction: f64, position: Point) -> Self {
        Self {
            edge,
            fraction: fraction.clamp(0.0, 1.0),
            position,
        }
    }

    #[inline]
    pub const fn id(&self) -> EdgeId {
        self.edge.id
    }

    #[inline]
    pub const fn heading(&self) -> Heading {
        self.edge.id.heading
    }

    /// Bearing of the edge's direction of travel, in degrees.
    #[inline]
    pub const fn bearing(&self) -> f64 {
        self.edge.bearing
    }

    /// The fraction of the edge already travelled when standing at this point.
    #[inline]
    pub fn travelled(&self) -> f64 {
        match self.heading() {
            Heading::Forward => self.fraction,
            Heading::Backward => 1.0 - self.fraction,
        }
    }
}

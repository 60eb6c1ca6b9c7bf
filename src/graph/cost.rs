use crate::graph::Edge;

/// Converts kilometers per hour into meters per second.
const KPH_TO_MPS: f64 = 1.0 / 3.6;

/// A cost function over the edges of the network.
///
/// Direction is carried by the [`Edge`] itself, so a cost
/// may differ between the two headings of the same road.
pub trait Cost: Sync {
    /// The cost of travelling the entire edge.
    fn cost(&self, edge: &Edge) -> f64;

    /// The cost of travelling the given fraction of the edge.
    #[inline]
    fn partial(&self, edge: &Edge, fraction: f64) -> f64 {
        self.cost(edge) * fraction
    }
}

/// Length of the edge, in meters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Distance;

impl Cost for Distance {
    #[inline]
    fn cost(&self, edge: &Edge) -> f64 {
        edge.length
    }
}

/// Time to travel the edge at its maximum speed, in seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct Time;

impl Cost for Time {
    #[inline]
    fn cost(&self, edge: &Edge) -> f64 {
        edge.length / (edge.speed.max(f64::EPSILON) * KPH_TO_MPS)
    }
}

/// Travel [`Time`], scaled by the priority factor of the edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimePriority;

impl Cost for TimePriority {
    #[inline]
    fn cost(&self, edge: &Edge) -> f64 {
        Time.cost(edge) * edge.priority
    }
}

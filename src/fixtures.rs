//! Synthetic road networks and traces, used by tests and benchmarks.

use crate::graph::{Graph, GraphError, Node, NodeId, Road, RoadId};
use crate::matcher::Sample;

use chrono::{DateTime, TimeDelta, Utc};
use geo::{point, Point};

/// Spacing between adjacent grid nodes, in degrees (roughly 111m at the equator).
pub const STEP: f64 = 0.001;

/// The node at column `x`, row `y` of a grid.
pub fn node(width: u64, x: u64, y: u64) -> NodeId {
    NodeId(y * width + x)
}

pub fn position(x: f64, y: f64) -> Point {
    point! { x: x * STEP, y: y * STEP }
}

/// The road from column `x` to `x + 1` on row `y`.
pub fn horizontal(width: u64, x: u64, y: u64) -> RoadId {
    RoadId(2 * node(width, x, y).0)
}

/// The road from row `y` to `y + 1` on column `x`.
pub fn vertical(width: u64, x: u64, y: u64) -> RoadId {
    RoadId(2 * node(width, x, y).0 + 1)
}

/// A `width` by `height` grid of bidirectional roads, starting at the origin
/// and extending north-east, where every road allows the given `speed` (km/h).
pub fn grid(width: u64, height: u64, speed: f64) -> Result<Graph, GraphError> {
    let nodes = (0..height).flat_map(|y| {
        (0..width).map(move |x| Node::new(position(x as f64, y as f64), node(width, x, y)))
    });

    let roads = (0..height).flat_map(|y| {
        (0..width).flat_map(move |x| {
            let east = (x + 1 < width).then(|| {
                Road::new(
                    horizontal(width, x, y),
                    node(width, x, y),
                    node(width, x + 1, y),
                )
            });

            let north = (y + 1 < height).then(|| {
                Road::new(
                    vertical(width, x, y),
                    node(width, x, y),
                    node(width, x, y + 1),
                )
            });

            east.into_iter().chain(north).map(move |road| road.with_speed(speed))
        })
    });

    Graph::new(nodes, roads)
}

/// A fixed instant from which sample times are offset.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_000)
}

/// A sample `millis` after the [`epoch`], at grid coordinates `(x, y)`.
pub fn sample(millis: i64, x: f64, y: f64) -> Sample {
    Sample::new(epoch() + TimeDelta::milliseconds(millis), position(x, y))
}

/// A trace travelling east along row zero of a grid at `speed` meters per
/// second, sampled every `interval` seconds, alternately offset either side
/// of the road by `noise` meters.
pub fn trace(width: u64, speed: f64, interval: f64, noise: f64) -> Vec<Sample> {
    let meters_per_step = 111_195.0 * STEP;
    let spacing = speed * interval / meters_per_step;
    let offset = noise / meters_per_step;
    let count = (width.saturating_sub(1) as f64 / spacing) as i64;

    (0..count)
        .map(|index| {
            let side = if index % 2 == 0 { offset } else { -offset };
            sample(
                (index as f64 * interval * 1000.0) as i64,
                index as f64 * spacing,
                side,
            )
        })
        .collect()
}

use crate::graph::traits::proximity::definition::SpatialIndex;
use crate::graph::{Graph, RoadPoint};

use geo::{
    Destination, Distance, Geodesic, Haversine, InterpolatableLine, LineLocatePoint, Point,
};
use rstar::AABB;
use std::f64::consts::SQRT_2;

#[cfg(feature = "tracing")]
use tracing::Level;

impl SpatialIndex for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(self)))]
    fn radius(&self, point: &Point, radius: f64) -> Vec<RoadPoint> {
        // Square scan, whose corners lie on the circle circumscribing the square.
        let bottom_right = Geodesic.destination(*point, 135.0, radius * SQRT_2);
        let top_left = Geodesic.destination(*point, 315.0, radius * SQRT_2);
        let bbox = AABB::from_corners(top_left, bottom_right);

        let mut points = self
            .index()
            .locate_in_envelope_intersecting(&bbox)
            .filter_map(|segment| {
                // We locate the point upon the line, and then project
                // that fraction upon the line to obtain its position.
                let fraction = segment.line.line_locate_point(point)?;
                let position = segment.line.point_at_ratio_from_start(&Haversine, fraction);

                let distance = Haversine.distance(position, *point);
                (distance <= radius).then_some((distance, fraction, position, segment.road))
            })
            .flat_map(|(distance, fraction, position, road)| {
                self.road_edges(road)
                    .map(move |edge| (distance, RoadPoint::new(*edge, fraction, position)))
            })
            .collect::<Vec<_>>();

        points.sort_by(|(a, x), (b, y)| a.total_cmp(b).then_with(|| x.id().cmp(&y.id())));
        points.into_iter().map(|(_, point)| point).collect()
    }
}

use chrono::{DateTime, Utc};
use geo::{Distance, Haversine, Point};

/// A positional observation of the trace being matched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub position: Point,

    /// Bearing of travel in degrees, clockwise from north, if known.
    pub azimuth: Option<f64>,
}

impl Sample {
    pub fn new(time: DateTime<Utc>, position: Point) -> Self {
        Self {
            time,
            position,
            azimuth: None,
        }
    }

    /// Attaches the bearing of travel. An undefined (non-finite) bearing is ignored.
    pub fn with_azimuth(self, azimuth: f64) -> Self {
        Self {
            azimuth: azimuth.is_finite().then(|| azimuth.rem_euclid(360.0)),
            ..self
        }
    }

    /// Milliseconds elapsed since the `earlier` sample.
    #[inline]
    pub fn elapsed(&self, earlier: &Sample) -> i64 {
        (self.time - earlier.time).num_milliseconds()
    }

    /// Great-circle distance to the `other` sample, in meters.
    #[inline]
    pub fn distance(&self, other: &Sample) -> f64 {
        Haversine.distance(self.position, other.position)
    }
}

//! The probability distributions of the matching model.

use std::f64::consts::PI;

/// Lower limit of the bearing factor, such that a misleading
/// bearing can never rule out an otherwise plausible candidate.
const MIN_AZIMUTH_FACTOR: f64 = 1e-2;

/// Normal density of a deviation `distance` from the mean, with standard deviation `sigma`.
///
/// ```math
/// emission(dz) = 1 / √(2πσ²) · e^(-dz² / 2σ²)
/// ```
#[inline]
pub fn emission(distance: f64, sigma: f64) -> f64 {
    let variance = sigma * sigma;
    (1.0 / (2.0 * PI * variance).sqrt()) * (-(distance * distance) / (2.0 * variance)).exp()
}

/// The smallest angle between two bearings, in degrees `[0, 180]`.
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let clockwise = (b - a).rem_euclid(360.0);
    clockwise.min(360.0 - clockwise)
}

/// Weighting of a candidate by how well the bearing of its edge agrees with the
/// bearing of the sample, where `variance` is the variance of the sample's bearing.
#[inline]
pub fn azimuth(sample: f64, candidate: f64, variance: f64) -> f64 {
    let difference = angular_difference(sample, candidate);
    let density = (1.0 / (2.0 * PI * variance).sqrt()) * (-difference / (2.0 * variance)).exp();

    density.max(MIN_AZIMUTH_FACTOR)
}

/// Exponential density of the excess of a route's cost over the `base` cost,
/// with scale `beta`. A route no more costly than the base is maximally likely.
///
/// ```math
/// transition(cost) = 1/β · e^(-max(0, cost - base) / β)
/// ```
#[inline]
pub fn transition(cost: f64, base: f64, beta: f64) -> f64 {
    (1.0 / beta) * (-(cost - base).max(0.0) / beta).exp()
}

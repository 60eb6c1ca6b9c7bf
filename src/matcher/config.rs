use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// Default standard deviation of the position measurements, in meters.
pub const DEFAULT_SIGMA: f64 = 5.0;
/// Default variance of the bearing measurements, in square degrees.
pub const DEFAULT_SIGMA_AZIMUTH: f64 = 100.0;
/// Default search radius for candidates, in meters.
pub const DEFAULT_MAX_RADIUS: f64 = 200.0;
/// Default upper limit of routing distance between two samples, in meters.
pub const DEFAULT_MAX_DISTANCE: f64 = 15_000.0;

/// Routing distance which is always permitted, however close two samples are in time.
const MIN_BOUND: f64 = 1_000.0;
/// Assumed upper limit of travel speed when bounding routes, in meters per second.
const BOUND_SPEED: f64 = 100.0;

const ENV_PREFIX: &str = "TRACKMATCH_";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("{key} must be positive, got {value}")]
    NonPositive { key: String, value: f64 },
}

/// The rate of the exponential transition distribution.
///
/// Deserialization rejects a fixed rate which is not positive and finite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "RateValue")]
pub enum Rate {
    /// Derived from the time elapsed between the two samples.
    #[default]
    Adaptive,

    /// A fixed rate (λ), such that `β = 1 / λ`. Must be positive and finite.
    Fixed(f64),
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "rate", rename_all = "snake_case")]
enum RateValue {
    Adaptive,
    Fixed(f64),
}

impl TryFrom<RateValue> for Rate {
    type Error = ConfigError;

    fn try_from(value: RateValue) -> Result<Self, Self::Error> {
        match value {
            RateValue::Adaptive => Ok(Rate::Adaptive),
            RateValue::Fixed(lambda) => Rate::Fixed(lambda).validate(),
        }
    }
}

impl Rate {
    /// Rejects a fixed rate which is not positive and finite, as its
    /// transition distribution would be degenerate.
    pub fn validate(self) -> Result<Self, ConfigError> {
        match self {
            Rate::Fixed(lambda) if !(lambda > 0.0 && lambda.is_finite()) => {
                Err(ConfigError::NonPositive {
                    key: "lambda".to_string(),
                    value: lambda,
                })
            }
            rate => Ok(rate),
        }
    }

    /// The scale (β) of the transition distribution, given the
    /// time elapsed between two samples, in milliseconds.
    #[inline]
    pub fn beta(&self, elapsed: i64) -> f64 {
        match self {
            Rate::Adaptive => 2.0 * elapsed.max(1) as f64 / 1_000.0,
            Rate::Fixed(lambda) => 1.0 / lambda,
        }
    }
}

/// Tuning parameters of the [`Matcher`](crate::matcher::Matcher).
///
/// ### Example
///
/// ```rust
/// use trackmatch::matcher::{MatcherConfig, Rate};
///
/// let config = MatcherConfig::default()
///     .with_sigma(10.0)
///     .with_rate(Rate::Fixed(0.5))?
///     .with_max_failure(5);
///
/// assert_eq!(config.max_radius, 200.0);
/// # Ok::<(), trackmatch::matcher::ConfigError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Standard deviation of the position measurements, in meters.
    pub sigma: f64,

    /// Variance of the bearing measurements, in square degrees.
    pub sigma_azimuth: f64,

    pub lambda: Rate,

    /// Radius within which candidates of a sample are searched for, in meters.
    pub max_radius: f64,

    /// Upper limit of the routing distance between two samples, in meters.
    pub max_distance: f64,

    /// The number of consecutive unmatched samples tolerated before matching is
    /// aborted, unlimited if [`None`].
    pub max_failure: Option<usize>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            sigma_azimuth: DEFAULT_SIGMA_AZIMUTH,
            lambda: Rate::Adaptive,
            max_radius: DEFAULT_MAX_RADIUS,
            max_distance: DEFAULT_MAX_DISTANCE,
            max_failure: None,
        }
    }
}

impl MatcherConfig {
    pub fn with_sigma(self, sigma: f64) -> Self {
        Self { sigma, ..self }
    }

    pub fn with_sigma_azimuth(self, sigma_azimuth: f64) -> Self {
        Self {
            sigma_azimuth,
            ..self
        }
    }

    /// Sets the transition rate, failing if it does not [validate](Rate::validate).
    pub fn with_rate(self, lambda: Rate) -> Result<Self, ConfigError> {
        Ok(Self {
            lambda: lambda.validate()?,
            ..self
        })
    }

    pub fn with_max_radius(self, max_radius: f64) -> Self {
        Self { max_radius, ..self }
    }

    pub fn with_max_distance(self, max_distance: f64) -> Self {
        Self {
            max_distance,
            ..self
        }
    }

    pub fn with_max_failure(self, max_failure: usize) -> Self {
        Self {
            max_failure: Some(max_failure),
            ..self
        }
    }

    /// The routing bound between two samples `elapsed` milliseconds apart.
    #[inline]
    pub fn bound(&self, elapsed: i64) -> f64 {
        let reachable = (elapsed as f64 / 1_000.0) * BOUND_SPEED;
        MIN_BOUND.max(self.max_distance.min(reachable))
    }

    /// Reads the configuration from the environment, after loading any `.env` file.
    ///
    /// Recognises `TRACKMATCH_SIGMA`, `TRACKMATCH_SIGMA_AZIMUTH`, `TRACKMATCH_LAMBDA`,
    /// `TRACKMATCH_MAX_RADIUS`, `TRACKMATCH_MAX_DISTANCE` and `TRACKMATCH_MAX_FAILURE`.
    /// Unset variables keep their default. A `TRACKMATCH_LAMBDA` of `0` selects
    /// the [adaptive](Rate::Adaptive) rate.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration from an arbitrary key-value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| -> Result<Option<(String, f64)>, ConfigError> {
            let key = format!("{ENV_PREFIX}{name}");
            let Some(value) = lookup(&key) else {
                return Ok(None);
            };

            let parsed = parse::<f64>(&key, &value)?;
            Ok(Some((key, parsed)))
        };

        let positive = |name: &str| -> Result<Option<f64>, ConfigError> {
            match read(name)? {
                Some((key, value)) if value <= 0.0 || !value.is_finite() => {
                    Err(ConfigError::NonPositive { key, value })
                }
                other => Ok(other.map(|(_, value)| value)),
            }
        };

        let defaults = Self::default();
        let lambda = match read("LAMBDA")? {
            None => defaults.lambda,
            Some((_, rate)) if rate == 0.0 => Rate::Adaptive,
            Some((key, value)) => Rate::Fixed(value)
                .validate()
                .map_err(|_| ConfigError::NonPositive { key, value })?,
        };

        let max_failure = {
            let key = format!("{ENV_PREFIX}MAX_FAILURE");
            match lookup(&key) {
                Some(value) => Some(parse::<usize>(&key, &value)?),
                None => defaults.max_failure,
            }
        };

        Ok(Self {
            sigma: positive("SIGMA")?.unwrap_or(defaults.sigma),
            sigma_azimuth: positive("SIGMA_AZIMUTH")?.unwrap_or(defaults.sigma_azimuth),
            lambda,
            max_radius: positive("MAX_RADIUS")?.unwrap_or(defaults.max_radius),
            max_distance: positive("MAX_DISTANCE")?.unwrap_or(defaults.max_distance),
            max_failure,
        })
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

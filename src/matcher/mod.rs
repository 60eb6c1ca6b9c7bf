//! Online map matching of positional traces onto a road network.
//!
//! The [`Matcher`] matches [`Sample`]s one at a time, using the
//! [online filter](crate::transition) to retain only the part of the trace
//! which has not yet converged onto a single path.

pub mod candidate;
pub mod config;
pub mod costing;
pub mod driver;
pub mod entity;
pub mod error;
pub mod generator;
pub mod sample;
pub mod state;
pub mod transitions;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use candidate::*;
#[doc(inline)]
pub use config::*;
#[doc(inline)]
pub use entity::*;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use sample::*;
#[doc(inline)]
pub use state::*;

#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod graph;
pub mod matcher;
pub mod transition;

#[cfg(feature = "tracing")]
pub mod util;

#[doc(hidden)]
pub mod fixtures;

pub use graph::{Graph, Router, SpatialIndex};
pub use matcher::{Matcher, MatcherConfig, MatcherState, Sample};

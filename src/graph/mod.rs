//! The road network which traces are matched onto.
//!
//! Contains the in-memory [`Graph`], its directed [`Edge`]s, the
//! [`RoadPoint`]s snapped onto them, and the [`Route`]s between those
//! points. Matching consumes the network through the [`SpatialIndex`],
//! [`Router`] and [`Topology`] traits.

mod cost;
mod edge;
mod error;
mod item;
mod point;
mod route;

pub mod minset;
pub mod primitives;
pub mod traits;


#[doc(inline)]
pub use cost::*;
#[doc(inline)]
pub use traits::*;

pub use edge::*;
pub use error::GraphError;
pub use item::Graph;
pub use point::RoadPoint;
pub use route::Route;

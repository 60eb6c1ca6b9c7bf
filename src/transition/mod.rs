//! A generic, online Hidden-Markov-Model filter.
//!
//! The filter decodes a stream of samples one at a time, linking the
//! candidates of each sample onto their most probable predecessor
//! (Viterbi), whilst the [`State`] retains only the part of the decoding
//! history which has not yet converged.
//!
//! The filter is agnostic to what is being matched. A [`Model`] supplies
//! the candidates of a sample and the transitions between candidates,
//! see [`Matcher`](crate::matcher::Matcher) for the map-matching model.

pub mod filter;
pub mod model;
pub mod state;
pub mod vector;


#[doc(inline)]
pub use filter::*;
#[doc(inline)]
pub use model::*;
#[doc(inline)]
pub use state::*;
#[doc(inline)]
pub use vector::*;

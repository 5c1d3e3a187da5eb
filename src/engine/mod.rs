//! Match engine implementations.
//!
//! Engines are created per query by a [`crate::MatchEngineFactory`] and
//! decide which pool items survive the filter and in which order tier.

pub mod exact_first;
pub mod substring;
mod util;

pub use exact_first::{ExactFirstEngine, ExactFirstEngineFactory};
pub use substring::{SubstringEngine, SubstringEngineFactory};

//! Biased dice rolling library.
//!
//! This crate provides the numeric core of a weighted dice roller:
//! - Default distribution synthesis with a high-value bias
//! - Proportional (weighted) sampling with a uniform fallback
//! - Correlated multi-die sequences driven by a consistency percentage
//! - Largest-remainder normalization to exactly 100 percentage points
//! - Classification of a distribution as valid, off-total or zero-total
//!
//! Every operation takes the current distribution and a random source as
//! explicit inputs, so nothing is shared between calls.

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// Distributions, sampling, sequences and the session that ties them together.
pub mod model;

/// Weight files and profile directories.
pub mod io;

pub use error::{DiceError, Result};

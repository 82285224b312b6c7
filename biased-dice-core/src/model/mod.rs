//! Top-level module for weighted dice rolling.
//!
//! This module provides:
//! - The face/weight table (`Distribution`) and its default synthesis
//! - An injectable uniform random source (`UnitRng`)
//! - Weighted sampling of a single die (`sampler`)
//! - Consistency-correlated sequences of dice (`sequence`)
//! - Largest-remainder normalization (`normalizer`)
//! - Classification of a distribution (`validator`)
//! - Roll policy (`RollInput`) and the stateful session (`DiceTable`)

/// Face/weight table and default synthesis.
pub mod distribution;

/// Uniform `[0,1)` random source used by every draw.
///
/// Implemented for any `rand::Rng`, plus a scripted source for tests.
pub mod unit_rng;

/// Draws one face proportionally to its weight.
pub mod sampler;

/// Rolls a batch of dice with a tunable correlation between consecutive dice.
pub mod sequence;

/// Rescales weights to integer percentages summing to exactly 100.
pub mod normalizer;

/// Pure classification of a distribution's total.
pub mod validator;

/// Roll policy: number of dice and consistency, with validating setters.
pub mod roll_input;

/// Stateful owner of one session's distribution.
pub mod dice_table;

/// Statistical self-checks over many draws.
pub mod analysis;

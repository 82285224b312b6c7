use serde::{Deserialize, Serialize};

use super::distribution::Face;
use crate::error::{DiceError, Result};

/// Smallest number of dice in one roll.
pub const MIN_DICE: u32 = 1;

/// Largest number of dice in one roll.
pub const MAX_DICE: u32 = 10;

/// Parameters of one roll: how many dice and how consistent they are.
///
/// # Invariants
/// - `dice_count` is in `MIN_DICE..=MAX_DICE`
/// - `consistency_percent` is in `0..=100`
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollInput {
	dice_count: u32,
	consistency_percent: u32,
}

impl Default for RollInput {
	fn default() -> Self {
		Self { dice_count: MIN_DICE, consistency_percent: 0 }
	}
}

impl RollInput {
	/// Creates a roll input, checking both parameters.
	///
	/// # Errors
	/// Returns `DiceCountOutOfRange` or `ConsistencyOutOfRange`.
	pub fn new(dice_count: u32, consistency_percent: u32) -> Result<Self> {
		let mut input = Self::default();
		input.set_dice_count(dice_count)?;
		input.set_consistency_percent(consistency_percent)?;
		Ok(input)
	}

	/// Number of dice to roll.
	pub fn dice_count(&self) -> u32 {
		self.dice_count
	}

	/// Probability, in percent, that a later die correlates with the previous result.
	pub fn consistency_percent(&self) -> u32 {
		self.consistency_percent
	}

	/// Sets the number of dice.
	///
	/// # Errors
	/// Returns `DiceCountOutOfRange` outside `MIN_DICE..=MAX_DICE`.
	pub fn set_dice_count(&mut self, dice_count: u32) -> Result<()> {
		if !(MIN_DICE..=MAX_DICE).contains(&dice_count) {
			return Err(DiceError::DiceCountOutOfRange { count: dice_count, min: MIN_DICE, max: MAX_DICE });
		}
		self.dice_count = dice_count;
		Ok(())
	}

	/// Sets the consistency percentage.
	///
	/// # Errors
	/// Returns `ConsistencyOutOfRange` above 100.
	pub fn set_consistency_percent(&mut self, consistency_percent: u32) -> Result<()> {
		if consistency_percent > 100 {
			return Err(DiceError::ConsistencyOutOfRange(consistency_percent));
		}
		self.consistency_percent = consistency_percent;
		Ok(())
	}
}

/// Brings a user-typed dice count back into the roll policy.
///
/// Values below `MIN_DICE` become `MIN_DICE`, values above `MAX_DICE` become `MAX_DICE`.
pub fn clamp_dice_count(raw: i64) -> u32 {
	raw.clamp(MIN_DICE as i64, MAX_DICE as i64) as u32
}

/// Result of one roll.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RollOutcome {
	/// Face of every die, in rolling order.
	pub values: Vec<Face>,
	/// Sum of all faces.
	pub total: u64,
	/// Consistency used for this roll.
	pub consistency_percent: u32,
}

impl RollOutcome {
	pub fn new(values: Vec<Face>, consistency_percent: u32) -> Self {
		let total = values.iter().map(|&v| v as u64).sum();
		Self { values, total, consistency_percent }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_policy_range() {
		let input = RollInput::new(10, 100).unwrap();
		assert_eq!(input.dice_count(), 10);
		assert_eq!(input.consistency_percent(), 100);
		assert!(RollInput::new(1, 0).is_ok());
	}

	#[test]
	fn rejects_out_of_range_dice() {
		assert!(matches!(
			RollInput::new(0, 0),
			Err(DiceError::DiceCountOutOfRange { count: 0, min: 1, max: 10 })
		));
		assert!(matches!(RollInput::new(11, 0), Err(DiceError::DiceCountOutOfRange { count: 11, .. })));
	}

	#[test]
	fn rejects_consistency_above_100() {
		let mut input = RollInput::default();
		assert!(matches!(input.set_consistency_percent(101), Err(DiceError::ConsistencyOutOfRange(101))));
		assert_eq!(input.consistency_percent(), 0);
	}

	#[test]
	fn serializes_validated_fields() {
		let input = RollInput::new(3, 40).unwrap();
		assert_eq!(
			serde_json::to_string(&input).unwrap(),
			r#"{"dice_count":3,"consistency_percent":40}"#
		);
	}

	#[test]
	fn clamps_typed_dice_count() {
		assert_eq!(clamp_dice_count(-3), 1);
		assert_eq!(clamp_dice_count(0), 1);
		assert_eq!(clamp_dice_count(7), 7);
		assert_eq!(clamp_dice_count(42), 10);
	}

	#[test]
	fn outcome_sums_faces() {
		let outcome = RollOutcome::new(vec![6, 5, 6], 80);
		assert_eq!(outcome.total, 17);
	}
}

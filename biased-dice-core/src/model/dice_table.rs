use log::debug;

use super::distribution::{Distribution, Face, Weight};
use super::normalizer::normalize;
use super::roll_input::{RollInput, RollOutcome};
use super::sequence::roll_sequence;
use super::unit_rng::UnitRng;
use super::validator::{ValidationResult, validate};
use crate::error::Result;

/// The distribution of one rolling session.
///
/// # Responsibilities
/// - Keep the current face count and its weights
/// - Regenerate defaults when the face count changes or on reset
/// - Apply user edits and normalization
/// - Roll batches of dice from the current weights
#[derive(Clone, Debug, Default)]
pub struct DiceTable {
	distribution: Distribution,
}

impl DiceTable {
	/// Creates a table with the default weights for `face_count` faces.
	///
	/// # Errors
	/// Returns `FaceCountOutOfRange` outside `1..=MAX_FACES`.
	pub fn new(face_count: u32) -> Result<Self> {
		Ok(Self { distribution: Distribution::build_default(face_count)? })
	}

	/// Creates a table from existing weights.
	pub fn from_distribution(distribution: Distribution) -> Self {
		Self { distribution }
	}

	/// Current weights.
	pub fn distribution(&self) -> &Distribution {
		&self.distribution
	}

	/// Number of faces of the die.
	pub fn face_count(&self) -> u32 {
		self.distribution.face_count()
	}

	/// Changes the number of faces and regenerates the default weights.
	///
	/// # Errors
	/// Returns `FaceCountOutOfRange` outside `1..=MAX_FACES`; the table is left untouched.
	pub fn set_face_count(&mut self, face_count: u32) -> Result<()> {
		self.distribution = Distribution::build_default(face_count)?;
		debug!("face count set to {face_count}, defaults regenerated");
		Ok(())
	}

	/// Restores the default weights for the current face count.
	pub fn reset(&mut self) -> Result<()> {
		self.set_face_count(self.face_count())
	}

	/// Replaces the weight of one face.
	pub fn set_weight(&mut self, face: Face, weight: Weight) -> Result<()> {
		self.distribution.set_weight(face, weight)
	}

	/// Replaces every weight at once. The face count follows `distribution`.
	pub fn set_distribution(&mut self, distribution: Distribution) {
		self.distribution = distribution;
	}

	/// Normalizes the weights to sum to exactly 100.
	///
	/// # Errors
	/// Returns `InvalidDistribution` if all weights are zero; the table is left untouched.
	pub fn normalize(&mut self) -> Result<&Distribution> {
		self.distribution = normalize(&self.distribution)?;
		Ok(&self.distribution)
	}

	/// Classifies the current weights.
	pub fn validate(&self) -> ValidationResult {
		validate(&self.distribution)
	}

	/// Rolls a batch of dice with the current weights.
	pub fn roll<R: UnitRng + ?Sized>(&self, input: &RollInput, rng: &mut R) -> RollOutcome {
		let values = roll_sequence(input.dice_count(), input.consistency_percent(), &self.distribution, rng);
		RollOutcome::new(values, input.consistency_percent())
	}
}

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, Result};

/// One outcome of a die, numbered `1..=face_count`.
pub type Face = u32;

/// Percentage-point share of a face before normalization. May be zero.
pub type Weight = u32;

/// Face count used when nothing else is configured.
pub const DEFAULT_FACE_COUNT: u32 = 6;

/// Largest face count a distribution may describe.
pub const MAX_FACES: u32 = 1000;

/// Reference table for a six-sided die, biased toward high faces.
const DEFAULT_WEIGHTS_6: [Weight; 6] = [5, 8, 12, 20, 25, 30];

/// Ordered mapping `face -> weight` for faces `1..=face_count`.
///
/// A distribution is always usable for rolling, whatever its total: a zero
/// total degrades to uniform sampling, any positive total is normalized
/// implicitly by the sampler.
///
/// # Invariants
/// - At least one face
/// - Faces are contiguous, the weight of face `f` is stored at index `f - 1`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
	weights: Vec<Weight>,
}

impl Default for Distribution {
	/// The six-sided reference table.
	fn default() -> Self {
		Self { weights: DEFAULT_WEIGHTS_6.to_vec() }
	}
}

impl Distribution {
	/// Creates a distribution from weights listed in face order.
	///
	/// # Errors
	/// - `EmptyDistribution` if `weights` is empty
	/// - `FaceCountOutOfRange` if there are more than `MAX_FACES` weights
	pub fn new(weights: Vec<Weight>) -> Result<Self> {
		if weights.is_empty() {
			return Err(DiceError::EmptyDistribution);
		}
		if weights.len() > MAX_FACES as usize {
			return Err(DiceError::FaceCountOutOfRange(weights.len().try_into().unwrap_or(u32::MAX)));
		}
		Ok(Self { weights })
	}

	/// Creates a distribution where every face weighs zero.
	///
	/// # Errors
	/// Returns `FaceCountOutOfRange` outside `1..=MAX_FACES`.
	pub fn uniform_zero(face_count: u32) -> Result<Self> {
		check_face_count(face_count)?;
		Ok(Self { weights: vec![0; face_count as usize] })
	}

	/// Synthesizes the default table for a die with `face_count` faces.
	///
	/// - Six faces use the fixed reference table `5, 8, 12, 20, 25, 30`.
	/// - Any other count weighs each face by its value, rounds each share of
	///   `face_count * (face_count + 1) / 2` to whole percents (half away from
	///   zero) and gives the rounding difference to the highest face.
	///
	/// The result always sums to exactly 100.
	///
	/// # Errors
	/// Returns `FaceCountOutOfRange` outside `1..=MAX_FACES`.
	pub fn build_default(face_count: u32) -> Result<Self> {
		check_face_count(face_count)?;
		if face_count == DEFAULT_FACE_COUNT {
			return Ok(Self::default());
		}

		let total_weight = face_count as f64 * (face_count as f64 + 1.0) / 2.0;
		let mut percents: Vec<i64> = (1..=face_count)
			.map(|face| (face as f64 / total_weight * 100.0).round() as i64)
			.collect();

		// Adjust to total exactly 100
		let difference = 100 - percents.iter().sum::<i64>();
		if let Some(highest) = percents.last_mut() {
			*highest += difference;
		}
		trace!("default table for {face_count} faces, {difference:+} given to the highest face");

		// The highest face always keeps a non-negative share
		let weights = percents.into_iter().map(|p| p.max(0) as Weight).collect();
		Ok(Self { weights })
	}

	/// Number of faces.
	pub fn face_count(&self) -> u32 {
		self.weights.len() as u32
	}

	/// Weight of `face`, or `None` if the face does not exist.
	pub fn weight(&self, face: Face) -> Option<Weight> {
		let index = (face as usize).checked_sub(1)?;
		self.weights.get(index).copied()
	}

	/// Replaces the weight of one face.
	///
	/// # Errors
	/// Returns `FaceOutOfRange` if `face` is not in `1..=face_count`.
	pub fn set_weight(&mut self, face: Face, weight: Weight) -> Result<()> {
		let face_count = self.face_count();
		if face == 0 || face > face_count {
			return Err(DiceError::FaceOutOfRange { face, face_count });
		}
		self.weights[face as usize - 1] = weight;
		Ok(())
	}

	/// Sum of all weights.
	pub fn total(&self) -> u64 {
		self.weights.iter().map(|&w| w as u64).sum()
	}

	/// Weights in face order.
	pub fn weights(&self) -> &[Weight] {
		&self.weights
	}

	/// Iterates over `(face, weight)` pairs in increasing face order.
	pub fn iter(&self) -> impl Iterator<Item = (Face, Weight)> + '_ {
		self.weights.iter().enumerate().map(|(i, &w)| (i as Face + 1, w))
	}

	/// Share of the current total held by each face, in percent.
	///
	/// All zero when the total is zero.
	pub fn bar_widths(&self) -> Vec<f64> {
		let total = self.total();
		self.weights
			.iter()
			.map(|&w| if total > 0 { w as f64 / total as f64 * 100.0 } else { 0.0 })
			.collect()
	}
}

/// Rejects face counts outside `1..=MAX_FACES` before anything is allocated.
fn check_face_count(face_count: u32) -> Result<()> {
	if !(1..=MAX_FACES).contains(&face_count) {
		return Err(DiceError::FaceCountOutOfRange(face_count));
	}
	Ok(())
}

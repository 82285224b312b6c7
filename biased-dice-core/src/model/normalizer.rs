use log::debug;

use super::distribution::{Distribution, Weight};
use crate::error::{DiceError, Result};

/// Target sum of a normalized distribution.
pub const TARGET_TOTAL: u64 = 100;

/// Rescales weights to integer percentages summing to exactly 100, using the
/// largest-remainder method.
///
/// # Behavior
/// - Pass 1: every face gets `floor(weight / total * 100)`.
/// - Pass 2: the points still missing go, one each, to the faces with the
///   largest fractional part. Equal fractions are served in face order.
///
/// Shares are computed on integers (`weight * 100` divided by `total`), so the
/// fractional parts compare exactly and a distribution already summing to 100
/// comes back unchanged.
///
/// # Errors
/// Returns `InvalidDistribution` if the weights sum to zero.
pub fn normalize(distribution: &Distribution) -> Result<Distribution> {
	let total = distribution.total();
	if total == 0 {
		return Err(DiceError::InvalidDistribution { total });
	}

	// First pass: round down for each share
	let mut normalized: Vec<Weight> = Vec::with_capacity(distribution.face_count() as usize);
	let mut fractions: Vec<(usize, u64)> = Vec::with_capacity(normalized.capacity());
	let mut allocated = 0u64;
	for (index, &weight) in distribution.weights().iter().enumerate() {
		let scaled = weight as u64 * TARGET_TOTAL;
		let floor_share = scaled / total;
		normalized.push(floor_share as Weight);
		fractions.push((index, scaled % total));
		allocated += floor_share;
	}

	// Second pass: distribute the remainder to the largest fractional parts
	let remainder = TARGET_TOTAL - allocated;
	debug!("normalizing total {total}: {allocated} allocated, {remainder} left over");
	if remainder > 0 {
		// Stable sort keeps face order among equal fractions
		fractions.sort_by(|a, b| b.1.cmp(&a.1));
		for (index, _) in fractions.into_iter().take(remainder as usize) {
			normalized[index] += 1;
		}
	}

	Distribution::new(normalized)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn normalized(weights: &[u32]) -> Vec<u32> {
		let d = Distribution::new(weights.to_vec()).unwrap();
		normalize(&d).unwrap().weights().to_vec()
	}

	#[test]
	fn equal_fractions_favour_the_first_face() {
		assert_eq!(normalized(&[33, 33, 33]), vec![34, 33, 33]);
	}

	#[test]
	fn largest_fraction_wins() {
		// shares: 10, 20, 30, 40 exactly
		assert_eq!(normalized(&[10, 20, 30, 40]), vec![10, 20, 30, 40]);
		// shares: 14.28.., 28.57.., 57.14.. -> fractions .28, .57, .14
		assert_eq!(normalized(&[1, 2, 4]), vec![14, 29, 57]);
	}

	#[test]
	fn hundred_total_is_a_fixed_point() {
		let weights = [5, 8, 12, 20, 25, 30];
		assert_eq!(normalized(&weights), weights.to_vec());
		let weights = [29, 0, 57, 14];
		assert_eq!(normalized(&weights), weights.to_vec());
	}

	#[test]
	fn zero_weights_stay_zero_when_no_remainder_reaches_them() {
		assert_eq!(normalized(&[0, 3, 0, 1]), vec![0, 75, 0, 25]);
	}

	#[test]
	fn zero_total_is_rejected() {
		let d = Distribution::uniform_zero(3).unwrap();
		assert!(matches!(normalize(&d), Err(DiceError::InvalidDistribution { total: 0 })));
	}

	#[test]
	fn more_faces_than_points() {
		let v = normalized(&[1; 150]);
		assert_eq!(v.iter().map(|&w| w as u64).sum::<u64>(), 100);
		assert!(v[..100].iter().all(|&w| w == 1));
		assert!(v[100..].iter().all(|&w| w == 0));
	}
}

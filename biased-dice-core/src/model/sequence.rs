use log::trace;

use super::distribution::{Distribution, Face};
use super::sampler::sample;
use super::unit_rng::UnitRng;

/// Rolls `count` dice where each die after the first may correlate with the
/// running base value.
///
/// # Behavior
/// - The first die is sampled from `distribution` and becomes the base value.
/// - Each following die draws `c` in `[0,100)`. When `c <= consistency_percent`
///   (and consistency is not zero) the die correlates:
///   - at 100%, it repeats the base value exactly;
///   - otherwise it lands on `base - 1`, `base` or `base + 1` with equal odds,
///     clamped to `1..=face_count`. The base value is left unchanged.
/// - Otherwise the die is sampled independently and becomes the new base value.
///
/// The base value only lives for one call.
///
/// # Notes
/// - `count` and `consistency_percent` are expected to be validated by the
///   caller (see `RollInput`).
/// - Correlated dice are clamped to the die's own face count, not to a fixed
///   six-sided range.
pub fn roll_sequence<R: UnitRng + ?Sized>(
	count: u32,
	consistency_percent: u32,
	distribution: &Distribution,
	rng: &mut R,
) -> Vec<Face> {
	debug_assert!(count >= 1, "at least one die must be rolled");
	debug_assert!(consistency_percent <= 100, "consistency is a percentage");

	let face_count = distribution.face_count();
	let mut results = Vec::with_capacity(count as usize);
	let mut base_value: Face = 0;

	for i in 0..count {
		let value = if i == 0 {
			base_value = sample(distribution, rng);
			base_value
		} else if correlates(consistency_percent, rng) {
			if consistency_percent == 100 {
				base_value
			} else {
				let deviation = deviation(rng);
				let value = (base_value as i64 + deviation).clamp(1, face_count as i64) as Face;
				trace!("die {i}: correlated {base_value}{deviation:+} -> {value}");
				value
			}
		} else {
			base_value = sample(distribution, rng);
			base_value
		};

		results.push(value);
	}

	results
}

/// Whether the next die correlates with the base value.
fn correlates<R: UnitRng + ?Sized>(consistency_percent: u32, rng: &mut R) -> bool {
	let c = rng.next_unit() * 100.0;
	consistency_percent > 0 && c <= consistency_percent as f64
}

/// Uniform deviation in `{-1, 0, +1}`.
fn deviation<R: UnitRng + ?Sized>(rng: &mut R) -> i64 {
	((rng.next_unit() * 3.0).floor() as i64).min(2) - 1
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::unit_rng::ScriptedRng;

	fn d6() -> Distribution {
		Distribution::build_default(6).unwrap()
	}

	#[test]
	fn length_matches_count() {
		let mut rng = ScriptedRng::new(&[0.3, 0.8, 0.1, 0.6]);
		for count in 1..=10 {
			assert_eq!(roll_sequence(count, 50, &d6(), &mut rng).len(), count as usize);
		}
	}

	#[test]
	fn full_consistency_repeats_first_die() {
		let mut rng = ScriptedRng::new(&[0.0, 0.42, 0.99, 0.7]);
		let values = roll_sequence(5, 100, &d6(), &mut rng);
		assert_eq!(values, vec![1; 5]);
	}

	#[test]
	fn zero_consistency_samples_every_die() {
		// [5, 8, 12, 20, 25, 30] cumulative: 5, 13, 25, 45, 70, 100
		// Each later die draws a correlation check (0.0 here, which would pass
		// `c <= consistency`) and is still sampled independently
		let mut rng = ScriptedRng::new(&[0.99, 0.0, 0.3, 0.0, 0.0]);
		let values = roll_sequence(3, 0, &d6(), &mut rng);
		assert_eq!(values, vec![6, 4, 1]);
		assert_eq!(rng.draws(), 5);
	}

	#[test]
	fn correlated_die_deviates_from_base() {
		// first die: 0.5 -> face 5; then c = 10 <= 50, deviation draw 0.0 -> -1
		let mut rng = ScriptedRng::new(&[0.5, 0.1, 0.0]);
		assert_eq!(roll_sequence(2, 50, &d6(), &mut rng), vec![5, 4]);
		// deviation draw 0.5 -> 0, 0.9 -> +1
		let mut rng = ScriptedRng::new(&[0.5, 0.1, 0.5]);
		assert_eq!(roll_sequence(2, 50, &d6(), &mut rng), vec![5, 5]);
		let mut rng = ScriptedRng::new(&[0.5, 0.1, 0.9]);
		assert_eq!(roll_sequence(2, 50, &d6(), &mut rng), vec![5, 6]);
	}

	#[test]
	fn correlated_dice_do_not_move_the_base() {
		// base 5, then +1 -> 6, then +1 again from base 5 -> 6 (not 7)
		let mut rng = ScriptedRng::new(&[0.5, 0.1, 0.9, 0.1, 0.9]);
		assert_eq!(roll_sequence(3, 50, &d6(), &mut rng), vec![5, 6, 6]);
	}

	#[test]
	fn independent_die_becomes_new_base() {
		// base 5; c = 90 > 50 -> sample 0.0 -> face 1, new base;
		// c = 10 -> correlated, deviation 0 -> 1
		let mut rng = ScriptedRng::new(&[0.5, 0.9, 0.0, 0.1, 0.5]);
		assert_eq!(roll_sequence(3, 50, &d6(), &mut rng), vec![5, 1, 1]);
	}

	#[test]
	fn correlated_dice_clamp_to_die_range() {
		// face 1 then deviation -1 stays on 1
		let mut rng = ScriptedRng::new(&[0.0, 0.1, 0.0]);
		assert_eq!(roll_sequence(2, 50, &d6(), &mut rng), vec![1, 1]);

		// highest face then deviation +1 stays on the highest face
		let d = Distribution::new(vec![0, 0, 1]).unwrap();
		let mut rng = ScriptedRng::new(&[0.5, 0.1, 0.9]);
		assert_eq!(roll_sequence(2, 50, &d, &mut rng), vec![3, 3]);
	}

	#[test]
	fn correlated_dice_may_exceed_six_on_larger_dice() {
		// A ten-sided die must be able to drift past 6: the clamp follows the
		// face count rather than a fixed six-sided range
		let d = Distribution::new(vec![0, 0, 0, 0, 0, 0, 1, 0, 0, 0]).unwrap();
		let mut rng = ScriptedRng::new(&[0.5, 0.1, 0.9]);
		assert_eq!(roll_sequence(2, 50, &d, &mut rng), vec![7, 8]);
	}

	#[test]
	fn base_value_resets_between_calls() {
		let mut rng = ScriptedRng::new(&[0.0]);
		assert_eq!(roll_sequence(3, 100, &d6(), &mut rng), vec![1, 1, 1]);
		let mut rng = ScriptedRng::new(&[0.99]);
		assert_eq!(roll_sequence(3, 100, &d6(), &mut rng), vec![6, 6, 6]);
	}
}

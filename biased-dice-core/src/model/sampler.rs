use log::trace;

use super::distribution::{Distribution, Face};
use super::unit_rng::UnitRng;

/// Draws one face with probability proportional to its weight.
///
/// - If every weight is zero, falls back to a uniform draw over all faces.
/// - Otherwise draws `r` in `[0, total)` and walks faces in increasing order,
///   accumulating weights; the first face with a positive weight whose
///   cumulative sum reaches `r` (`r <= cumulative`) wins.
///
/// Faces weighing zero are skipped during the walk, so they can never be
/// drawn. This differs from a bare "first face where `r <= cumulative`" rule
/// only when `r` is exactly `0.0` and the leading faces weigh zero: over
/// `[0, 50, 50]` a draw of `0.0` returns face 2, not face 1.
///
/// The result is always in `1..=face_count`: should floating rounding ever
/// make the walk fall through, the highest face is returned.
pub fn sample<R: UnitRng + ?Sized>(distribution: &Distribution, rng: &mut R) -> Face {
	let face_count = distribution.face_count();
	let total = distribution.total();

	if total == 0 {
		trace!("all weights are 0, rolling uniformly over {face_count} faces");
		return uniform_face(face_count, rng);
	}

	let r = rng.next_unit() * total as f64;
	let mut cumulative = 0u64;
	for (face, weight) in distribution.iter() {
		cumulative += weight as u64;
		if weight > 0 && r <= cumulative as f64 {
			return face;
		}
	}

	// Fallback: should not happen, but kept for safety
	face_count
}

/// Uniform face in `1..=face_count`.
pub(crate) fn uniform_face<R: UnitRng + ?Sized>(face_count: u32, rng: &mut R) -> Face {
	let face = (rng.next_unit() * face_count as f64).floor() as u32 + 1;
	face.min(face_count)
}

use rand::Rng;

/// A source of uniform values in `[0,1)`.
///
/// Sampling and sequence generation only ever need this one primitive, so
/// tests can replace the generator with a fixed script of values.
pub trait UnitRng {
	/// Returns a uniform value in `[0,1)`.
	fn next_unit(&mut self) -> f64;
}

impl<R: Rng> UnitRng for R {
	fn next_unit(&mut self) -> f64 {
		self.random::<f64>()
	}
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values are clamped into `[0,1)` when created so a scripted source always
/// honours the `UnitRng` contract.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
	values: Vec<f64>,
	position: usize,
}

impl ScriptedRng {
	/// Creates a scripted source from the given values.
	///
	/// An empty script behaves as a constant `0.0`.
	pub fn new(values: &[f64]) -> Self {
		let values = values
			.iter()
			.map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
			.collect();
		Self { values, position: 0 }
	}

	/// Number of values drawn so far.
	pub fn draws(&self) -> usize {
		self.position
	}
}

impl UnitRng for ScriptedRng {
	fn next_unit(&mut self) -> f64 {
		if self.values.is_empty() {
			self.position += 1;
			return 0.0;
		}
		let value = self.values[self.position % self.values.len()];
		self.position += 1;
		value
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn scripted_values_cycle() {
		let mut rng = ScriptedRng::new(&[0.1, 0.2]);
		assert_eq!(rng.next_unit(), 0.1);
		assert_eq!(rng.next_unit(), 0.2);
		assert_eq!(rng.next_unit(), 0.1);
		assert_eq!(rng.draws(), 3);
	}

	#[test]
	fn scripted_values_are_clamped_below_one() {
		let mut rng = ScriptedRng::new(&[1.0, -0.5]);
		assert!(rng.next_unit() < 1.0);
		assert_eq!(rng.next_unit(), 0.0);
	}

	#[test]
	fn seeded_rng_stays_in_unit_interval() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..1000 {
			let u = rng.next_unit();
			assert!((0.0..1.0).contains(&u));
		}
	}
}

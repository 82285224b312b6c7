use std::sync::mpsc;
use std::thread;

use log::debug;
use serde::{Deserialize, Serialize};

use super::distribution::{Distribution, Face};
use super::normalizer::normalize;
use super::sampler::sample;
use super::sequence::roll_sequence;
use super::unit_rng::UnitRng;
use crate::error::Result;

/// How often each face came up over a run of draws.
///
/// # Invariants
/// - `counts` has one entry per face, face `f` at index `f - 1`
/// - `iterations` equals the sum of `counts`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FrequencyReport {
	pub iterations: u64,
	pub counts: Vec<u64>,
	/// Observed share of each face, in percent.
	pub observed: Vec<f64>,
	/// `weight / total` of each face, in percent (uniform if the total is zero).
	pub expected: Vec<f64>,
}

impl FrequencyReport {
	fn from_counts(distribution: &Distribution, counts: Vec<u64>) -> Self {
		let iterations: u64 = counts.iter().sum();
		let observed = counts
			.iter()
			.map(|&c| if iterations > 0 { c as f64 / iterations as f64 * 100.0 } else { 0.0 })
			.collect();
		let expected = if distribution.total() > 0 {
			distribution.bar_widths()
		} else {
			vec![100.0 / distribution.face_count() as f64; distribution.face_count() as usize]
		};
		Self { iterations, counts, observed, expected }
	}

	/// Largest gap between observed and expected share, in percentage points.
	pub fn max_deviation(&self) -> f64 {
		self.observed
			.iter()
			.zip(&self.expected)
			.map(|(o, e)| (o - e).abs())
			.fold(0.0, f64::max)
	}
}

/// Samples `distribution` `iterations` times and counts every face.
///
/// # Behavior
/// - Splits the draws into one chunk per CPU.
/// - Each worker thread samples its chunk with its own thread-local generator.
/// - Partial counts are merged as they arrive over a channel.
pub fn sample_frequencies(distribution: &Distribution, iterations: u64) -> FrequencyReport {
	let workers = num_cpus::get().max(1) as u64;
	let chunk_size = iterations.div_ceil(workers);
	let face_count = distribution.face_count() as usize;

	let (tx, rx) = mpsc::channel();
	let mut remaining = iterations;
	while remaining > 0 {
		let chunk = chunk_size.min(remaining);
		remaining -= chunk;

		let tx = tx.clone();
		let distribution = distribution.clone();
		thread::spawn(move || {
			let mut rng = rand::rng();
			let mut partial = vec![0u64; face_count];
			for _ in 0..chunk {
				partial[sample(&distribution, &mut rng) as usize - 1] += 1;
			}
			// The receiver outlives every worker
			let _ = tx.send(partial);
		});
	}
	drop(tx);

	let mut counts = vec![0u64; face_count];
	for partial in rx.iter() {
		for (total, count) in counts.iter_mut().zip(partial) {
			*total += count;
		}
	}
	debug!("sampled {iterations} draws over {workers} workers");

	FrequencyReport::from_counts(distribution, counts)
}

/// How a batch of correlated dice behaved over many rolls.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConsistencyReport {
	pub consistency_percent: u32,
	pub dice_count: u32,
	pub iterations: u64,
	/// Rolls where every die showed the same face.
	pub identical: u64,
	/// Rolls where highest and lowest die differ by at most one.
	pub similar: u64,
	/// The first few rolls, for display.
	pub samples: Vec<Vec<Face>>,
}

/// Number of rolls kept in `ConsistencyReport::samples`.
const KEPT_SAMPLES: usize = 10;

/// Rolls `dice_count` dice `iterations` times and counts identical and
/// similar batches.
pub fn consistency_report<R: UnitRng + ?Sized>(
	distribution: &Distribution,
	dice_count: u32,
	consistency_percent: u32,
	iterations: u64,
	rng: &mut R,
) -> ConsistencyReport {
	let mut report = ConsistencyReport {
		consistency_percent,
		dice_count,
		iterations,
		identical: 0,
		similar: 0,
		samples: Vec::with_capacity(KEPT_SAMPLES),
	};

	for _ in 0..iterations {
		let values = roll_sequence(dice_count, consistency_percent, distribution, rng);
		let min = values.iter().copied().min().unwrap_or_default();
		let max = values.iter().copied().max().unwrap_or_default();
		if min == max {
			report.identical += 1;
		}
		if max - min <= 1 {
			report.similar += 1;
		}
		if report.samples.len() < KEPT_SAMPLES {
			report.samples.push(values);
		}
	}

	report
}

/// One fixed normalization scenario and its result.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NormalizationCase {
	pub name: String,
	pub original_total: u64,
	pub normalized: Vec<u32>,
	pub normalized_total: u64,
}

/// Normalizes a handful of weight sets known to cause rounding trouble.
pub fn normalization_cases() -> Result<Vec<NormalizationCase>> {
	let cases: [(&str, Vec<u32>); 4] = [
		("33, 33, 33", vec![33, 33, 33]),
		("17 x5, 16", vec![17, 17, 17, 17, 17, 16]),
		("10, 20, 30, 40", vec![10, 20, 30, 40]),
		("1..=15", (1..=15).collect()),
	];

	cases
		.into_iter()
		.map(|(name, weights)| {
			let distribution = Distribution::new(weights)?;
			let normalized = normalize(&distribution)?;
			Ok(NormalizationCase {
				name: name.to_owned(),
				original_total: distribution.total(),
				normalized_total: normalized.total(),
				normalized: normalized.weights().to_vec(),
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::unit_rng::ScriptedRng;

	#[test]
	fn frequencies_count_every_draw() {
		let d = Distribution::new(vec![0, 100, 0]).unwrap();
		let report = sample_frequencies(&d, 1_001);
		assert_eq!(report.iterations, 1_001);
		assert_eq!(report.counts, vec![0, 1_001, 0]);
		assert_eq!(report.max_deviation(), 0.0);
	}

	#[test]
	fn zero_total_expects_uniform() {
		let d = Distribution::uniform_zero(4).unwrap();
		let report = sample_frequencies(&d, 0);
		assert_eq!(report.iterations, 0);
		assert_eq!(report.expected, vec![25.0; 4]);
	}

	#[test]
	fn full_consistency_is_always_identical() {
		let d = Distribution::default();
		let mut rng = ScriptedRng::new(&[0.12, 0.93, 0.45, 0.67]);
		let report = consistency_report(&d, 5, 100, 50, &mut rng);
		assert_eq!(report.identical, 50);
		assert_eq!(report.similar, 50);
		assert_eq!(report.samples.len(), KEPT_SAMPLES);
	}

	#[test]
	fn every_case_normalizes_to_100() {
		let cases = normalization_cases().unwrap();
		assert_eq!(cases.len(), 4);
		assert!(cases.iter().all(|c| c.normalized_total == 100));
		assert_eq!(cases[0].normalized, vec![34, 33, 33]);
	}
}

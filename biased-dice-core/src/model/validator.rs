use serde::{Deserialize, Serialize};

use super::distribution::Distribution;
use super::normalizer::TARGET_TOTAL;

/// Why a distribution is or is not ready for rolling as-is.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
	/// Every weight is zero; rolls fall back to uniform.
	ZeroTotal,
	/// Positive total other than 100; normalization can be offered.
	OffTotal,
	/// Total is exactly 100.
	Valid,
}

/// Position of the total relative to 100, for a running-total indicator.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TotalStatus {
	Under,
	Exact,
	Over,
}

/// Outcome of `validate`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationResult {
	pub ok: bool,
	pub reason: Reason,
	pub total: u64,
	pub status: TotalStatus,
}

/// Classifies a distribution by its total. Never modifies it.
///
/// - total 0: `zero-total`
/// - total other than 100: `off-total`
/// - total 100: `valid`
///
/// Deciding whether to normalize an off-total distribution is left to the
/// caller.
pub fn validate(distribution: &Distribution) -> ValidationResult {
	let total = distribution.total();
	let reason = match total {
		0 => Reason::ZeroTotal,
		TARGET_TOTAL => Reason::Valid,
		_ => Reason::OffTotal,
	};
	let status = match total.cmp(&TARGET_TOTAL) {
		std::cmp::Ordering::Less => TotalStatus::Under,
		std::cmp::Ordering::Equal => TotalStatus::Exact,
		std::cmp::Ordering::Greater => TotalStatus::Over,
	};

	ValidationResult { ok: reason == Reason::Valid, reason, total, status }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn check(weights: &[u32]) -> ValidationResult {
		validate(&Distribution::new(weights.to_vec()).unwrap())
	}

	#[test]
	fn classifies_by_total() {
		let zero = check(&[0, 0, 0]);
		assert!(!zero.ok);
		assert_eq!(zero.reason, Reason::ZeroTotal);
		assert_eq!(zero.status, TotalStatus::Under);

		let under = check(&[10, 20]);
		assert!(!under.ok);
		assert_eq!(under.reason, Reason::OffTotal);
		assert_eq!(under.total, 30);
		assert_eq!(under.status, TotalStatus::Under);

		let over = check(&[60, 60]);
		assert_eq!(over.reason, Reason::OffTotal);
		assert_eq!(over.status, TotalStatus::Over);

		let valid = check(&[5, 8, 12, 20, 25, 30]);
		assert!(valid.ok);
		assert_eq!(valid.reason, Reason::Valid);
		assert_eq!(valid.status, TotalStatus::Exact);
	}

	#[test]
	fn reasons_serialize_in_kebab_case() {
		let json = serde_json::to_string(&check(&[0])).unwrap();
		assert_eq!(json, r#"{"ok":false,"reason":"zero-total","total":0,"status":"under"}"#);
		assert_eq!(serde_json::to_string(&Reason::OffTotal).unwrap(), r#""off-total""#);
	}
}

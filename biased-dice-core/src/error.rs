//! Error types for dice operations.

/// Errors raised by the dice core.
///
/// A zero-total distribution during sampling and a total different from 100
/// are not errors: the first falls back to uniform sampling, the second is
/// reported by validation only.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
	/// Normalization was requested on a distribution whose weights sum to zero.
	#[error("cannot normalize: all weights are 0 (total {total})")]
	InvalidDistribution { total: u64 },

	/// A distribution must describe at least one face.
	#[error("a distribution needs at least one face")]
	EmptyDistribution,

	/// A face outside `1..=face_count` was addressed.
	#[error("face {face} is outside 1..={face_count}")]
	FaceOutOfRange { face: u32, face_count: u32 },

	/// A die needs at least one face, and at most `MAX_FACES`.
	#[error("face count must be between 1 and {max}, got {0}", max = crate::model::distribution::MAX_FACES)]
	FaceCountOutOfRange(u32),

	/// The number of dice in a batch is outside the roll policy.
	#[error("dice count must be between {min} and {max}, got {count}")]
	DiceCountOutOfRange { count: u32, min: u32, max: u32 },

	/// Consistency is a percentage.
	#[error("consistency must be between 0 and 100, got {0}")]
	ConsistencyOutOfRange(u32),

	/// A weights file contained something other than a non-negative integer.
	#[error("line {line}: invalid weight '{content}'")]
	ParseWeight { line: usize, content: String },

	/// File system failure while reading or writing weights.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiceError>;

use thiserror::Error;

use crate::SourceId;

/// A row operation refused because it would break the one-or-two targets
/// per source rule. The table is left as it was.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolicyViolation {
	#[error("source `{name}` already has two targets")]
	SourceAlreadySplit { name: SourceId },
	#[error("source `{name}` needs at least one target")]
	LastTarget { name: SourceId },
}

#[derive(Debug, Error)]
pub enum MappingError {
	#[error(transparent)]
	Policy(#[from] PolicyViolation),

	#[error("row {index} out of range (table has {len} rows)")]
	IndexOutOfRange { index: usize, len: usize },

	#[error("no source root picked")]
	NoSource,

	#[error("bad hierarchy: {0}")]
	Hierarchy(String),

	#[error("bad mapping file: {0}")]
	Format(String),

	#[error("no file chosen")]
	NoFileChosen,

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

impl MappingError {
	pub fn format(msg: impl Into<String>) -> Self {
		Self::Format(msg.into())
	}
}

impl From<serde_json::Error> for MappingError {
	fn from(e: serde_json::Error) -> Self {
		if e.is_io() {
			Self::Io(e.into())
		} else {
			Self::Format(e.to_string())
		}
	}
}

pub type Result<T> = std::result::Result<T, MappingError>;

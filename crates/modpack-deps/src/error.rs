//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("validation error: {0}")]
	Validation(String),
	/// Returned when asking for work on a result that has no mods at all,
	/// usually the result of a failed analysis.
	#[error("dependency graph is empty")]
	EmptyGraph,
	#[error("background analysis failed: {0}")]
	Background(String),
}

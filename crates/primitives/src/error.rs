use thiserror::Error;

/// Errors raised while constructing document primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrimitiveError {
	/// A content address was empty.
	#[error("content address is empty")]
	EmptyAddress,

	/// A content address would not fit in a single URL path segment.
	#[error("content address contains a path separator: {0}")]
	AddressSeparator(String),
}

/// Result type for primitive construction.
pub type Result<T> = std::result::Result<T, PrimitiveError>;

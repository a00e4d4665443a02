//! Storage failure taxonomy.

use inkpin_primitives::ContentAddress;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures surfaced by a [`crate::StorageGateway`].
#[derive(Debug, Error)]
pub enum StorageError {
	/// Nothing is stored under the requested address.
	#[error("document {0} not found")]
	NotFound(ContentAddress),

	/// Bytes were retrieved (or a response received) but did not parse.
	#[error("malformed content: {0}")]
	MalformedContent(String),

	/// The network call failed or the service answered with an error status.
	#[error("transport error: {0}")]
	Transport(String),

	/// The pinning service refused the credential.
	#[error("credential rejected: {0}")]
	AuthRejected(String),

	/// The pinning service refused the request because of plan limits.
	#[error("pinning quota exceeded: {0}")]
	QuotaExceeded(String),

	/// The gateway endpoints are unusable.
	#[error("invalid gateway configuration: {0}")]
	Config(#[from] ConfigError),
}

impl From<reqwest::Error> for StorageError {
	fn from(error: reqwest::Error) -> Self {
		Self::Transport(error.to_string())
	}
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

use thiserror::Error;

/// Why a publish request was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishBlocker {
	/// Another publish is still outstanding.
	InFlight,
	/// The session is not editable (read-only, loading, or failed).
	NotEditable,
	/// Nothing changed since the last publish.
	Clean,
}

/// Errors returned by controller operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
	/// `activate` was called on a controller that already ran it.
	#[error("document session is already active")]
	AlreadyActive,

	/// The publish action is currently unavailable.
	#[error("publish unavailable: {0:?}")]
	PublishUnavailable(PublishBlocker),
}

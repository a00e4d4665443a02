//! Core document types: content addresses, credentials, rich-text bodies,
//! and the metadata attached to every published snapshot.

/// Content address newtype.
pub mod address;
/// Rich-text delta bodies and title derivation.
pub mod body;
/// Publish credentials parsed from `key@secret`.
pub mod credential;
/// Error types for primitive construction.
pub mod error;
/// Publish metadata chain.
pub mod metadata;

pub use address::ContentAddress;
pub use body::{DocumentBody, Insert, Op, derive_title};
pub use credential::Credential;
pub use error::{PrimitiveError, Result};
pub use metadata::{KeyValues, PublishMetadata};

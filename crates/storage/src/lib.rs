//! Content-addressed document storage.
//!
//! [`StorageGateway`] is the only storage seam the document controller sees:
//! "retrieve a body for an address" and "store a body, get back an address".
//! Two implementations ship here:
//! * [`HttpGateway`]: an IPFS retrieval gateway plus a Pinata-style pinning API
//! * [`MemoryGateway`]: an in-process store with the same addressing rules
//!
//! Both build the pinned blobs through [`PinRequest`], so the bytes that get
//! addressed are the same everywhere.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod pin;

use async_trait::async_trait;
pub use config::{ConfigError, GatewayConfig};
pub use error::{Result, StorageError};
pub use http::HttpGateway;
use inkpin_primitives::{ContentAddress, Credential, DocumentBody};
pub use memory::{MemoryGateway, Pinned};
pub use pin::PinRequest;

/// Content-addressed retrieval and publish.
///
/// Every failure is terminal for the attempt; implementations never retry.
#[async_trait]
pub trait StorageGateway: Send + Sync {
	/// Retrieves the document body stored under `address`.
	///
	/// Fails with [`StorageError::NotFound`] or [`StorageError::Transport`]
	/// when the address cannot be resolved, and with
	/// [`StorageError::MalformedContent`] when the bytes are not a body.
	async fn load(&self, address: &ContentAddress) -> Result<DocumentBody>;

	/// Pins `body` with metadata derived from it and returns its new address.
	///
	/// The metadata carries the derived title, `parent`, and the current time,
	/// so two stores of the same body normally yield different addresses.
	/// The caller guarantees a credential is present; it is passed through
	/// to the service as-is.
	async fn store(
		&self,
		body: &DocumentBody,
		credential: &Credential,
		parent: Option<&ContentAddress>,
	) -> Result<ContentAddress>;
}

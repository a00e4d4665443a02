//! In-process content-addressed store.
//!
//! Addresses are SHA-256 digests over the same blobs the HTTP gateway pins,
//! so equal bytes always map to equal addresses. Failure injection, a
//! credential allow-list and a pin quota make every error path of the
//! document lifecycle reachable without a network.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkpin_primitives::{ContentAddress, Credential, DocumentBody, PublishMetadata};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, StorageError};
use crate::pin::PinRequest;
use crate::StorageGateway;

/// A stored snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Pinned {
	/// Stored body.
	pub body: DocumentBody,
	/// Metadata pinned alongside the body; `None` for seeded documents.
	pub metadata: Option<PublishMetadata>,
}

#[derive(Default)]
struct MemoryState {
	documents: HashMap<ContentAddress, Pinned>,
	/// `None` accepts every credential.
	accepted: Option<HashSet<(String, String)>>,
	quota: Option<usize>,
	pins: usize,
	last_time: i64,
	next_load_failure: Option<StorageError>,
	next_store_failure: Option<StorageError>,
	loads: usize,
	stores: usize,
}

/// Content-addressed [`StorageGateway`] kept in memory.
#[derive(Default)]
pub struct MemoryGateway {
	state: Mutex<MemoryState>,
}

impl MemoryGateway {
	/// Creates an empty store accepting any credential.
	pub fn new() -> Self {
		Self::default()
	}

	/// Restricts publishing to the given credential (and any added later).
	pub fn with_credential(self, credential: &Credential) -> Self {
		self.state
			.lock()
			.accepted
			.get_or_insert_with(HashSet::new)
			.insert((credential.key().to_owned(), credential.secret().to_owned()));
		self
	}

	/// Limits the number of successful pins.
	pub fn with_quota(self, pins: usize) -> Self {
		self.state.lock().quota = Some(pins);
		self
	}

	/// Seeds a body without metadata and returns its address.
	pub fn insert(&self, body: DocumentBody) -> Result<ContentAddress> {
		let bytes = body
			.to_bytes()
			.map_err(|e| StorageError::MalformedContent(e.to_string()))?;
		let address = digest_address(&[&bytes]);
		self.state.lock().documents.insert(
			address.clone(),
			Pinned {
				body,
				metadata: None,
			},
		);
		Ok(address)
	}

	/// Makes the next `load` fail with `error`.
	pub fn fail_next_load(&self, error: StorageError) {
		self.state.lock().next_load_failure = Some(error);
	}

	/// Makes the next `store` fail with `error`.
	pub fn fail_next_store(&self, error: StorageError) {
		self.state.lock().next_store_failure = Some(error);
	}

	/// Returns the snapshot stored under `address`.
	pub fn get(&self, address: &ContentAddress) -> Option<Pinned> {
		self.state.lock().documents.get(address).cloned()
	}

	/// Walks the parent chain starting at `address`, newest first.
	pub fn lineage(&self, address: &ContentAddress) -> Vec<ContentAddress> {
		let state = self.state.lock();
		let mut chain = Vec::new();
		let mut cursor = Some(address.clone());
		while let Some(current) = cursor.take() {
			if chain.contains(&current) {
				break;
			}
			cursor = state
				.documents
				.get(&current)
				.and_then(|pinned| pinned.metadata.as_ref())
				.and_then(|meta| meta.keyvalues.parent.clone());
			chain.push(current);
		}
		chain
	}

	/// Number of `load` calls received.
	pub fn load_count(&self) -> usize {
		self.state.lock().loads
	}

	/// Number of `store` calls received.
	pub fn store_count(&self) -> usize {
		self.state.lock().stores
	}
}

fn digest_address(blobs: &[&[u8]]) -> ContentAddress {
	let mut hasher = Sha256::new();
	for blob in blobs {
		hasher.update((blob.len() as u64).to_be_bytes());
		hasher.update(blob);
	}
	let hex = format!("{:x}", hasher.finalize());
	match ContentAddress::new(format!("sha256-{hex}")) {
		Ok(address) => address,
		Err(error) => unreachable!("digest address is never empty: {error}"),
	}
}

#[async_trait]
impl StorageGateway for MemoryGateway {
	async fn load(&self, address: &ContentAddress) -> Result<DocumentBody> {
		let mut state = self.state.lock();
		state.loads += 1;
		if let Some(error) = state.next_load_failure.take() {
			return Err(error);
		}
		debug!(%address, "memory.load");
		state
			.documents
			.get(address)
			.map(|pinned| pinned.body.clone())
			.ok_or_else(|| StorageError::NotFound(address.clone()))
	}

	async fn store(
		&self,
		body: &DocumentBody,
		credential: &Credential,
		parent: Option<&ContentAddress>,
	) -> Result<ContentAddress> {
		let mut state = self.state.lock();
		state.stores += 1;
		if let Some(error) = state.next_store_failure.take() {
			return Err(error);
		}
		if let Some(accepted) = &state.accepted {
			let pair = (credential.key().to_owned(), credential.secret().to_owned());
			if !accepted.contains(&pair) {
				return Err(StorageError::AuthRejected(format!("unknown key {}", credential.key())));
			}
		}
		if state.quota.is_some_and(|quota| state.pins >= quota) {
			return Err(StorageError::QuotaExceeded(format!("{} pins used", state.pins)));
		}

		// Timestamps are strictly increasing so republishing yields a new address.
		let time = Utc::now().timestamp_millis().max(state.last_time + 1);
		let at = DateTime::from_timestamp_millis(time).unwrap_or_else(Utc::now);
		let request = PinRequest::new(body, parent, at)?;
		let address = digest_address(&[&request.document, request.metadata_json.as_bytes()]);

		state.last_time = time;
		state.pins += 1;
		state.documents.insert(
			address.clone(),
			Pinned {
				body: body.clone(),
				metadata: Some(request.metadata),
			},
		);
		debug!(%address, parent = ?parent.map(ContentAddress::as_str), "memory.store");
		Ok(address)
	}
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ContentAddress, DocumentBody, derive_title};

/// Metadata attached alongside the body on every publish.
///
/// `keyvalues.parent` links a snapshot to the address it was edited from,
/// forming an append-only chain. Brand-new documents have no parent and the
/// field is omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishMetadata {
	/// Derived document title.
	pub name: String,
	/// Chain link and timestamp.
	pub keyvalues: KeyValues,
}

/// Key/value section of [`PublishMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValues {
	/// Address the published snapshot was edited from.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<ContentAddress>,
	/// Publish time in Unix milliseconds.
	pub time: i64,
}

impl PublishMetadata {
	/// Computes metadata for publishing `body` at `at`.
	pub fn for_body(body: &DocumentBody, parent: Option<ContentAddress>, at: DateTime<Utc>) -> Self {
		Self {
			name: derive_title(body),
			keyvalues: KeyValues {
				parent,
				time: at.timestamp_millis(),
			},
		}
	}

	/// Returns the publish time, if it is representable.
	pub fn published_at(&self) -> Option<DateTime<Utc>> {
		DateTime::from_timestamp_millis(self.keyvalues.time)
	}
}

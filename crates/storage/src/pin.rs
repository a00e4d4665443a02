//! Pin request assembly.

use chrono::{DateTime, Utc};
use inkpin_primitives::{ContentAddress, DocumentBody, PublishMetadata};

use crate::error::{Result, StorageError};

/// The blobs submitted by one publish.
///
/// The body and its metadata are pinned together as two files under a common
/// `base/` directory. The metadata is also sent as the service's
/// `pinataMetadata` field so listings show the title and chain link.
#[derive(Debug, Clone, PartialEq)]
pub struct PinRequest {
	/// Serialized document body.
	pub document: Vec<u8>,
	/// Metadata attached to this publish.
	pub metadata: PublishMetadata,
	/// Serialized metadata, shared by the file blob and the side-channel field.
	pub metadata_json: String,
}

impl PinRequest {
	/// File name of the body blob.
	pub const DOCUMENT_PATH: &'static str = "base/document.json";
	/// File name of the metadata blob.
	pub const METADATA_PATH: &'static str = "base/meta.json";
	/// MIME type of both blobs.
	pub const MIME: &'static str = "application/json";

	/// Builds the request for publishing `body` at `at`.
	pub fn new(body: &DocumentBody, parent: Option<&ContentAddress>, at: DateTime<Utc>) -> Result<Self> {
		let metadata = PublishMetadata::for_body(body, parent.cloned(), at);
		let document = body
			.to_bytes()
			.map_err(|e| StorageError::MalformedContent(format!("document body: {e}")))?;
		let metadata_json = serde_json::to_string(&metadata)
			.map_err(|e| StorageError::MalformedContent(format!("publish metadata: {e}")))?;
		Ok(Self {
			document,
			metadata,
			metadata_json,
		})
	}
}

#[cfg(test)]
mod tests {
	use inkpin_primitives::Op;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn blobs_carry_body_and_metadata() {
		let body = DocumentBody {
			ops: vec![Op::text("Recipe\nflour\n")],
		};
		let parent = ContentAddress::new("QmOld").unwrap();
		let at = DateTime::from_timestamp_millis(42).unwrap();
		let req = PinRequest::new(&body, Some(&parent), at).unwrap();

		assert_eq!(DocumentBody::from_slice(&req.document).unwrap(), body);
		assert_eq!(req.metadata.name, "Recipe");
		assert_eq!(req.metadata.keyvalues.parent, Some(parent));
		assert_eq!(
			req.metadata_json,
			r#"{"name":"Recipe","keyvalues":{"parent":"QmOld","time":42}}"#
		);
	}
}

//! Content changes and publishing.

use std::sync::Arc;

use inkpin_primitives::ContentAddress;
use inkpin_storage::StorageError;
use tracing::{debug, info, trace, warn};

use super::DocumentController;
use crate::error::{ControllerError, PublishBlocker};
use crate::history::{History, HistoryEntry, HistoryState};
use crate::msg::{DocMsg, Dirty};
use crate::phase::{Access, Phase};
use crate::surface::Surface;

impl<S: Surface, H: History> DocumentController<S, H> {
	/// Records a content change reported by the surface.
	///
	/// Only honoured while editable. Marks the document dirty and enables
	/// the publish button; repeated changes keep both set.
	pub fn content_changed(&mut self) -> Dirty {
		match self.phase {
			Phase::Ready(Access::Editable) => {
				if self.dirty && self.publish_enabled {
					return Dirty::NONE;
				}
				self.dirty = true;
				self.publish_enabled = true;
				Dirty::CONTROLS
			}
			Phase::Publishing => {
				// Already dirty; the in-flight store may not include this edit.
				self.edited_while_publishing = true;
				Dirty::NONE
			}
			_ => {
				trace!(phase = self.phase.as_str(), "content change ignored");
				Dirty::NONE
			}
		}
	}

	/// Starts publishing the surface content.
	///
	/// Accepted only while editable, dirty, and not already publishing. The
	/// publish button is disabled before the store task is spawned; the
	/// result arrives as [`DocMsg::Published`].
	pub fn publish(&mut self) -> Result<Dirty, ControllerError> {
		if let Some(blocker) = self.publish_blocker() {
			return Err(ControllerError::PublishUnavailable(blocker));
		}
		let Some(credential) = self.credential.clone() else {
			return Err(ControllerError::PublishUnavailable(PublishBlocker::NotEditable));
		};

		self.publish_enabled = false;
		self.edited_while_publishing = false;
		self.publish_error = None;
		self.phase = Phase::Publishing;

		let body = self.surface.contents();
		let parent = self.address.clone();
		info!(
			parent = ?parent.as_ref().map(ContentAddress::as_str),
			ops = body.ops.len(),
			"document.publish"
		);

		let gateway = Arc::clone(&self.gateway);
		let tx = self.tx.clone();
		tokio::spawn(async move {
			let result = gateway.store(&body, &credential, parent.as_ref()).await;
			if tx.send(DocMsg::Published { parent, result }).is_err() {
				debug!("document session dropped before publish completed");
			}
		});
		Ok(Dirty::CONTROLS)
	}

	/// Returns why a publish would be rejected now, if it would.
	pub fn publish_blocker(&self) -> Option<PublishBlocker> {
		match self.phase {
			Phase::Publishing => Some(PublishBlocker::InFlight),
			Phase::Ready(Access::Editable) if !self.dirty => Some(PublishBlocker::Clean),
			Phase::Ready(Access::Editable) if !self.publish_enabled => Some(PublishBlocker::InFlight),
			Phase::Ready(Access::Editable) => None,
			_ => Some(PublishBlocker::NotEditable),
		}
	}

	/// Applies a finished store.
	///
	/// Success adopts the new address and rewrites the URL. Failure restores
	/// the pre-publish state: same address, content and dirty flag.
	pub(crate) fn apply_published(
		&mut self,
		parent: Option<ContentAddress>,
		result: Result<ContentAddress, StorageError>,
	) -> Dirty {
		if self.phase != Phase::Publishing {
			warn!(phase = self.phase.as_str(), "unexpected publish completion");
			return Dirty::NONE;
		}

		self.phase = Phase::Ready(Access::Editable);
		self.publish_enabled = true;
		let edited = std::mem::take(&mut self.edited_while_publishing);

		match result {
			Ok(address) => {
				info!(
					%address,
					parent = ?parent.as_ref().map(ContentAddress::as_str),
					"document.published"
				);
				self.address = Some(address.clone());
				self.dirty = edited;
				if self.replace_location(address) {
					Dirty::CONTROLS | Dirty::LOCATION
				} else {
					Dirty::CONTROLS
				}
			}
			Err(error) => {
				warn!(%error, "document.publish_failed");
				self.publish_error = Some(error);
				Dirty::CONTROLS
			}
		}
	}

	/// Rewrites the address bar to `address`, returning false if it could not.
	fn replace_location(&mut self, address: ContentAddress) -> bool {
		let Some(location) = &self.location else {
			return false;
		};
		let Some(next) = location.with_address(&address) else {
			warn!(%address, url = %location, "location has no path to rewrite");
			return false;
		};
		self.history.replace(HistoryEntry {
			state: HistoryState { address },
			url: next.url().clone(),
		});
		self.location = Some(next);
		true
	}
}

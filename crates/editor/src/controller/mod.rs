//! Document lifecycle state machine.
//!
//! # Phases
//!
//! ```text
//! Idle ──activate──► Ready(Editable | ReadOnly)              (no address)
//!   └──activate──► Loading ──ok──► Ready(Editable | ReadOnly)
//!                          └─err─► Error                     (terminal)
//! Ready(Editable) ──publish──► Publishing ──ok/err──► Ready(Editable)
//! ```
//!
//! # Invariants
//!
//! - Editable implies a credential is present.
//! - At most one store is in flight: the publish trigger is disabled before
//!   the store task is spawned and re-enabled only when its result is applied.
//! - A failed publish changes neither the address, the surface content, nor
//!   the dirty flag.
//!
//! Proofs live in `invariants.rs`.

mod load;
mod publish;

use std::sync::Arc;

use inkpin_primitives::{ContentAddress, Credential};
use inkpin_storage::{StorageError, StorageGateway};
pub use load::{LOAD_FAILED_MESSAGE, loading_text};
use tracing::trace;

use crate::error::ControllerError;
use crate::history::History;
use crate::location::Location;
use crate::msg::{Dirty, MsgSender};
use crate::phase::{Access, Phase};
use crate::surface::Surface;
use crate::trigger::Trigger;

/// Derived document state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
	/// Address of the shown snapshot; `None` for a new document.
	pub content_address: Option<ContentAddress>,
	/// Publish credential, if the visitor is authorized.
	pub credential: Option<Credential>,
	/// Whether the surface accepts input.
	pub editable: bool,
	/// Whether there are edits not yet reflected in `content_address`.
	pub dirty: bool,
}

/// Snapshot of everything a renderer shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
	/// Lifecycle phase.
	pub phase: Phase,
	/// Address of the shown snapshot.
	pub address: Option<ContentAddress>,
	/// Whether the surface accepts input.
	pub editable: bool,
	/// Whether there are unpublished edits.
	pub dirty: bool,
	/// Whether the publish button is enabled.
	pub publish_enabled: bool,
	/// Whether the bookmark indicator is lit.
	pub bookmarked: bool,
	/// URL currently shown in the address bar.
	pub url: Option<String>,
}

/// Owns a document session's identity, authorization and editability.
///
/// Constructed explicitly by the host and activated once from a URL.
/// Methods that start storage work spawn onto the ambient Tokio runtime and
/// must be called from within one.
pub struct DocumentController<S, H> {
	gateway: Arc<dyn StorageGateway>,
	surface: S,
	history: H,
	tx: MsgSender,
	location: Option<Location>,
	credential: Option<Credential>,
	address: Option<ContentAddress>,
	phase: Phase,
	dirty: bool,
	publish_enabled: bool,
	/// Content changes seen while a store was in flight.
	edited_while_publishing: bool,
	publish_error: Option<StorageError>,
}

impl<S: Surface, H: History> DocumentController<S, H> {
	/// Creates an idle controller. Completions are sent on `tx`.
	pub fn new(gateway: Arc<dyn StorageGateway>, surface: S, history: H, tx: MsgSender) -> Self {
		Self {
			gateway,
			surface,
			history,
			tx,
			location: None,
			credential: None,
			address: None,
			phase: Phase::Idle,
			dirty: false,
			publish_enabled: false,
			edited_while_publishing: false,
			publish_error: None,
		}
	}

	/// Routes a user trigger to its handler.
	///
	/// A rejected publish is logged and reported as no change; call
	/// [`Self::publish`] directly to observe the reason.
	pub fn dispatch(&mut self, trigger: Trigger) -> Dirty {
		match trigger {
			Trigger::ContentChanged => self.content_changed(),
			Trigger::BookmarkClicked => self.bookmark_clicked(),
			Trigger::PublishClicked => match self.publish() {
				Ok(dirty) => dirty,
				Err(error) => {
					trace!(%error, "document.publish.rejected");
					Dirty::NONE
				}
			},
		}
	}

	/// Returns the current phase.
	pub fn phase(&self) -> &Phase {
		&self.phase
	}

	/// Returns the address of the shown snapshot.
	pub fn address(&self) -> Option<&ContentAddress> {
		self.address.as_ref()
	}

	/// Returns the current location, once activated.
	pub fn location(&self) -> Option<&Location> {
		self.location.as_ref()
	}

	/// Returns true if the surface accepts input.
	pub fn is_editable(&self) -> bool {
		matches!(self.phase, Phase::Ready(Access::Editable) | Phase::Publishing)
	}

	/// Returns true if there are unpublished edits.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Returns true if the publish button is enabled.
	pub fn is_publish_enabled(&self) -> bool {
		self.publish_enabled
	}

	/// Returns true if a publish request would be accepted now.
	pub fn can_publish(&self) -> bool {
		self.publish_blocker().is_none()
	}

	/// Returns the error from the most recent publish, if it failed.
	pub fn publish_error(&self) -> Option<&StorageError> {
		self.publish_error.as_ref()
	}

	/// Returns true if the document is editable and has a published address.
	pub fn is_bookmarked(&self) -> bool {
		self.is_editable() && self.address.is_some()
	}

	/// Returns true while a load or store is outstanding.
	pub fn is_busy(&self) -> bool {
		matches!(self.phase, Phase::Loading { .. } | Phase::Publishing)
	}

	/// Returns the derived document state.
	pub fn state(&self) -> DocumentState {
		DocumentState {
			content_address: self.address.clone(),
			credential: self.credential.clone(),
			editable: self.is_editable(),
			dirty: self.dirty,
		}
	}

	/// Returns a render snapshot.
	pub fn view(&self) -> DocumentView {
		DocumentView {
			phase: self.phase.clone(),
			address: self.address.clone(),
			editable: self.is_editable(),
			dirty: self.dirty,
			publish_enabled: self.publish_enabled,
			bookmarked: self.is_bookmarked(),
			url: self.location.as_ref().map(ToString::to_string),
		}
	}

	/// Returns the editing surface.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Returns the editing surface mutably, for hosts forwarding user input.
	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	/// Returns the session history.
	pub fn history(&self) -> &H {
		&self.history
	}

	/// Enables editing and focuses the surface.
	///
	/// Without a credential this falls back to [`Self::enter_readonly`].
	fn enter_editable(&mut self) {
		if self.credential.is_none() {
			self.enter_readonly();
			return;
		}
		self.surface.set_enabled(true);
		self.surface.focus();
		self.phase = Phase::Ready(Access::Editable);
	}

	/// Disables editing and blurs the surface.
	fn enter_readonly(&mut self) {
		self.surface.set_enabled(false);
		self.surface.blur();
		self.phase = Phase::Ready(Access::ReadOnly);
	}

	/// Enters the editable or read-only phase according to the credential.
	fn enter_ready(&mut self) {
		if self.credential.is_some() {
			self.enter_editable();
		} else {
			self.enter_readonly();
		}
	}

	fn bookmark_clicked(&mut self) -> Dirty {
		trace!(bookmarked = self.is_bookmarked(), "document.bookmark");
		Dirty::CONTROLS
	}

	/// Fails with [`ControllerError::AlreadyActive`] unless idle.
	fn ensure_idle(&self) -> Result<(), ControllerError> {
		match self.phase {
			Phase::Idle => Ok(()),
			_ => Err(ControllerError::AlreadyActive),
		}
	}
}

#[cfg(test)]
mod invariants;

//! Activation and the single load it may trigger.

use std::sync::Arc;

use inkpin_primitives::{ContentAddress, DocumentBody};
use inkpin_storage::StorageError;
use tracing::{debug, info, warn};

use super::DocumentController;
use crate::error::ControllerError;
use crate::history::History;
use crate::location::Location;
use crate::msg::{DocMsg, Dirty};
use crate::phase::Phase;
use crate::surface::Surface;

/// Text shown in place of a document that failed to load.
pub const LOAD_FAILED_MESSAGE: &str = "Oops, something went wrong. Failed to load the document!";

/// Placeholder shown while the body stored under `address` is fetched.
pub fn loading_text(address: &ContentAddress) -> String {
	format!("Loading {address}…")
}

impl<S: Surface, H: History> DocumentController<S, H> {
	/// Derives the session from `location`.
	///
	/// Without an address the document is new and immediately ready. With
	/// one, the surface is disabled behind a loading placeholder and a load
	/// task is spawned; its result arrives as [`DocMsg::Loaded`]. Runs at
	/// most once per controller.
	pub fn activate(&mut self, location: Location) -> Result<Dirty, ControllerError> {
		self.ensure_idle()?;

		self.credential = location.credential();
		let address = location.address();
		info!(
			url = %location,
			address = ?address.as_ref().map(ContentAddress::as_str),
			authorized = self.credential.is_some(),
			"document.activate"
		);
		self.location = Some(location);

		match address {
			None => self.enter_ready(),
			Some(address) => self.begin_load(address),
		}
		Ok(Dirty::CONTENT | Dirty::CONTROLS)
	}

	fn begin_load(&mut self, address: ContentAddress) {
		self.surface.set_enabled(false);
		self.surface.blur();
		self.surface.set_text(&loading_text(&address));
		self.address = Some(address.clone());
		self.phase = Phase::Loading {
			address: address.clone(),
		};

		let gateway = Arc::clone(&self.gateway);
		let tx = self.tx.clone();
		tokio::spawn(async move {
			let result = gateway.load(&address).await;
			if tx.send(DocMsg::Loaded { address, result }).is_err() {
				debug!("document session dropped before load completed");
			}
		});
	}

	/// Applies a finished load.
	///
	/// Results that do not match the pending load are dropped.
	pub(crate) fn apply_loaded(
		&mut self,
		address: ContentAddress,
		result: Result<DocumentBody, StorageError>,
	) -> Dirty {
		let Phase::Loading { address: pending } = &self.phase else {
			warn!(%address, phase = self.phase.as_str(), "unexpected load completion");
			return Dirty::NONE;
		};
		if *pending != address {
			warn!(%address, pending = %pending, "load completion for another address");
			return Dirty::NONE;
		}

		match result {
			Ok(body) => {
				info!(%address, ops = body.ops.len(), "document.loaded");
				self.surface.set_contents(body);
				self.enter_ready();
			}
			Err(error) => {
				warn!(%address, %error, "document.load_failed");
				self.enter_error();
			}
		}
		Dirty::CONTENT | Dirty::CONTROLS
	}

	fn enter_error(&mut self) {
		self.surface.set_text(LOAD_FAILED_MESSAGE);
		self.surface.set_enabled(false);
		self.surface.blur();
		self.phase = Phase::Error;
	}
}

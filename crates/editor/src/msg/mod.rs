//! Completion messages from the two suspension points.
//!
//! Spawned load/store tasks send [`DocMsg`] variants back to the thread that
//! owns the controller. [`crate::Session`] drains them and applies each one,
//! aggregating [`Dirty`] flags.

mod dirty;

pub use dirty::Dirty;
use inkpin_primitives::{ContentAddress, DocumentBody};
use inkpin_storage::StorageError;
use tokio::sync::mpsc;

use crate::controller::DocumentController;
use crate::history::History;
use crate::surface::Surface;

/// Channel sender for spawned storage tasks.
pub type MsgSender = mpsc::UnboundedSender<DocMsg>;

/// Channel receiver for the session pump.
pub type MsgReceiver = mpsc::UnboundedReceiver<DocMsg>;

/// Creates a new message channel pair.
pub fn channel() -> (MsgSender, MsgReceiver) {
	mpsc::unbounded_channel()
}

/// Result of a spawned storage operation.
#[derive(Debug)]
pub enum DocMsg {
	/// The activation load finished.
	Loaded {
		address: ContentAddress,
		result: Result<DocumentBody, StorageError>,
	},
	/// A publish store finished.
	Published {
		parent: Option<ContentAddress>,
		result: Result<ContentAddress, StorageError>,
	},
}

impl DocMsg {
	/// Applies this message to the controller, returning dirty flags.
	pub fn apply<S: Surface, H: History>(self, controller: &mut DocumentController<S, H>) -> Dirty {
		match self {
			Self::Loaded { address, result } => controller.apply_loaded(address, result),
			Self::Published { parent, result } => controller.apply_published(parent, result),
		}
	}
}

//! Message pump pairing a controller with its completion channel.

use std::sync::Arc;

use inkpin_storage::StorageGateway;
use tokio::sync::mpsc::error::TryRecvError;

use crate::controller::DocumentController;
use crate::history::History;
use crate::msg::{self, Dirty, MsgReceiver};
use crate::surface::Surface;

/// A document session: one controller and the receiver its tasks report to.
///
/// All state changes happen on the task that owns the session; spawned
/// storage work only ever sends messages.
pub struct Session<S, H> {
	controller: DocumentController<S, H>,
	rx: MsgReceiver,
}

impl<S: Surface, H: History> Session<S, H> {
	/// Creates a session with an idle controller.
	pub fn new(gateway: Arc<dyn StorageGateway>, surface: S, history: H) -> Self {
		let (tx, rx) = msg::channel();
		Self {
			controller: DocumentController::new(gateway, surface, history, tx),
			rx,
		}
	}

	/// Returns the controller.
	pub fn controller(&self) -> &DocumentController<S, H> {
		&self.controller
	}

	/// Returns the controller mutably.
	pub fn controller_mut(&mut self) -> &mut DocumentController<S, H> {
		&mut self.controller
	}

	/// Applies every message that is already queued, without waiting.
	pub fn drain(&mut self) -> Dirty {
		let mut dirty = Dirty::NONE;
		loop {
			match self.rx.try_recv() {
				Ok(msg) => dirty |= msg.apply(&mut self.controller),
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => return dirty,
			}
		}
	}

	/// Waits for the next message and applies it.
	///
	/// Returns `None` if every sender is gone.
	pub async fn pump(&mut self) -> Option<Dirty> {
		let msg = self.rx.recv().await?;
		Some(msg.apply(&mut self.controller))
	}

	/// Applies messages until no load or store is outstanding.
	pub async fn settle(&mut self) -> Dirty {
		let mut dirty = Dirty::NONE;
		while self.controller.is_busy() {
			match self.pump().await {
				Some(flags) => dirty |= flags,
				None => break,
			}
		}
		dirty
	}

	/// Consumes the session, returning the controller.
	pub fn into_controller(self) -> DocumentController<S, H> {
		self.controller
	}
}

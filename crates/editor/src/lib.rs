//! Document lifecycle engine.
//!
//! A document's identity (content address), authorization (credential),
//! editability and dirty/published status are all derived from a shareable
//! URL and kept in sync with it. The [`DocumentController`] owns that state
//! and drives an external [`Surface`] (the rich-text widget) and [`History`]
//! (the address bar).
//!
//! # Suspension points
//!
//! Exactly two operations leave the controller's thread: loading a body at
//! activation and storing one on publish. Both run as spawned tasks whose
//! results return as [`DocMsg`] values; [`Session`] drains them and applies
//! each to the controller, aggregating [`Dirty`] flags.
//!
//! ```text
//! activate ──► load task ─┐
//!                         ├──► DocMsg ──► Session::pump() ──► controller state
//! publish ───► store task ┘
//! ```

pub mod controller;
pub mod error;
pub mod history;
pub mod location;
pub mod msg;
pub mod phase;
pub mod session;
pub mod surface;
pub mod trigger;

pub use controller::{DocumentController, DocumentState, DocumentView, LOAD_FAILED_MESSAGE, loading_text};
pub use error::{ControllerError, PublishBlocker};
pub use history::{History, HistoryEntry, HistoryState, MemoryHistory};
pub use location::Location;
pub use msg::{DocMsg, Dirty, MsgReceiver, MsgSender};
pub use phase::{Access, Phase};
pub use session::Session;
pub use surface::{MemorySurface, Surface};
pub use trigger::Trigger;

//! Non-navigating address bar updates.

use inkpin_primitives::ContentAddress;
use url::Url;

/// State object recorded with a history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
	/// Address the entry points at.
	pub address: ContentAddress,
}

/// A history entry written after a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
	/// Associated state, observable on back/forward navigation.
	pub state: HistoryState,
	/// URL shown in the address bar.
	pub url: Url,
}

/// The host's session history.
///
/// `replace` must update the visible URL without reloading the page or
/// re-running activation.
pub trait History {
	/// Replaces the current entry.
	fn replace(&mut self, entry: HistoryEntry);
}

/// History that keeps every replacement in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryHistory {
	entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
	/// Creates an empty history.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the most recent entry.
	pub fn current(&self) -> Option<&HistoryEntry> {
		self.entries.last()
	}

	/// Returns every replacement, oldest first.
	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}
}

impl History for MemoryHistory {
	fn replace(&mut self, entry: HistoryEntry) {
		self.entries.push(entry);
	}
}

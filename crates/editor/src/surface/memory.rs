use inkpin_primitives::DocumentBody;

use super::Surface;

/// Headless surface holding its body in memory.
///
/// Used by the terminal host and by tests. `edit` stands in for user typing:
/// it only succeeds while the surface is enabled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
	body: DocumentBody,
	enabled: bool,
	focused: bool,
}

impl MemorySurface {
	/// Creates an empty, disabled surface.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the body as the user would, returning false when disabled.
	///
	/// The caller is responsible for dispatching the content-change trigger.
	pub fn edit(&mut self, body: DocumentBody) -> bool {
		if !self.enabled {
			return false;
		}
		self.body = body;
		true
	}

	/// Returns true if the surface holds input focus.
	pub fn is_focused(&self) -> bool {
		self.focused
	}

	/// Returns the current body without cloning.
	pub fn body(&self) -> &DocumentBody {
		&self.body
	}
}

impl Surface for MemorySurface {
	fn contents(&self) -> DocumentBody {
		self.body.clone()
	}

	fn set_contents(&mut self, body: DocumentBody) {
		self.body = body;
	}

	fn set_text(&mut self, text: &str) {
		self.body = DocumentBody::from_text(text);
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn focus(&mut self) {
		self.focused = true;
	}

	fn blur(&mut self) {
		self.focused = false;
	}
}

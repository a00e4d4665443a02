//! Contract with the rich-text editing widget.
//!
//! The surface is the sole owner of the live [`DocumentBody`]; the controller
//! only replaces it after a load and reads it on publish. Content-change
//! notifications travel the other way as [`crate::Trigger::ContentChanged`].
//! Reads must reflect the latest committed keystrokes.

mod memory;

use inkpin_primitives::DocumentBody;
pub use memory::MemorySurface;

/// Rich-text editing widget driven by the controller.
pub trait Surface {
	/// Returns the current document body.
	fn contents(&self) -> DocumentBody;

	/// Replaces the document body.
	fn set_contents(&mut self, body: DocumentBody);

	/// Replaces the content with plain placeholder text.
	fn set_text(&mut self, text: &str);

	/// Enables or disables user editing.
	fn set_enabled(&mut self, enabled: bool);

	/// Returns true if user editing is enabled.
	fn is_enabled(&self) -> bool;

	/// Moves input focus into the surface.
	fn focus(&mut self);

	/// Removes input focus from the surface.
	fn blur(&mut self);
}

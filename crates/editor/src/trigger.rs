/// User-facing triggers routed to the controller.
///
/// Hosts translate widget events into these and call
/// [`crate::DocumentController::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
	/// The surface reported a content change.
	ContentChanged,
	/// The bookmark indicator was clicked.
	BookmarkClicked,
	/// The publish button was clicked.
	PublishClicked,
}

use inkpin_primitives::ContentAddress;

/// Whether the visitor may edit the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
	/// A valid credential is present; the surface accepts input.
	Editable,
	/// No credential; the surface is read-only.
	ReadOnly,
}

/// Lifecycle phase of a document session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
	/// Constructed but not yet activated.
	Idle,
	/// Waiting for the body stored under `address`.
	Loading {
		/// Address being loaded.
		address: ContentAddress,
	},
	/// Content is shown and may be edited according to `Access`.
	Ready(Access),
	/// A store is in flight. The surface stays editable.
	Publishing,
	/// The load failed. Terminal for this session.
	Error,
}

impl Phase {
	/// Short label for logs.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Loading { .. } => "loading",
			Self::Ready(Access::Editable) => "editable",
			Self::Ready(Access::ReadOnly) => "readonly",
			Self::Publishing => "publishing",
			Self::Error => "error",
		}
	}
}

use bitflags::bitflags;

bitflags! {
	/// What a transition changed, so hosts know what to re-render.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct Dirty: u8 {
		/// Surface content or its enabled state changed.
		const CONTENT = 1 << 0;
		/// Publish button or bookmark indicator changed.
		const CONTROLS = 1 << 1;
		/// The address bar changed.
		const LOCATION = 1 << 2;
	}
}

impl Dirty {
	/// Nothing to re-render.
	pub const NONE: Self = Self::empty();
	/// Everything needs re-rendering.
	pub const FULL: Self = Self::all();

	/// Returns true if anything needs re-rendering.
	pub fn needs_redraw(self) -> bool {
		!self.is_empty()
	}
}

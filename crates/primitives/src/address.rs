use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PrimitiveError, Result};

/// Identifier of an immutable stored document snapshot.
///
/// The storage network derives it from the bytes it names, so the core
/// treats it as opaque. Construction only checks that it can occupy a single
/// URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl ContentAddress {
	/// Creates an address from its textual form.
	pub fn new(raw: impl Into<String>) -> Result<Self> {
		let raw = raw.into();
		if raw.is_empty() {
			return Err(PrimitiveError::EmptyAddress);
		}
		if raw.contains('/') {
			return Err(PrimitiveError::AddressSeparator(raw));
		}
		Ok(Self(raw))
	}

	/// Returns the textual form.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ContentAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for ContentAddress {
	type Err = PrimitiveError;

	fn from_str(s: &str) -> Result<Self> {
		Self::new(s)
	}
}

impl AsRef<str> for ContentAddress {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl<'de> Deserialize<'de> for ContentAddress {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Self::new(raw).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests;

//! The shareable URL a document session is derived from.
//!
//! Layout: `/<address>?auth=<key>@<secret>#fragment`. The last non-empty path
//! segment is the content address; an empty path means a new document.

use std::fmt;
use std::str::FromStr;

use inkpin_primitives::{ContentAddress, Credential};
use url::Url;

/// Query parameter carrying the publish credential.
pub const AUTH_PARAM: &str = "auth";

/// A parsed document URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	url: Url,
}

impl Location {
	/// Wraps an already parsed URL.
	pub fn new(url: Url) -> Self {
		Self { url }
	}

	/// Parses a URL string.
	pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
		Url::parse(raw).map(Self::new)
	}

	/// Returns the underlying URL.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Returns the content address named by the path, if any.
	///
	/// The segment is percent-decoded; segments that do not decode to a valid
	/// address are treated as absent.
	pub fn address(&self) -> Option<ContentAddress> {
		let segment = self.url.path_segments()?.rev().find(|s| !s.is_empty())?;
		let decoded = urlencoding::decode(segment).ok()?;
		ContentAddress::new(decoded.into_owned()).ok()
	}

	/// Returns the credential from the `auth` query parameter.
	///
	/// Missing, repeated-separator, or half-empty values all yield `None`.
	pub fn credential(&self) -> Option<Credential> {
		self.url
			.query_pairs()
			.find(|(name, _)| name == AUTH_PARAM)
			.and_then(|(_, value)| Credential::parse(&value))
	}

	/// Returns this location with its path replaced by `/<address>`.
	///
	/// Query string and fragment are carried over verbatim. Returns `None` for
	/// URLs without a hierarchical path (`data:`, `mailto:`).
	pub fn with_address(&self, address: &ContentAddress) -> Option<Self> {
		let mut url = self.url.clone();
		url.path_segments_mut().ok()?.clear().push(address.as_str());
		Some(Self { url })
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.url.as_str())
	}
}

impl FromStr for Location {
	type Err = url::ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

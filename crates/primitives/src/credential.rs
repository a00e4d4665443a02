use std::fmt;

/// Key/secret pair authorizing publish operations.
///
/// A value of this type is always complete: both halves are non-empty.
/// Visitors without valid credentials hold `Option::<Credential>::None`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
	key: String,
	secret: String,
}

impl Credential {
	/// Builds a credential from its halves, or `None` if either is empty.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Option<Self> {
		let key = key.into();
		let secret = secret.into();
		if key.is_empty() || secret.is_empty() {
			return None;
		}
		Some(Self { key, secret })
	}

	/// Parses the `<key>@<secret>` form.
	///
	/// Exactly one `@` with non-empty text on both sides is accepted.
	pub fn parse(raw: &str) -> Option<Self> {
		let (key, secret) = raw.split_once('@')?;
		if secret.contains('@') {
			return None;
		}
		Self::new(key, secret)
	}

	/// Returns the API key half.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the secret half.
	pub fn secret(&self) -> &str {
		&self.secret
	}

	/// Formats the credential back into `<key>@<secret>`.
	pub fn to_param(&self) -> String {
		format!("{}@{}", self.key, self.secret)
	}
}

impl fmt::Debug for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credential")
			.field("key", &self.key)
			.field("secret", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests;

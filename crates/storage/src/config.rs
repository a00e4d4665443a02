//! Gateway endpoints and transport settings.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Public IPFS retrieval gateway.
pub const DEFAULT_GATEWAY_URL: &str = "https://ipfs.io";
/// Pinata file pinning endpoint.
pub const DEFAULT_PINNING_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

/// Errors in gateway configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// An endpoint is not a valid URL.
	#[error("invalid {field} URL {value:?}: {error}")]
	InvalidUrl {
		/// Configuration field holding the URL.
		field: &'static str,
		/// The rejected value.
		value: String,
		/// Parser error.
		error: url::ParseError,
	},

	/// An endpoint uses a scheme other than http or https.
	#[error("{field} must be an http(s) URL, got {url}")]
	UnsupportedScheme {
		/// Configuration field holding the URL.
		field: &'static str,
		/// The rejected URL.
		url: Url,
	},
}

/// Endpoints used by [`crate::HttpGateway`].
///
/// Deserializes from the `[storage]` table of the host configuration file;
/// omitted keys fall back to the public defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
	/// Base URL of the retrieval gateway; documents live under `/ipfs/<address>/`.
	pub gateway_url: Url,
	/// Pinning endpoint accepting multipart file uploads.
	pub pinning_url: Url,
	/// Per-request timeout enforced by the HTTP client. `None` waits indefinitely.
	pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
	fn default() -> Self {
		Self {
			gateway_url: parse_default(DEFAULT_GATEWAY_URL),
			pinning_url: parse_default(DEFAULT_PINNING_URL),
			timeout_secs: Some(60),
		}
	}
}

fn parse_default(raw: &str) -> Url {
	match Url::parse(raw) {
		Ok(url) => url,
		Err(error) => unreachable!("built-in URL {raw} failed to parse: {error}"),
	}
}

impl GatewayConfig {
	/// Replaces the retrieval gateway URL.
	pub fn with_gateway_url(mut self, raw: &str) -> Result<Self, ConfigError> {
		self.gateway_url = parse_endpoint("gateway_url", raw)?;
		Ok(self)
	}

	/// Replaces the pinning endpoint URL.
	pub fn with_pinning_url(mut self, raw: &str) -> Result<Self, ConfigError> {
		self.pinning_url = parse_endpoint("pinning_url", raw)?;
		Ok(self)
	}

	/// Checks that both endpoints are http(s) URLs.
	pub fn validate(&self) -> Result<(), ConfigError> {
		check_scheme("gateway_url", &self.gateway_url)?;
		check_scheme("pinning_url", &self.pinning_url)
	}

	/// Returns the configured request timeout.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout_secs.map(Duration::from_secs)
	}
}

fn parse_endpoint(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|error| ConfigError::InvalidUrl {
		field,
		value: raw.to_owned(),
		error,
	})?;
	check_scheme(field, &url)?;
	Ok(url)
}

fn check_scheme(field: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { field, url: url.clone() }),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_point_at_public_services() {
		let config = GatewayConfig::default();
		assert_eq!(config.gateway_url.as_str(), "https://ipfs.io/");
		assert_eq!(config.pinning_url.as_str(), DEFAULT_PINNING_URL);
		assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
		config.validate().unwrap();
	}

	#[test]
	fn partial_table_keeps_defaults() {
		let config: GatewayConfig = toml::from_str(r#"gateway_url = "http://127.0.0.1:8080""#).unwrap();
		assert_eq!(config.gateway_url.as_str(), "http://127.0.0.1:8080/");
		assert_eq!(config.pinning_url.as_str(), DEFAULT_PINNING_URL);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert!(toml::from_str::<GatewayConfig>("gatway_url = \"http://x\"").is_err());
	}

	#[test]
	fn rejects_non_http_endpoints() {
		let err = GatewayConfig::default().with_pinning_url("ftp://pins.example").unwrap_err();
		assert!(matches!(err, ConfigError::UnsupportedScheme { field: "pinning_url", .. }));

		let err = GatewayConfig::default().with_gateway_url("not a url").unwrap_err();
		assert!(matches!(err, ConfigError::InvalidUrl { field: "gateway_url", .. }));
	}
}

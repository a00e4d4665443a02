//! Host configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use inkpin_storage::GatewayConfig;
use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Gateway endpoints.
	pub storage: GatewayConfig,
}

impl Config {
	/// Returns `<config dir>/inkpin/config.toml`, if the platform has one.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("inkpin").join("config.toml"))
	}

	/// Parses a config from TOML text.
	pub fn parse(text: &str) -> Result<Self> {
		let config: Self = toml::from_str(text)?;
		config.storage.validate()?;
		Ok(config)
	}

	/// Reads the config at `path`.
	///
	/// An explicitly given path must exist. The default path is optional and
	/// falls back to built-in defaults when missing.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let (path, required) = match path {
			Some(path) => (path.to_path_buf(), true),
			None => match Self::default_path() {
				Some(path) => (path, false),
				None => return Ok(Self::default()),
			},
		};

		if !required && !path.exists() {
			debug!(path = %path.display(), "config.missing");
			return Ok(Self::default());
		}

		let text = std::fs::read_to_string(&path)
			.with_context(|| format!("failed to read config {}", path.display()))?;
		let config =
			Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))?;
		debug!(path = %path.display(), "config.loaded");
		Ok(config)
	}

	/// Applies command-line overrides.
	pub fn with_overrides(mut self, cli: &Cli) -> Result<Self> {
		if let Some(url) = &cli.gateway_url {
			self.storage = self.storage.with_gateway_url(url).context("--gateway-url")?;
		}
		if let Some(url) = &cli.pinning_url {
			self.storage = self.storage.with_pinning_url(url).context("--pinning-url")?;
		}
		Ok(self)
	}
}

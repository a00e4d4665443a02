//! inkpin command-line host.
//!
//! Drives a document session headlessly against the configured gateways:
//! - `open`: load a document URL and print it
//! - `publish`: replace a document's body and pin it as a new snapshot
//! - `title`: derive a title from a body

mod cli;
mod commands;
mod config;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use inkpin_storage::{HttpGateway, StorageGateway};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	logging::init(cli.verbose, cli.log_json);

	let config = Config::load(cli.config.as_deref())?.with_overrides(&cli)?;
	debug!(
		gateway = %config.storage.gateway_url,
		pinning = %config.storage.pinning_url,
		"term.config"
	);

	let mut stdout = std::io::stdout().lock();
	match cli.command {
		Command::Title { input } => {
			let body = commands::read_body(&input)?;
			commands::title(&body, &mut stdout)?;
			Ok(ExitCode::SUCCESS)
		}
		Command::Open { url } => commands::open(gateway(&config)?, url, &mut stdout).await,
		Command::Publish { url, body } => {
			let body = commands::read_body(&body)?;
			commands::publish(gateway(&config)?, url, body, &mut stdout).await
		}
	}
}

fn gateway(config: &Config) -> anyhow::Result<Arc<dyn StorageGateway>> {
	Ok(Arc::new(HttpGateway::new(&config.storage)?))
}

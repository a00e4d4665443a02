//! Subcommand implementations.
//!
//! Each command drives a headless [`Session`] the way a page would: activate
//! from the URL, wait for the load, then act on the surface.

use std::io::{Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use inkpin_editor::{
	DocumentView, LOAD_FAILED_MESSAGE, Location, MemoryHistory, MemorySurface, Phase, Session, Trigger,
};
use inkpin_primitives::{DocumentBody, derive_title};
use inkpin_storage::StorageGateway;
use tracing::info;

use crate::cli::Input;

type TermSession = Session<MemorySurface, MemoryHistory>;

/// Reads a delta JSON body from a file or stdin.
pub fn read_body(input: &Input) -> Result<DocumentBody> {
	let bytes = match input {
		Input::Stdin => {
			let mut buf = Vec::new();
			std::io::stdin().read_to_end(&mut buf).context("failed to read stdin")?;
			buf
		}
		Input::File(path) => {
			std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
		}
	};
	DocumentBody::from_slice(&bytes).with_context(|| format!("{input} is not a document body"))
}

/// Activates a session on `location` and waits for the load to finish.
async fn activate(gateway: Arc<dyn StorageGateway>, location: Location) -> Result<TermSession> {
	let mut session = Session::new(gateway, MemorySurface::new(), MemoryHistory::new());
	session.controller_mut().activate(location)?;
	session.settle().await;
	Ok(session)
}

/// `inkpin open`: prints the derived state, title and body.
pub async fn open(
	gateway: Arc<dyn StorageGateway>,
	location: Location,
	out: &mut impl Write,
) -> Result<ExitCode> {
	let session = activate(gateway, location).await?;
	let controller = session.controller();
	if controller.phase() == &Phase::Error {
		writeln!(out, "{LOAD_FAILED_MESSAGE}")?;
		return Ok(ExitCode::FAILURE);
	}

	let body = controller.surface().body();
	write_view(out, &controller.view())?;
	writeln!(out, "title: {}", derive_title(body))?;
	writeln!(out)?;
	serde_json::to_writer_pretty(&mut *out, body)?;
	writeln!(out)?;
	Ok(ExitCode::SUCCESS)
}

/// `inkpin publish`: replaces the body, publishes and prints the new URL.
pub async fn publish(
	gateway: Arc<dyn StorageGateway>,
	location: Location,
	body: DocumentBody,
	out: &mut impl Write,
) -> Result<ExitCode> {
	let mut session = activate(gateway, location).await?;
	let controller = session.controller_mut();
	match controller.phase() {
		Phase::Error => bail!(LOAD_FAILED_MESSAGE),
		_ if !controller.is_editable() => {
			bail!("document is read-only; the URL needs an auth=<key>@<secret> parameter")
		}
		_ => {}
	}

	controller.surface_mut().edit(body);
	controller.dispatch(Trigger::ContentChanged);
	controller.publish()?;
	session.settle().await;

	let controller = session.controller();
	if let Some(error) = controller.publish_error() {
		bail!("publish failed: {error}");
	}
	let view = controller.view();
	info!(url = ?view.url, "term.published");
	if let Some(url) = &view.url {
		writeln!(out, "{url}")?;
	}
	Ok(ExitCode::SUCCESS)
}

/// `inkpin title`: prints the title derived from `body`.
pub fn title(body: &DocumentBody, out: &mut impl Write) -> Result<()> {
	writeln!(out, "{}", derive_title(body))?;
	Ok(())
}

fn write_view(out: &mut impl Write, view: &DocumentView) -> std::io::Result<()> {
	if let Some(url) = &view.url {
		writeln!(out, "url: {url}")?;
	}
	match &view.address {
		Some(address) => writeln!(out, "address: {address}")?,
		None => writeln!(out, "address: (new document)")?,
	}
	writeln!(out, "phase: {}", view.phase.as_str())?;
	writeln!(out, "editable: {}", view.editable)?;
	writeln!(out, "bookmarked: {}", view.bookmarked)
}

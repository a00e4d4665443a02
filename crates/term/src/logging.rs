//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects `debug` over `info`.
pub fn init(verbose: bool, json: bool) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true);

	if json {
		builder.json().init();
	} else {
		builder.init();
	}
}

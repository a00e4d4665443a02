//! CLI schema and parsing helpers for the inkpin binary.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use inkpin_editor::Location;

/// Where a document body is read from.
///
/// `-` means standard input; anything else is a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
	/// Read from standard input.
	Stdin,
	/// Read from a file.
	File(PathBuf),
}

impl FromStr for Input {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"-" => Self::Stdin,
			path => Self::File(PathBuf::from(path)),
		})
	}
}

impl fmt::Display for Input {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Stdin => f.write_str("<stdin>"),
			Self::File(path) => write!(f, "{}", path.display()),
		}
	}
}

#[derive(Parser, Debug)]
#[command(name = "inkpin")]
#[command(about = "Open and publish content-addressed rich-text documents")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to <config dir>/inkpin/config.toml)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Retrieval gateway base URL
	#[arg(long, global = true, value_name = "URL")]
	pub gateway_url: Option<String>,

	/// Pinning endpoint URL
	#[arg(long, global = true, value_name = "URL")]
	pub pinning_url: Option<String>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Emit logs as JSON lines
	#[arg(long, global = true)]
	pub log_json: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Load a document URL and print its state and body
	Open {
		/// Document URL, e.g. https://host/<address>?auth=<key>@<secret>
		url: Location,
	},
	/// Replace a document's body and publish it as a new snapshot
	Publish {
		/// Document URL carrying the publish credential
		url: Location,

		/// Body as delta JSON (`-` for stdin)
		#[arg(long, value_name = "FILE")]
		body: Input,
	},
	/// Print the title derived from a body
	Title {
		/// Body as delta JSON (`-` for stdin)
		#[arg(value_name = "FILE", default_value = "-")]
		input: Input,
	},
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Formatting attributes carried by an operation (`bold`, `header`, ...).
pub type Attributes = Map<String, Value>;

/// Structured rich-text content: a sequence of delta operations.
///
/// Serialized as `{"ops": [...]}`. The core only needs to serialize it for
/// storage and derive a title from it; everything else is the editing
/// surface's business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentBody {
	/// Operations in document order.
	pub ops: Vec<Op>,
}

/// A single delta operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Op {
	/// Inserts text or an embed.
	Insert {
		/// Inserted content.
		insert: Insert,
		/// Formatting applied to the inserted content.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		attributes: Option<Attributes>,
	},
	/// Keeps `retain` characters, optionally reformatting them.
	Retain {
		/// Number of characters kept.
		retain: u64,
		/// Formatting changes applied to the kept range.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		attributes: Option<Attributes>,
	},
	/// Removes `delete` characters.
	Delete {
		/// Number of characters removed.
		delete: u64,
	},
}

/// Payload of an insert operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
	/// Plain text, possibly spanning several lines.
	Text(String),
	/// Non-text embed such as `{"image": "https://..."}`.
	Embed(Map<String, Value>),
}

impl Op {
	/// Creates an unformatted text insert.
	pub fn text(text: impl Into<String>) -> Self {
		Self::Insert {
			insert: Insert::Text(text.into()),
			attributes: None,
		}
	}

	/// Creates an embed insert with a single `kind: value` entry.
	pub fn embed(kind: impl Into<String>, value: impl Into<Value>) -> Self {
		let mut embed = Map::new();
		embed.insert(kind.into(), value.into());
		Self::Insert {
			insert: Insert::Embed(embed),
			attributes: None,
		}
	}

	/// Returns the inserted text, if this is a text insert.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Insert {
				insert: Insert::Text(text),
				..
			} => Some(text),
			_ => None,
		}
	}
}

impl DocumentBody {
	/// Creates an empty body.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a body holding a single unformatted text insert.
	///
	/// Rich-text bodies always end in a newline; one is appended if missing.
	pub fn from_text(text: &str) -> Self {
		let mut text = text.to_owned();
		if !text.ends_with('\n') {
			text.push('\n');
		}
		Self {
			ops: vec![Op::text(text)],
		}
	}

	/// Returns true if the body holds no operations.
	pub fn is_empty(&self) -> bool {
		self.ops.is_empty()
	}

	/// Concatenates every text insert; embeds contribute nothing.
	pub fn plain_text(&self) -> String {
		self.ops.iter().filter_map(Op::as_text).collect()
	}

	/// Serializes the body to its stored JSON bytes.
	pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
		serde_json::to_vec(self)
	}

	/// Parses a body from stored JSON bytes.
	pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
		serde_json::from_slice(bytes)
	}
}

/// Derives a document title from its first operation.
///
/// The title is the text of the first operation up to its first line break.
/// If the first operation carries no text (an embed, a retain or delete, or
/// there are no operations at all) the title is empty.
pub fn derive_title(body: &DocumentBody) -> String {
	let Some(text) = body.ops.first().and_then(Op::as_text) else {
		return String::new();
	};
	text.split_once('\n')
		.map_or(text, |(head, _)| head)
		.to_owned()
}

//! Snippet catalog for the Luanti Lua scripting API.
//!
//! The catalog is a flat, ordered sequence of snippet definitions loaded once
//! at startup and immutable for the rest of the process. Entries keep the
//! historical on-disk field names (`token`, `prefix`, `body`, `desc`,
//! `doc_lines`, `kind`, `detail`) so existing catalog data stays compatible.
//!
//! Catalog order is meaningful: consumers iterate entries in the order they
//! appear in the data file and must not re-rank them.

mod doclink;
mod kind;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

pub use doclink::{DEFAULT_API_VERSION, DOC_NAME, DocLink};

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// Error reading a catalog file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing catalog JSON.
	#[error("catalog parse error: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// A single snippet definition.
///
/// Entries are independent of one another; no entry depends on another's
/// match state.
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetEntry {
	/// Literal text that must precede the cursor for the entry to be
	/// eligible for automatic matching. Entries with an empty token never
	/// auto-match and are only reachable by manual invocation.
	#[serde(default)]
	pub token: String,
	/// Primary label shown for the completion.
	pub prefix: String,
	/// Insertion template in LSP snippet syntax (`${n:default}`, `$0`).
	pub body: String,
	/// Free-text description.
	#[serde(default)]
	pub desc: String,
	/// Optional anchor into `lua_api.md` (a `L<line>` fragment).
	#[serde(default)]
	pub doc_lines: Option<String>,
	/// Numeric category in the legacy 0-based numbering.
	#[serde(default)]
	pub kind: Option<u32>,
	/// Optional display text overriding the default detail.
	#[serde(default)]
	pub detail: Option<String>,
}

impl SnippetEntry {
	/// Whether this entry participates in trigger matching.
	pub fn is_triggerable(&self) -> bool {
		!self.token.is_empty()
	}

	/// The category mapped to the LSP numbering.
	pub fn lsp_kind(&self) -> lsp_types::CompletionItemKind {
		kind::completion_kind(self.kind)
	}

	/// Detail text: the explicit override, else the label.
	pub fn detail_text(&self) -> &str {
		self.detail.as_deref().unwrap_or(&self.prefix)
	}
}

/// An immutable, ordered snippet catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	entries: Vec<SnippetEntry>,
}

impl Catalog {
	/// Parse a catalog from a JSON array.
	pub fn from_json(data: &str) -> Result<Self> {
		let entries: Vec<SnippetEntry> = serde_json::from_str(data)?;
		Ok(Self { entries })
	}

	/// Load a catalog from a file.
	pub fn load(path: &Path) -> Result<Self> {
		let data = std::fs::read_to_string(path).map_err(|error| CatalogError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_json(&data)
	}

	/// The catalog bundled with this crate.
	pub fn bundled() -> &'static Catalog {
		static BUNDLED: LazyLock<Catalog> = LazyLock::new(|| {
			Catalog::from_json(include_str!("../data/snippets.json"))
				.expect("bundled snippet catalog is valid JSON")
		});
		&BUNDLED
	}

	/// All entries, in catalog order.
	pub fn entries(&self) -> &[SnippetEntry] {
		&self.entries
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the catalog has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in catalog order.
	pub fn iter(&self) -> std::slice::Iter<'_, SnippetEntry> {
		self.entries.iter()
	}
}

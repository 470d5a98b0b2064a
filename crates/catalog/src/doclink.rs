//! Reference links into the Luanti Lua API documentation.

use crate::SnippetEntry;

/// Display name of the reference document.
pub const DOC_NAME: &str = "lua_api.md";

/// Default engine version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "5.11.0";

/// Builds Markdown documentation strings with a link into `lua_api.md`.
///
/// The link targets the versioned copy of the document on the engine
/// repository, rendered in plain mode so `L<line>` anchors resolve.
#[derive(Debug, Clone)]
pub struct DocLink {
	base: String,
}

impl DocLink {
	/// Create a link builder for the given engine version (e.g. `"5.11.0"`).
	pub fn new(api_version: &str) -> Self {
		Self {
			base: format!(
				"https://github.com/luanti-org/luanti/blob/{api_version}/doc/{DOC_NAME}?plain=1#"
			),
		}
	}

	/// Render the documentation string for an entry.
	///
	/// Entries with a `doc_lines` anchor get the description followed by a
	/// Markdown reference link; entries without one get the description
	/// verbatim.
	pub fn documentation(&self, entry: &SnippetEntry) -> String {
		match &entry.doc_lines {
			Some(anchor) => {
				format!("{}\n\n[View in {DOC_NAME}]({}{anchor})", entry.desc, self.base)
			}
			None => entry.desc.clone(),
		}
	}
}

impl Default for DocLink {
	fn default() -> Self {
		Self::new(DEFAULT_API_VERSION)
	}
}

//! Snippet completion engine for the Luanti Lua API.
//!
//! Two pieces, both pure computation over in-memory strings:
//!
//! - the [trigger matcher](trigger): decides which catalog entries apply at
//!   the cursor, given the text of the current line up to it;
//! - the [completion builder](builder): turns each matched entry into an
//!   LSP completion item, including the deletion edit that consumes an
//!   auto-paired closing bracket.
//!
//! Results are always in catalog order. No ranking is applied here; the
//! host editor performs final sorting and filtering.

pub mod builder;
pub mod trigger;

use std::sync::Arc;

use lsp_types::{CompletionItem, Position};
use luanti_catalog::{Catalog, DocLink};

pub use builder::{build_item, closing_bracket_edit};
pub use trigger::{SnippetMatcher, compile_trigger};

/// Context for a single completion request.
#[derive(Debug, Clone)]
pub struct CompletionContext<'a> {
	/// Text of the current line from its start up to (not including) the
	/// cursor.
	pub line_prefix: &'a str,
	/// The character immediately after the cursor, if any on this line.
	pub after: Option<char>,
	/// The cursor position, used to anchor text edits.
	pub position: Position,
	/// Result of the workspace guard check. When `false`, no candidates
	/// are produced at all; the flag is passed in explicitly so the
	/// provider reads no ambient state.
	pub workspace_ok: bool,
}

/// Snippet completion provider: a compiled catalog plus a doc-link builder.
///
/// Construction compiles every trigger once; each request is then stateless
/// with respect to prior requests.
pub struct SnippetProvider {
	matcher: SnippetMatcher,
	doc: DocLink,
}

impl SnippetProvider {
	/// Create a provider over a catalog.
	pub fn new(catalog: Arc<Catalog>, doc: DocLink) -> Self {
		Self {
			matcher: SnippetMatcher::new(catalog),
			doc,
		}
	}

	/// Replace the doc-link builder (after a configuration change).
	pub fn set_doc_link(&mut self, doc: DocLink) {
		self.doc = doc;
	}

	/// The underlying catalog.
	pub fn catalog(&self) -> &Catalog {
		self.matcher.catalog()
	}

	/// Produce completion candidates for a request, in catalog order.
	pub fn complete(&self, ctx: &CompletionContext<'_>) -> Vec<CompletionItem> {
		if !ctx.workspace_ok {
			return Vec::new();
		}
		self.matcher
			.matches(ctx.line_prefix)
			.into_iter()
			.map(|entry| build_item(entry, &self.doc, ctx.after, ctx.position))
			.collect()
	}
}

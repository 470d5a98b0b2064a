//! Open document tracking.
//!
//! The server advertises full document sync; each change replaces the whole
//! text. Positions arrive in UTF-16 code units per the LSP default encoding
//! and are clamped into the document rather than rejected.

use std::collections::HashMap;

use lsp_types::{Position, TextDocumentContentChangeEvent, Url};
use ropey::Rope;

/// A tracked open document.
#[derive(Debug)]
pub struct Document {
	text: Rope,
}

impl Document {
	fn new(text: &str) -> Self {
		Self {
			text: Rope::from_str(text),
		}
	}

	/// Char offset for an LSP position, clamped into the document.
	fn position_to_char(&self, position: Position) -> usize {
		let line_idx = (position.line as usize).min(self.text.len_lines().saturating_sub(1));
		let line_start = self.text.line_to_char(line_idx);
		let line = self.text.line(line_idx);

		let mut remaining = position.character as usize;
		let mut offset = 0;
		for c in line.chars() {
			if c == '\n' || c == '\r' {
				break;
			}
			let width = c.len_utf16();
			if remaining < width {
				break;
			}
			remaining -= width;
			offset += 1;
			if remaining == 0 {
				break;
			}
		}
		line_start + offset
	}

	/// Text of the position's line from its start up to the position.
	pub fn line_prefix(&self, position: Position) -> String {
		let cursor = self.position_to_char(position);
		let line_start = self.text.line_to_char(self.text.char_to_line(cursor));
		self.text.slice(line_start..cursor).to_string()
	}

	/// The character immediately after the position on the same line.
	pub fn char_after(&self, position: Position) -> Option<char> {
		let cursor = self.position_to_char(position);
		if cursor >= self.text.len_chars() {
			return None;
		}
		let c = self.text.char(cursor);
		(c != '\n' && c != '\r').then_some(c)
	}
}

/// All documents the client currently has open.
#[derive(Debug, Default)]
pub struct DocumentStore {
	docs: HashMap<Url, Document>,
}

impl DocumentStore {
	/// Track a newly opened document.
	pub fn open(&mut self, uri: Url, text: &str) {
		self.docs.insert(uri, Document::new(text));
	}

	/// Apply full-sync content changes; the last change wins.
	pub fn change(&mut self, uri: &Url, changes: Vec<TextDocumentContentChangeEvent>) {
		if let Some(doc) = self.docs.get_mut(uri)
			&& let Some(change) = changes.into_iter().next_back()
		{
			doc.text = Rope::from_str(&change.text);
		}
	}

	/// Stop tracking a closed document.
	pub fn close(&mut self, uri: &Url) {
		self.docs.remove(uri);
	}

	/// Look up an open document.
	pub fn get(&self, uri: &Url) -> Option<&Document> {
		self.docs.get(uri)
	}
}

//! Completion candidate construction.
//!
//! One matched entry becomes exactly one completion item. The template body
//! is passed through verbatim as an LSP snippet; placeholder expansion is
//! the host's job.

use lsp_types::{
	CompletionItem, Documentation, InsertTextFormat, MarkupContent, MarkupKind, Position, Range,
	TextEdit,
};
use luanti_catalog::{DocLink, SnippetEntry};

/// Opening brackets whose templates carry their own closing counterpart.
const OPENING_BRACKETS: [&str; 3] = ["(", "[", "{"];

/// Closing brackets an auto-pairing host may have inserted.
const CLOSING_BRACKETS: [char; 3] = [')', ']', '}'];

/// Deletion edit consuming an auto-paired closing bracket.
///
/// Produced only when the entry's trigger is a lone opening bracket and the
/// character immediately after the cursor is any closing bracket: the
/// host's auto-pairing has already inserted a bracket the template also
/// contains, so the doubled one is deleted. Any closing bracket counts,
/// not just the matching one.
pub fn closing_bracket_edit(
	entry: &SnippetEntry,
	after: Option<char>,
	position: Position,
) -> Option<TextEdit> {
	if !OPENING_BRACKETS.contains(&entry.token.as_str()) {
		return None;
	}
	if !CLOSING_BRACKETS.contains(&after?) {
		return None;
	}
	Some(TextEdit {
		range: Range {
			start: position,
			end: Position::new(position.line, position.character + 1),
		},
		new_text: String::new(),
	})
}

/// Build the completion item for a matched entry.
///
/// - label: the entry's `prefix`
/// - insert text: the template body, as an LSP snippet
/// - documentation: Markdown description, with a `lua_api.md` link when the
///   entry carries a doc anchor
/// - detail: the entry's override, else the label
pub fn build_item(
	entry: &SnippetEntry,
	doc: &DocLink,
	after: Option<char>,
	position: Position,
) -> CompletionItem {
	CompletionItem {
		label: entry.prefix.clone(),
		kind: Some(entry.lsp_kind()),
		detail: Some(entry.detail_text().to_string()),
		documentation: Some(Documentation::MarkupContent(MarkupContent {
			kind: MarkupKind::Markdown,
			value: doc.documentation(entry),
		})),
		insert_text: Some(entry.body.clone()),
		insert_text_format: Some(InsertTextFormat::SNIPPET),
		additional_text_edits: closing_bracket_edit(entry, after, position).map(|edit| vec![edit]),
		..CompletionItem::default()
	}
}

#[cfg(test)]
mod tests {
	use luanti_catalog::Catalog;
	use lsp_types::CompletionItemKind;
	use pretty_assertions::assert_eq;

	use super::*;

	fn entry(json_object: &str) -> SnippetEntry {
		Catalog::from_json(&format!("[{json_object}]")).unwrap().entries()[0].clone()
	}

	fn paren_entry() -> SnippetEntry {
		entry(r#"{"token": "(", "prefix": "()", "body": "($1)$0", "kind": 14}"#)
	}

	#[test]
	fn test_bracket_trigger_with_closing_char_deletes_it() {
		let position = Position::new(3, 7);
		let edit = closing_bracket_edit(&paren_entry(), Some(')'), position).unwrap();
		assert_eq!(edit.new_text, "");
		assert_eq!(edit.range.start, position);
		assert_eq!(edit.range.end, Position::new(3, 8));
	}

	#[test]
	fn test_any_closing_bracket_counts() {
		let position = Position::new(0, 1);
		assert!(closing_bracket_edit(&paren_entry(), Some(']'), position).is_some());
		assert!(closing_bracket_edit(&paren_entry(), Some('}'), position).is_some());
	}

	#[test]
	fn test_no_edit_without_closing_bracket() {
		let position = Position::new(0, 1);
		assert!(closing_bracket_edit(&paren_entry(), Some('a'), position).is_none());
		assert!(closing_bracket_edit(&paren_entry(), None, position).is_none());
	}

	#[test]
	fn test_no_edit_for_non_bracket_trigger() {
		let e = entry(r#"{"token": "minetest.", "prefix": "reg", "body": "b"}"#);
		assert!(closing_bracket_edit(&e, Some(')'), Position::new(0, 9)).is_none());
	}

	#[test]
	fn test_item_fields_come_from_the_entry() {
		let e = entry(
			r#"{
				"token": "minetest.",
				"prefix": "minetest.after",
				"body": "minetest.after(${1:time}, function()\n\t$0\nend)",
				"desc": "Call a function later.",
				"doc_lines": "L6955",
				"kind": 2,
				"detail": "minetest.after(time, func, ...)"
			}"#,
		);
		let item = build_item(&e, &DocLink::default(), None, Position::new(0, 9));
		assert_eq!(item.label, "minetest.after");
		assert_eq!(item.kind, Some(CompletionItemKind::FUNCTION));
		assert_eq!(item.detail.as_deref(), Some("minetest.after(time, func, ...)"));
		assert_eq!(item.insert_text.as_deref(), Some(e.body.as_str()));
		assert_eq!(item.insert_text_format, Some(InsertTextFormat::SNIPPET));
		assert!(item.additional_text_edits.is_none());
		let Some(Documentation::MarkupContent(doc)) = item.documentation else {
			panic!("expected markdown documentation");
		};
		assert_eq!(doc.kind, MarkupKind::Markdown);
		assert!(doc.value.contains("#L6955)"));
	}

	#[test]
	fn test_detail_falls_back_to_label() {
		let e = entry(r#"{"token": "x", "prefix": "thing", "body": "b"}"#);
		let item = build_item(&e, &DocLink::default(), None, Position::new(0, 1));
		assert_eq!(item.detail.as_deref(), Some("thing"));
	}

	#[test]
	fn test_whole_catalog_builds_one_item_per_entry() {
		let catalog = Catalog::bundled();
		let doc = DocLink::default();
		let items: Vec<CompletionItem> = catalog
			.iter()
			.map(|e| build_item(e, &doc, None, Position::new(0, 0)))
			.collect();
		assert_eq!(items.len(), catalog.len());
		for (item, entry) in items.iter().zip(catalog.iter()) {
			assert_eq!(item.label, entry.prefix);
		}
	}
}

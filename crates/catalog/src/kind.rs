//! Mapping from the legacy numeric category to LSP completion kinds.
//!
//! Historical catalog data stores `kind` in the 0-based numbering used by
//! the editor the catalog originated from; LSP numbers the same kinds from
//! 1. Unknown or absent values fall back to [`CompletionItemKind::SNIPPET`].

use lsp_types::CompletionItemKind;

/// Map a raw catalog `kind` value to an LSP completion kind.
pub fn completion_kind(raw: Option<u32>) -> CompletionItemKind {
	match raw {
		Some(0) => CompletionItemKind::TEXT,
		Some(1) => CompletionItemKind::METHOD,
		Some(2) => CompletionItemKind::FUNCTION,
		Some(3) => CompletionItemKind::CONSTRUCTOR,
		Some(4) => CompletionItemKind::FIELD,
		Some(5) => CompletionItemKind::VARIABLE,
		Some(6) => CompletionItemKind::CLASS,
		Some(7) => CompletionItemKind::INTERFACE,
		Some(8) => CompletionItemKind::MODULE,
		Some(9) => CompletionItemKind::PROPERTY,
		Some(10) => CompletionItemKind::UNIT,
		Some(11) => CompletionItemKind::VALUE,
		Some(12) => CompletionItemKind::ENUM,
		Some(13) => CompletionItemKind::KEYWORD,
		Some(14) => CompletionItemKind::SNIPPET,
		Some(15) => CompletionItemKind::COLOR,
		Some(16) => CompletionItemKind::FILE,
		Some(17) => CompletionItemKind::REFERENCE,
		Some(18) => CompletionItemKind::FOLDER,
		Some(19) => CompletionItemKind::ENUM_MEMBER,
		Some(20) => CompletionItemKind::CONSTANT,
		Some(21) => CompletionItemKind::STRUCT,
		Some(22) => CompletionItemKind::EVENT,
		Some(23) => CompletionItemKind::OPERATOR,
		Some(24) => CompletionItemKind::TYPE_PARAMETER,
		_ => CompletionItemKind::SNIPPET,
	}
}

//! Trigger pattern compilation and matching.
//!
//! A trigger is a literal token (e.g. `minetest.` or `[`) that must appear
//! in the text before the cursor for its snippet to become a candidate. The
//! compiled pattern allows the user to have typed ahead past the token:
//! a tail of word, whitespace and hyphen characters is absorbed into the
//! match, so `minetest.reg` still activates entries triggered by
//! `minetest.`. A following character outside that class (such as the `(`
//! in `for(`) blocks the match at that position.

use std::sync::Arc;

use fancy_regex::Regex;
use luanti_catalog::{Catalog, SnippetEntry};
use tracing::warn;

/// Compile a literal trigger token into its matching pattern.
///
/// The token is escaped so none of its characters act as metacharacters,
/// then extended with a negative lookahead rejecting a following character
/// outside the word/whitespace/hyphen class, and an absorbing tail of that
/// same class. The pattern is searched unanchored and case-sensitively
/// against the line prefix.
pub fn compile_trigger(token: &str) -> Result<Regex, fancy_regex::Error> {
	Regex::new(&format!(
		"{}(?![^\\w\\n\\s\\r-])[\\w\\n\\s\\r-]*",
		fancy_regex::escape(token)
	))
}

/// Matches catalog entries against the text before the cursor.
///
/// Triggers are compiled once at construction. An entry whose trigger fails
/// to compile is excluded from matching (and logged); the rest of the
/// catalog keeps working.
pub struct SnippetMatcher {
	catalog: Arc<Catalog>,
	compiled: Vec<Option<Regex>>,
}

impl SnippetMatcher {
	/// Compile the triggers of every catalog entry.
	pub fn new(catalog: Arc<Catalog>) -> Self {
		let compiled = catalog
			.iter()
			.map(|entry| {
				if !entry.is_triggerable() {
					return None;
				}
				match compile_trigger(&entry.token) {
					Ok(pattern) => Some(pattern),
					Err(error) => {
						warn!(token = %entry.token, %error, "excluding snippet with uncompilable trigger");
						None
					}
				}
			})
			.collect();
		Self { catalog, compiled }
	}

	/// The underlying catalog.
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	/// Entries whose trigger matches the line prefix, in catalog order.
	///
	/// All matching entries are returned; overlapping triggers match
	/// independently and no precedence is applied. A match-time engine
	/// error counts as no match for that entry.
	pub fn matches(&self, line_prefix: &str) -> Vec<&SnippetEntry> {
		self.catalog
			.iter()
			.zip(&self.compiled)
			.filter_map(|(entry, pattern)| {
				let pattern = pattern.as_ref()?;
				pattern.is_match(line_prefix).unwrap_or(false).then_some(entry)
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use luanti_catalog::Catalog;
	use pretty_assertions::assert_eq;

	use super::*;

	fn catalog(json: &str) -> Arc<Catalog> {
		Arc::new(Catalog::from_json(json).unwrap())
	}

	fn matcher(json: &str) -> SnippetMatcher {
		SnippetMatcher::new(catalog(json))
	}

	fn labels<'a>(matcher: &'a SnippetMatcher, line_prefix: &str) -> Vec<&'a str> {
		matcher.matches(line_prefix).into_iter().map(|e| e.prefix.as_str()).collect()
	}

	#[test]
	fn test_token_at_end_of_prefix_matches() {
		let m = matcher(r#"[{"token": "minetest.", "prefix": "reg", "body": "b"}]"#);
		assert_eq!(labels(&m, "minetest."), vec!["reg"]);
		assert_eq!(labels(&m, "    minetest."), vec!["reg"]);
	}

	#[test]
	fn test_typed_ahead_tail_still_matches() {
		let m = matcher(r#"[{"token": "minetest.", "prefix": "reg", "body": "b"}]"#);
		assert_eq!(labels(&m, "minetest.register"), vec!["reg"]);
		assert_eq!(labels(&m, "minetest.register node"), vec!["reg"]);
	}

	#[test]
	fn test_following_punctuation_blocks_match() {
		let m = matcher(r#"[{"token": "for", "prefix": "for", "body": "b"}]"#);
		assert_eq!(labels(&m, "for("), Vec::<&str>::new());
		assert_eq!(labels(&m, "for"), vec!["for"]);
		assert_eq!(labels(&m, "for "), vec!["for"]);
	}

	#[test]
	fn test_match_is_case_sensitive() {
		let m = matcher(r#"[{"token": "for", "prefix": "for", "body": "b"}]"#);
		assert_eq!(labels(&m, "FOR"), Vec::<&str>::new());
	}

	#[test]
	fn test_metacharacter_tokens_match_literally() {
		let m = matcher(
			r#"[
				{"token": "(", "prefix": "paren", "body": "b"},
				{"token": "[", "prefix": "bracket", "body": "b"},
				{"token": "{", "prefix": "brace", "body": "b"}
			]"#,
		);
		assert_eq!(labels(&m, "f("), vec!["paren"]);
		assert_eq!(labels(&m, "t["), vec!["bracket"]);
		assert_eq!(labels(&m, "x = {"), vec!["brace"]);
		assert_eq!(labels(&m, "plain text"), Vec::<&str>::new());
	}

	#[test]
	fn test_empty_token_never_matches() {
		let m = matcher(
			r#"[
				{"prefix": "manual", "body": "b"},
				{"token": "x", "prefix": "auto", "body": "b"}
			]"#,
		);
		assert_eq!(labels(&m, "x"), vec!["auto"]);
		assert_eq!(labels(&m, ""), Vec::<&str>::new());
	}

	#[test]
	fn test_overlapping_tokens_match_independently_in_catalog_order() {
		let m = matcher(
			r#"[
				{"token": "minetest.", "prefix": "long", "body": "b"},
				{"token": ".", "prefix": "short", "body": "b"}
			]"#,
		);
		assert_eq!(labels(&m, "minetest."), vec!["long", "short"]);
	}

	#[test]
	fn test_empty_prefix_matches_nothing() {
		let m = matcher(r#"[{"token": "minetest.", "prefix": "reg", "body": "b"}]"#);
		assert_eq!(labels(&m, ""), Vec::<&str>::new());
	}

	#[test]
	fn test_matching_is_idempotent() {
		let m = matcher(
			r#"[
				{"token": "minetest.", "prefix": "a", "body": "b"},
				{"token": ".", "prefix": "c", "body": "b"}
			]"#,
		);
		let first = labels(&m, "minetest.set");
		let second = labels(&m, "minetest.set");
		assert_eq!(first, second);
	}

	#[test]
	fn test_every_bundled_trigger_compiles() {
		for entry in Catalog::bundled().iter().filter(|e| e.is_triggerable()) {
			compile_trigger(&entry.token)
				.unwrap_or_else(|e| panic!("trigger {:?} failed to compile: {e}", entry.token));
		}
	}

	#[test]
	fn test_every_bundled_trigger_matches_itself() {
		let m = SnippetMatcher::new(Arc::new(Catalog::bundled().clone()));
		for entry in Catalog::bundled().iter().filter(|e| e.is_triggerable()) {
			let line = format!("\t{}", entry.token);
			assert!(
				m.matches(&line).iter().any(|e| e.prefix == entry.prefix),
				"token {:?} did not match its own line prefix",
				entry.token
			);
		}
	}
}

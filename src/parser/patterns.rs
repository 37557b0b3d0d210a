//! Regex patterns for EBNF grammar syntax
//!
//! Both patterns are compiled once at startup using `LazyLock`.
//!
//! Unlike most formatter pattern tables these are case-sensitive: rule
//! identifiers admit ASCII letters, digits and underscores only.

use std::sync::LazyLock;

use regex::Regex;

/// Rule header: an optional `?` marker, an identifier, optional whitespace,
/// then the `:` delimiter.
///
/// The whole-match span matters, not just the identifier: the continuation
/// pad width is derived from the full matched substring (marker, identifier,
/// inner whitespace and colon included). `find` gives leftmost-match
/// semantics, so the first header-looking fragment on a line wins.
pub static RULE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\??[A-Za-z_][A-Za-z0-9_]*\s*:").unwrap());

/// Continuation line: optional leading whitespace followed by `|`.
pub static CONTINUATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\|").unwrap());

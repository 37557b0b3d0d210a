//! Continuation line reindentation.
//!
//! The core transform of gprettier: a single left-to-right pass over the
//! lines of a grammar file. Rule-header lines set the pad width; `|` lines
//! that follow are realigned under the header's identifier body. Everything
//! else passes through untouched.

use std::borrow::Cow;

use crate::parser::patterns::{CONTINUATION_RE, RULE_HEADER_RE};

/// Scan state carried across lines.
///
/// `indent_width` is the pad width derived from the most recently matched
/// rule header. `header_seen` becomes true at the first header and is only
/// ever overwritten by the next header match, never cleared: a `|` line
/// separated from its header by blank lines, comments or any other text
/// still realigns against the last header seen.
#[derive(Debug, Clone, Copy, Default)]
struct ScanState {
    header_seen: bool,
    indent_width: usize,
}

/// Reindent the continuation lines of a grammar file.
///
/// Total over all string inputs: the empty string, text without any rule
/// header, and malformed grammars all come back unchanged rather than
/// producing an error. Output has exactly as many lines as the input, in
/// the same order. Splitting and joining use `\n` only, so any `\r` is
/// preserved as line content.
#[must_use]
pub fn reindent(content: &str) -> String {
    let mut state = ScanState::default();
    let lines: Vec<Cow<'_, str>> = content
        .split('\n')
        .map(|line| reindent_line(line, &mut state))
        .collect();
    lines.join("\n")
}

/// Process one line, updating the scan state.
///
/// Header detection runs first and wins: a line like `| foo: bar` becomes a
/// new header (emitted unmodified, pad width recalculated), never a
/// continuation of the previous rule.
fn reindent_line<'a>(line: &'a str, state: &mut ScanState) -> Cow<'a, str> {
    if let Some(m) = RULE_HEADER_RE.find(line) {
        // Pad width is the full match length less one, `?` marker and inner
        // whitespace included.
        state.indent_width = m.as_str().chars().count() - 1;
        state.header_seen = true;
        return Cow::Borrowed(line);
    }

    if state.header_seen && CONTINUATION_RE.is_match(line) {
        return Cow::Owned(format!(
            "{}{}",
            " ".repeat(state.indent_width),
            line.trim_start()
        ));
    }

    Cow::Borrowed(line)
}

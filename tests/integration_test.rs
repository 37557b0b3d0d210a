//! Integration tests for gprettier
//!
//! These tests verify that the components work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::Cursor;

use gprettier::process::format_file;
use gprettier::reindent;

/// Run the pipeline over a string input and return the output string
fn format_str(input: &str) -> String {
    let mut output = Vec::new();
    format_file(Cursor::new(input.as_bytes()), &mut output)
        .unwrap_or_else(|e| panic!("format_file failed: {e}"));
    String::from_utf8(output).unwrap_or_else(|e| panic!("Invalid UTF-8 in output: {e}"))
}

#[test]
fn test_single_rule_with_alternatives() {
    let input = "?start: expr\n| expr NEWLINE\n| NEWLINE\n";
    let expected = "?start: expr\n      | expr NEWLINE\n      | NEWLINE\n";
    assert_eq!(format_str(input), expected);
}

#[test]
fn test_marker_header_pad_width() {
    // "?opt:" matches with width 4
    assert_eq!(format_str("?opt: x\n|y\n"), "?opt: x\n    |y\n");
}

#[test]
fn test_headerless_input_unchanged() {
    // No line ever matches the header pattern, so nothing is touched
    let input = "| a\n| b\n";
    assert_eq!(format_str(input), input);
}

#[test]
fn test_pipe_line_containing_header_becomes_header() {
    // "| foo: bar" is recognized as a header ("foo:", width 3) and
    // emitted unmodified; the following alternative aligns to it
    let input = "rule: a\n| foo: bar\n| tail\n";
    let expected = "rule: a\n| foo: bar\n   | tail\n";
    assert_eq!(format_str(input), expected);
}

#[test]
fn test_multiple_rules() {
    let input = concat!(
        "expression: term\n",
        "| term PLUS expression\n",
        "| term MINUS expression\n",
        "\n",
        "term: factor\n",
        "| factor STAR term\n",
    );
    let expected = concat!(
        "expression: term\n",
        "          | term PLUS expression\n",
        "          | term MINUS expression\n",
        "\n",
        "term: factor\n",
        "    | factor STAR term\n",
    );
    assert_eq!(format_str(input), expected);
}

#[test]
fn test_alternative_after_unrelated_lines_uses_last_header() {
    // Intervening lines do not end the rule; a late `|` line still aligns
    // against the most recent header
    let input = "rule: a\nsome free text\n\n| stray\n";
    let expected = "rule: a\nsome free text\n\n    | stray\n";
    assert_eq!(format_str(input), expected);
}

#[test]
fn test_line_count_preserved() {
    let inputs = [
        "",
        "\n",
        "rule: a\n| b\n| c\n",
        "no rules here\nat all\n",
        "| orphan\n\n?x: y\n|z",
    ];
    for input in inputs {
        let output = format_str(input);
        assert_eq!(
            input.split('\n').count(),
            output.split('\n').count(),
            "line count changed for {input:?}"
        );
    }
}

#[test]
fn test_idempotent_on_single_rule() {
    let input = "?value: object\n| array\n| string\n| number\n";
    let once = format_str(input);
    let twice = format_str(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_prefix_lines_before_first_header_untouched() {
    let input = "// comment\n| not a continuation yet\nrule: a\n| b\n";
    let expected = "// comment\n| not a continuation yet\nrule: a\n    | b\n";
    assert_eq!(format_str(input), expected);
}

#[test]
fn test_crlf_content_preserved() {
    // \r is line content, not a delimiter; it survives the pad rewrite
    let input = "rule: a\r\n| b\r\n";
    let expected = "rule: a\r\n    | b\r\n";
    assert_eq!(format_str(input), expected);
}

#[test]
fn test_library_and_pipeline_agree() {
    let input = "start: a\n  | b\nnext  : c\n|d\n";
    assert_eq!(format_str(input), reindent(input));
}

#[test]
fn test_larger_grammar_round_trip() {
    let input = "\
// a small expression grammar\n\
?start: sum\n\
\n\
?sum: product\n\
| sum \"+\" product\n\
| sum \"-\" product\n\
\n\
?product: atom\n\
| product \"*\" atom\n\
| product \"/\" atom\n\
\n\
?atom: NUMBER\n\
| \"-\" atom\n\
| \"(\" sum \")\"\n\
\n\
%import common.NUMBER\n\
%ignore \" \"\n";
    let output = format_str(input);

    // Every alternative line is padded to its header's width
    assert!(output.contains("\n    | sum \"+\" product\n"));
    assert!(output.contains("\n        | product \"*\" atom\n"));
    assert!(output.contains("\n     | \"-\" atom\n"));
    // Headers and directives are untouched
    assert!(output.contains("\n?sum: product\n"));
    assert!(output.contains("\n%import common.NUMBER\n"));
    // Reformatting the result is a no-op
    assert_eq!(format_str(&output), output);
}

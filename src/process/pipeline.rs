//! Single-pass formatting pipeline
//!
//! Reads the whole input into memory, reindents continuation lines and
//! writes the result. There is no streaming and no second pass: the
//! transform is a pure function over the full file text.

use std::io::{Read, Write};

use crate::format::reindent;
use crate::Result;

/// Format a grammar file.
///
/// Reads `input` to the end as UTF-8, realigns `|` continuation lines under
/// their rule headers and writes the result to `output`. Line count and
/// line order are preserved; inputs without any rule header are written
/// back byte-for-byte.
pub fn format_file<R: Read, W: Write>(mut input: R, output: &mut W) -> Result<()> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;

    let formatted = reindent(&content);
    output.write_all(formatted.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(input: &str) -> String {
        let mut output = Vec::new();
        format_file(Cursor::new(input.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_format_file_realigns_continuations() {
        assert_eq!(run("?opt: x\n|y\n"), "?opt: x\n    |y\n");
    }

    #[test]
    fn test_format_file_empty_input() {
        assert_eq!(run(""), "");
    }

    #[test]
    fn test_format_file_headerless_passthrough() {
        let input = "| a\n| b\nplain text\n";
        assert_eq!(run(input), input);
    }

    #[test]
    fn test_format_file_no_trailing_newline_added() {
        assert_eq!(run("rule: a\n| b"), "rule: a\n    | b");
    }

    #[test]
    fn test_format_file_invalid_utf8_is_an_error() {
        let mut output = Vec::new();
        let result = format_file(Cursor::new(&[0x72u8, 0xff, 0xfe][..]), &mut output);
        assert!(result.is_err());
    }
}

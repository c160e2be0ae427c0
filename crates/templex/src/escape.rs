use alloc::string::String;

use bstr::ByteSlice;

use crate::scanner::{CONTINUATION, ESCAPE, NEWLINE, is_hspace};

/// Decodes the raw text of a content token into the string it denotes.
///
/// Recognised escapes are `\{`, `\\`, `\"`, `\n`, `\r`, `\t`, `\0`, `\b` and
/// `\f`. Any other escape is kept as written, backslash included. In
/// multi-line content, a line break followed by indentation and the `|`
/// continuation marker stands for a single `\n`. Invalid UTF-8 decodes to
/// U+FFFD.
///
/// ```rust
/// assert_eq!(templex::cook(b"a\\{b\\q", false), "a{b\\q");
/// assert_eq!(templex::cook(b"one\n    |two", true), "one\ntwo");
/// ```
#[must_use]
pub fn cook(raw: &[u8], multiline: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => match chars.next() {
                Some(escaped) => match unescape(escaped) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push(ESCAPE);
                        out.push(escaped);
                    }
                },
                None => out.push(ESCAPE),
            },
            NEWLINE if multiline => {
                out.push(NEWLINE);
                let mut indent = String::new();
                while let Some(c) = chars.next_if(|&c| is_hspace(c)) {
                    indent.push(c);
                }
                if chars.next_if_eq(&CONTINUATION).is_none() {
                    out.push_str(&indent);
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

fn unescape(escaped: char) -> Option<char> {
    Some(match escaped {
        '{' => '{',
        '\\' => '\\',
        '"' => '"',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '0' => '\0',
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(br"Use \{braces}", "Use {braces}")]
    #[case(br"C:\\Users", r"C:\Users")]
    #[case(br#"Say \"Hello\""#, r#"Say "Hello""#)]
    #[case(br"Line1\nLine2", "Line1\nLine2")]
    #[case(br"Col1\tCol2", "Col1\tCol2")]
    #[case(br"nul\0", "nul\0")]
    #[case(br"\b\f\r", "\u{8}\u{c}\r")]
    #[case(br"keep \q as is", r"keep \q as is")]
    #[case(br"trailing \", r"trailing \")]
    fn decodes_escapes(#[case] raw: &[u8], #[case] expected: &str) {
        assert_eq!(cook(raw, false), expected);
    }

    #[test]
    fn single_line_keeps_raw_newlines_and_bars() {
        assert_eq!(cook(b"a\n  |b", false), "a\n  |b");
    }

    #[test]
    fn multi_line_folds_continuations() {
        assert_eq!(cook(b"\n  |first\n\t|second", true), "\nfirst\nsecond");
        // indentation without a marker is kept
        assert_eq!(cook(b"x\n  y", true), "x\n  y");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(cook(b"a\xFFb", false), "a\u{FFFD}b");
    }
}

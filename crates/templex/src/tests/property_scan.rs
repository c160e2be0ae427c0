use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use crate::{
    Position, SourceLexer, TemplateTokenKind, TokenKind, Tokenizer, TokenizerOptions, ValidSymbols,
    scan,
};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Biases arbitrary text towards the characters the scanner cares about.
fn structural(text: &str, picks: &[u8]) -> String {
    const ALPHABET: [char; 12] = ['{', '}', '"', '\'', '\\', '|', '\n', ' ', '\t', ';', '(', 'a'];
    let mut out = String::from(text);
    for &pick in picks {
        out.push(ALPHABET[usize::from(pick) % ALPHABET.len()]);
    }
    out
}

/// Property: a call that accepts both template flavours returns nothing and
/// leaves the cursor where it was, whatever else is accepted and whatever
/// the input.
#[test]
fn ambiguous_context_is_rejected() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, picks: Vec<u8>, bits: u16) -> bool {
        let src = structural(&text, &picks);
        let valid = ValidSymbols::from_bits_truncate(bits)
            | ValidSymbols::SINGLELINE_CONTENT
            | ValidSymbols::MULTILINE_END;
        let mut lexer = SourceLexer::new(&src);
        scan(&mut lexer, valid).is_none() && lexer.position() == Position::START
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, Vec<u8>, u16) -> bool);
}

/// Property: a recognised token is one of the accepted kinds, lies within
/// the input, and is empty only as the end of a multi-line template at the
/// end of input. A failed scan does not move the cursor.
#[test]
fn scans_are_well_formed() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, picks: Vec<u8>, bits: u16) -> bool {
        let src = structural(&text, &picks);
        let valid = ValidSymbols::from_bits_truncate(bits);
        let mut lexer = SourceLexer::new(&src);
        let Some(token) = lexer.scan(valid) else {
            return lexer.position() == Position::START;
        };
        let in_bounds = token.span.start.offset <= token.span.end.offset
            && token.span.end.offset <= src.len()
            && lexer.position() == token.span.end;
        let non_empty = !token.span.is_empty()
            || (token.kind == TokenKind::MultilineEnd && lexer.rest().is_empty());
        valid.accepts(token.kind) && in_bounds && non_empty
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, Vec<u8>, u16) -> bool);
}

/// Property: the scanner keeps no state, so scanning a position twice gives
/// the same token.
#[test]
fn scanning_is_repeatable() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, picks: Vec<u8>, bits: u16) -> bool {
        let src = structural(&text, &picks);
        let valid = ValidSymbols::from_bits_truncate(bits);
        let mut lexer = SourceLexer::new(&src);
        let first = lexer.clone().scan(valid);
        first == lexer.scan(valid)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, Vec<u8>, u16) -> bool);
}

/// Property: a backslash and whatever follows it are content in a
/// single-line template.
#[quickcheck]
fn escape_absorbs_next_character(escaped: char) -> bool {
    let mut src = String::from('\\');
    src.push(escaped);
    let raw_len = src.len();
    src.push('"');

    let mut lexer = SourceLexer::new(&src);
    lexer.scan(ValidSymbols::SINGLELINE).is_some_and(|token| {
        token.kind == TokenKind::SinglelineContent && token.span.end.offset == raw_len
    })
}

/// Property: a `$|` template without interpolations always closes, with or
/// without statement blocks, whatever its text.
#[test]
fn multiline_templates_always_close() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, picks: Vec<u8>, statement_blocks: bool) -> bool {
        let body: String = structural(&text, &picks)
            .chars()
            .filter(|&c| c != '{' && c != '$')
            .collect();
        let src = alloc::format!("$|{body}");
        let tokenizer = Tokenizer::new(TokenizerOptions {
            statement_blocks,
            ..Default::default()
        });
        tokenizer.tokenize(&src).is_ok_and(|tokens| {
            tokens
                .iter()
                .any(|token| token.kind == TemplateTokenKind::Scanned(TokenKind::MultilineEnd))
        })
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, Vec<u8>, bool) -> bool);
}

/// Property: the reference tokenizer copes with arbitrary bytes, and its
/// tokens come out in order without overlapping.
#[test]
fn tokenizer_tokens_are_ordered() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, text: String, picks: Vec<u8>) -> bool {
        let mut src = bytes;
        src.extend_from_slice(b"$\"");
        src.extend_from_slice(structural(&text, &picks).as_bytes());

        let Ok(tokens) = Tokenizer::default().tokenize(&src) else {
            return true;
        };
        tokens
            .windows(2)
            .all(|pair| pair[0].span.end.offset <= pair[1].span.start.offset)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, String, Vec<u8>) -> bool);
}

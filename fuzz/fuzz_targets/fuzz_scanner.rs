#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use templex::{Position, SourceLexer, TokenKind, Tokenizer, TokenizerOptions, ValidSymbols};

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Snippets the scanner treats specially, spliced into inputs by the
/// mutator so that random bytes reach the interesting states.
static FRAGMENTS: &[&[u8]] = &[
    b"$\"",
    b"$|",
    b"{",
    b"}",
    b"{{",
    b"}}",
    b"\"",
    b"'",
    b"\\",
    b"\n",
    b"\n    |",
    b" ",
    b"\t",
    b";",
    b"(",
    b"TODO ",
    b"// ",
    b"/* */",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Inserts one fragment at a random position. Returns the new size.
fn splice_fragment(data: &mut [u8], size: usize, max_size: usize) -> usize {
    with_rng(|rng| {
        let fragment = FRAGMENTS[rng.random_range(0..FRAGMENTS.len())];
        if size + fragment.len() > max_size {
            return size;
        }
        let at = rng.random_range(0..=size);
        data.copy_within(at..size, at + fragment.len());
        data[at..at + fragment.len()].copy_from_slice(fragment);
        size + fragment.len()
    })
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    if seed % 4 == 0 {
        splice_fragment(data, size, max_size)
    } else {
        fuzzer_mutate(data, size, max_size)
    }
});

#[derive(Debug, Arbitrary)]
struct Input {
    valid: u16,
    statement_blocks: bool,
    freeform: bool,
    source: Vec<u8>,
}

fn check_scan(source: &[u8], valid: ValidSymbols) {
    let mut lexer = SourceLexer::new(source);
    let again = lexer.clone().scan(valid);
    let Some(token) = lexer.scan(valid) else {
        assert_eq!(lexer.position(), Position::START);
        assert!(again.is_none());
        return;
    };
    assert_eq!(again, Some(token), "scan is not repeatable");
    assert!(valid.accepts(token.kind), "{:?} not in {valid:?}", token.kind);
    assert!(token.span.start.offset <= token.span.end.offset);
    assert!(
        !token.span.is_empty() || (token.kind == TokenKind::MultilineEnd && lexer.rest().is_empty()),
        "empty {:?}",
        token.kind
    );
    if valid.intersects(ValidSymbols::SINGLELINE) && valid.intersects(ValidSymbols::MULTILINE) {
        panic!("ambiguous call produced {:?}", token.kind);
    }
}

fn check_tokenize(input: &Input) {
    let tokenizer = Tokenizer::new(TokenizerOptions {
        statement_blocks: input.statement_blocks,
        freeform_keyword: input.freeform.then_some("TODO"),
        panic_on_error: false,
    });
    if let Ok(tokens) = tokenizer.tokenize(&input.source) {
        for pair in tokens.windows(2) {
            assert!(pair[0].span.end.offset <= pair[1].span.start.offset);
        }
    }
}

fuzz_target!(|input: Input| {
    check_scan(&input.source, ValidSymbols::from_bits_truncate(input.valid));
    check_tokenize(&input);
});

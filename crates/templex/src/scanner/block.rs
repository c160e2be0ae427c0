//! `{{ ... }}` statement blocks.
//!
//! The block is returned as a single token that includes both opening and
//! both closing braces. Its closing pair is not re-emitted as expression
//! end tokens.

use super::{
    ESCAPE, EXPR_END, EXPR_START, NEWLINE,
    template::{Continuation, skip_continuation},
};
use crate::Lexer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Normal,
    /// After a `\` outside quotes.
    Escaped,
    /// Inside a `"` or `'` literal.
    Quoted(char),
    /// After a `\` inside a literal.
    QuotedEscaped(char),
}

/// Scans the rest of a statement block. The first `{` is already consumed.
///
/// Returns `false` when the lookahead is not a second `{`, when the input
/// ends before the braces balance, and, in a multi-line template, when a
/// newline inside the block is not followed by a `|` continuation.
pub(super) fn scan_stmt_block<L: Lexer + ?Sized>(lexer: &mut L, multiline: bool) -> bool {
    if lexer.lookahead() != Some(EXPR_START) {
        return false;
    }
    lexer.advance();

    let mut depth: u32 = 2;
    let mut state = BlockState::Normal;
    trace!(depth, multiline, "statement block");

    while let Some(c) = lexer.lookahead() {
        lexer.advance();
        state = match (state, c) {
            (BlockState::Normal, EXPR_START) => {
                depth += 1;
                BlockState::Normal
            }
            (BlockState::Normal, EXPR_END) => {
                depth -= 1;
                if depth == 0 {
                    trace!("statement block closed");
                    return true;
                }
                BlockState::Normal
            }
            (BlockState::Normal, NEWLINE) if multiline => {
                if skip_continuation(lexer) == Continuation::Stop {
                    trace!(depth, "statement block cut by an uncontinued line");
                    return false;
                }
                BlockState::Normal
            }
            (BlockState::Normal, ESCAPE) => BlockState::Escaped,
            (BlockState::Normal, '"' | '\'') => BlockState::Quoted(c),
            (BlockState::Normal | BlockState::Escaped, _) => BlockState::Normal,
            (BlockState::Quoted(quote), ESCAPE) => BlockState::QuotedEscaped(quote),
            (BlockState::Quoted(quote), _) if c == quote => BlockState::Normal,
            (BlockState::Quoted(quote) | BlockState::QuotedEscaped(quote), _) => {
                BlockState::Quoted(quote)
            }
        };
    }

    trace!(depth, "statement block unterminated");
    false
}

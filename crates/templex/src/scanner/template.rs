//! Template bodies.
//!
//! Both flavours consume literal text until a structural boundary. Pending
//! text is always flushed as a content token first, leaving the boundary
//! character for the next call, so each structural token starts a call of
//! its own. A boundary whose token is not accepted fails the call rather
//! than being swallowed.

use super::{
    CONTINUATION, ESCAPE, EXPR_START, NEWLINE, SINGLELINE_END, advance_escape, block, emit,
    is_hspace,
};
use crate::{Lexer, TokenKind, ValidSymbols};

/// The kinds one template flavour produces.
#[derive(Debug, Clone, Copy)]
struct Flavour {
    content: TokenKind,
    expr_start: TokenKind,
    stmt_block: TokenKind,
    multiline: bool,
}

const SINGLELINE: Flavour = Flavour {
    content: TokenKind::SinglelineContent,
    expr_start: TokenKind::SinglelineExprStart,
    stmt_block: TokenKind::SinglelineStmtBlock,
    multiline: false,
};

const MULTILINE: Flavour = Flavour {
    content: TokenKind::MultilineContent,
    expr_start: TokenKind::MultilineExprStart,
    stmt_block: TokenKind::MultilineStmtBlock,
    multiline: true,
};

/// Result of looking for a `|` after a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Continuation {
    /// The marker was found and consumed; the literal goes on.
    Continue,
    /// No marker; the literal ended at the newline.
    Stop,
}

/// Called right after a newline of a multi-line literal was consumed.
///
/// Consumes the indentation and, when present, the `|` marker. The
/// consumed characters belong to the current token either way.
pub(super) fn skip_continuation<L: Lexer + ?Sized>(lexer: &mut L) -> Continuation {
    while lexer.lookahead().is_some_and(is_hspace) {
        lexer.advance();
    }
    if lexer.lookahead() == Some(CONTINUATION) {
        lexer.advance();
        Continuation::Continue
    } else {
        Continuation::Stop
    }
}

pub(super) fn scan_singleline<L: Lexer + ?Sized>(
    lexer: &mut L,
    valid: ValidSymbols,
) -> Option<TokenKind> {
    let mut has_content = false;

    while let Some(c) = lexer.lookahead() {
        match c {
            EXPR_START if has_content => return flush_content(lexer, valid, SINGLELINE),
            EXPR_START => return expression_start(lexer, valid, SINGLELINE),
            SINGLELINE_END if has_content => return flush_content(lexer, valid, SINGLELINE),
            SINGLELINE_END => {
                if !valid.accepts(TokenKind::SinglelineEnd) {
                    return None;
                }
                lexer.advance();
                return emit(lexer, TokenKind::SinglelineEnd);
            }
            ESCAPE => {
                advance_escape(lexer);
                has_content = true;
            }
            _ => {
                lexer.advance();
                has_content = true;
            }
        }
    }

    trace!("single-line template unterminated");
    None
}

pub(super) fn scan_multiline<L: Lexer + ?Sized>(
    lexer: &mut L,
    valid: ValidSymbols,
) -> Option<TokenKind> {
    let mut has_content = false;

    loop {
        let Some(c) = lexer.lookahead() else {
            // End of input closes a multi-line literal.
            if has_content {
                return flush_content(lexer, valid, MULTILINE);
            }
            if !valid.accepts(TokenKind::MultilineEnd) {
                return None;
            }
            return emit(lexer, TokenKind::MultilineEnd);
        };

        match c {
            EXPR_START if has_content => return flush_content(lexer, valid, MULTILINE),
            EXPR_START => return expression_start(lexer, valid, MULTILINE),
            NEWLINE => {
                // Pending text ends before the newline unless the next line
                // continues the literal.
                if has_content {
                    lexer.mark_end();
                }
                lexer.advance();
                match skip_continuation(lexer) {
                    Continuation::Continue => has_content = true,
                    Continuation::Stop if has_content => {
                        trace!("multi-line template ends after content");
                        return valid
                            .accepts(TokenKind::MultilineContent)
                            .then_some(TokenKind::MultilineContent);
                    }
                    Continuation::Stop => {
                        if !valid.accepts(TokenKind::MultilineEnd) {
                            return None;
                        }
                        return emit(lexer, TokenKind::MultilineEnd);
                    }
                }
            }
            ESCAPE => {
                advance_escape(lexer);
                has_content = true;
            }
            _ => {
                lexer.advance();
                has_content = true;
            }
        }
    }
}

/// Emits the text consumed so far, ending before the lookahead.
fn flush_content<L: Lexer + ?Sized>(
    lexer: &mut L,
    valid: ValidSymbols,
    flavour: Flavour,
) -> Option<TokenKind> {
    if !valid.accepts(flavour.content) {
        return None;
    }
    emit(lexer, flavour.content)
}

/// Handles a `{` with no pending text: a statement block when one is
/// accepted and present, otherwise a plain expression start.
fn expression_start<L: Lexer + ?Sized>(
    lexer: &mut L,
    valid: ValidSymbols,
    flavour: Flavour,
) -> Option<TokenKind> {
    if valid.accepts(flavour.stmt_block) {
        lexer.advance();
        // A lone `{` is the expression start; the mark holds if the block
        // scan fails further on.
        lexer.mark_end();
        if block::scan_stmt_block(lexer, flavour.multiline) {
            return emit(lexer, flavour.stmt_block);
        }
        return valid
            .accepts(flavour.expr_start)
            .then_some(flavour.expr_start);
    }

    if !valid.accepts(flavour.expr_start) {
        return None;
    }
    lexer.advance();
    emit(lexer, flavour.expr_start)
}

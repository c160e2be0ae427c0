//! Free-form text after a keyword such as `TODO`.
//!
//! The host matches the keyword itself and then offers one or both
//! free-form kinds. Text only counts as free-form when it is separated from
//! the keyword by spaces or tabs and does not open a call (`TODO(...)`), so
//! the host can fall back to treating the keyword as an ordinary
//! identifier. The separating whitespace is skipped, not part of the token.

use super::{CALL_OPEN, NEWLINE, SEPARATOR, emit, is_hspace};
use crate::{Lexer, TokenKind, ValidSymbols};

pub(super) fn scan_freeform<L: Lexer + ?Sized>(
    lexer: &mut L,
    valid: ValidSymbols,
) -> Option<TokenKind> {
    if !lexer.lookahead().is_some_and(is_hspace) {
        return None;
    }
    while lexer.lookahead().is_some_and(is_hspace) {
        lexer.skip();
    }
    if matches!(
        lexer.lookahead(),
        None | Some(CALL_OPEN | NEWLINE | SEPARATOR)
    ) {
        trace!("no free-form text after keyword");
        return None;
    }

    let found_separator = advance_until_separator(lexer);
    let until_separator = valid.accepts(TokenKind::KeywordFreeformUntilSeparator);
    let to_line_end = valid.accepts(TokenKind::KeywordFreeformText);
    trace!(found_separator, until_separator, to_line_end, "free-form text");

    match (found_separator, until_separator, to_line_end) {
        (true, true, _) => emit(lexer, TokenKind::KeywordFreeformUntilSeparator),
        (false, _, true) => emit(lexer, TokenKind::KeywordFreeformText),
        (true, false, true) => {
            advance_to_line_end(lexer);
            emit(lexer, TokenKind::KeywordFreeformText)
        }
        (_, _, false) => None,
    }
}

/// Consumes the line up to a `;` or the line end. Returns whether it stopped
/// at a `;`, which is left unconsumed.
fn advance_until_separator<L: Lexer + ?Sized>(lexer: &mut L) -> bool {
    while let Some(c) = lexer.lookahead() {
        match c {
            SEPARATOR => return true,
            NEWLINE => return false,
            _ => lexer.advance(),
        }
    }
    false
}

fn advance_to_line_end<L: Lexer + ?Sized>(lexer: &mut L) {
    while lexer.lookahead().is_some_and(|c| c != NEWLINE) {
        lexer.advance();
    }
}

//! The external scanner.
//!
//! `scan` is a pure function of the cursor position and the accepted kinds:
//! it keeps nothing between calls, so the host can rescan any position at
//! any time and several inputs can be scanned side by side.
//!
//! Each call resolves a [`Mode`] first and hands off to one routine:
//!
//! - `template`: content runs, expression starts and terminators of both
//!   template flavours, and the `|` continuation check of multi-line ones;
//! - `block`: `{{ ... }}` statement blocks;
//! - `freeform`: text after a free-form keyword.
//!
//! Structural characters are fixed and must agree with the host grammar's
//! own tokens for the literal openers (`$"` and `$|`).

mod block;
mod context;
mod freeform;
mod template;

pub use context::{Mode, resolve_mode};

use crate::{Lexer, TokenKind, ValidSymbols};

pub(crate) const EXPR_START: char = '{';
pub(crate) const EXPR_END: char = '}';
pub(crate) const SINGLELINE_END: char = '"';
pub(crate) const CONTINUATION: char = '|';
pub(crate) const NEWLINE: char = '\n';
pub(crate) const ESCAPE: char = '\\';
pub(crate) const SEPARATOR: char = ';';
pub(crate) const CALL_OPEN: char = '(';

/// Intra-line whitespace: space or tab, never a newline.
#[inline]
pub(crate) fn is_hspace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Scans one token.
///
/// Returns the kind of the recognised token, whose end is the cursor's last
/// marked position, or `None` when nothing applies: an ambiguous context,
/// a construct that belongs to the host, or an unterminated literal or
/// block. `None` carries no diagnostics; reporting is up to the host.
pub fn scan<L: Lexer + ?Sized>(lexer: &mut L, valid: ValidSymbols) -> Option<TokenKind> {
    let mode = resolve_mode(valid, lexer.lookahead());
    trace!(?mode, ?valid, lookahead = ?lexer.lookahead(), "scan");

    let token = match mode {
        Mode::Reject => None,
        Mode::KeywordFreeform => freeform::scan_freeform(lexer, valid),
        Mode::ExprEnd => {
            lexer.advance();
            emit(lexer, TokenKind::TemplateExprEnd)
        }
        Mode::SingleLine => template::scan_singleline(lexer, valid),
        Mode::MultiLine => template::scan_multiline(lexer, valid),
    };
    trace!(?token, "scan done");
    token
}

/// Marks the current position and reports `kind`.
#[inline]
fn emit<L: Lexer + ?Sized>(lexer: &mut L, kind: TokenKind) -> Option<TokenKind> {
    lexer.mark_end();
    Some(kind)
}

/// Consumes a backslash and the character after it, whatever it is.
#[inline]
fn advance_escape<L: Lexer + ?Sized>(lexer: &mut L) {
    lexer.advance();
    if !lexer.eof() {
        lexer.advance();
    }
}

use super::{EXPR_END, is_hspace};
use crate::{TokenKind, ValidSymbols};

/// What a single [`scan`](crate::scan) call is about to do, as inferred
/// from the accepted kinds and the lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Inside a `$"..."` template body.
    SingleLine,
    /// Inside a `$|...` template body.
    MultiLine,
    /// At the `}` closing an interpolated expression.
    ExprEnd,
    /// At the text following a free-form keyword.
    KeywordFreeform,
    /// Nothing to do: either the context is ambiguous (the host is
    /// recovering from an error and accepts both template flavours) or no
    /// kind this scanner produces applies.
    Reject,
}

/// Classifies a scanner call.
///
/// Accepting single-line and multi-line kinds at once is never a real parse
/// state, so it resolves to [`Mode::Reject`] whatever the lookahead is.
/// Free-form text wins over the template modes when the lookahead is a
/// space or tab, since it belongs to a different token family.
#[must_use]
pub fn resolve_mode(valid: ValidSymbols, lookahead: Option<char>) -> Mode {
    let in_singleline = valid.intersects(ValidSymbols::SINGLELINE);
    let in_multiline = valid.intersects(ValidSymbols::MULTILINE);

    if in_singleline && in_multiline {
        return Mode::Reject;
    }
    if valid.intersects(ValidSymbols::KEYWORD_FREEFORM) && lookahead.is_some_and(is_hspace) {
        return Mode::KeywordFreeform;
    }
    if valid.accepts(TokenKind::TemplateExprEnd) && lookahead == Some(EXPR_END) {
        return Mode::ExprEnd;
    }
    if in_singleline {
        Mode::SingleLine
    } else if in_multiline {
        Mode::MultiLine
    } else {
        Mode::Reject
    }
}

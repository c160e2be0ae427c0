/// The character cursor the scanner reads from.
///
/// This is the host's view of the input, shaped after tree-sitter's
/// `TSLexer`. The scanner only moves forward. Characters passed with
/// [`advance`](Lexer::advance) belong to the token; characters passed with
/// [`skip`](Lexer::skip) before the first `advance` are excluded from it.
/// The token ends at the last [`mark_end`](Lexer::mark_end) call; the
/// scanner always marks before reporting a token, and anything read after
/// the mark is lookahead only.
pub trait Lexer {
    /// The next code point, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Moves past the lookahead, making it part of the token.
    fn advance(&mut self);

    /// Moves past the lookahead, leaving it out of the token.
    fn skip(&mut self);

    /// Commits the current position as the end of the token.
    fn mark_end(&mut self);

    /// Whether the input is exhausted.
    fn eof(&self) -> bool {
        self.lookahead().is_none()
    }
}

impl<L: Lexer + ?Sized> Lexer for &mut L {
    #[inline]
    fn lookahead(&self) -> Option<char> {
        (**self).lookahead()
    }

    #[inline]
    fn advance(&mut self) {
        (**self).advance();
    }

    #[inline]
    fn skip(&mut self) {
        (**self).skip();
    }

    #[inline]
    fn mark_end(&mut self) {
        (**self).mark_end();
    }

    #[inline]
    fn eof(&self) -> bool {
        (**self).eof()
    }
}

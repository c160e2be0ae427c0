//! An in-memory cursor over a byte buffer.
//!
//! `SourceLexer` plays the host's side of the [`Lexer`] contract the way
//! tree-sitter does: a scan starts at the current position, characters
//! skipped before the first advance move the token start, and the token
//! ends at the last mark. A failed scan consumes nothing.
//!
//! Input is decoded as UTF-8 with `bstr`; an invalid sequence reads as a
//! single U+FFFD spanning the invalid prefix, so arbitrary bytes can be
//! scanned.

use bstr::{BStr, ByteSlice};

use crate::{Lexer, TokenKind, ValidSymbols, scanner};

/// A location in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Position {
    /// The start of the input.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    fn bump(&mut self, ch: char, len: usize) {
        self.offset += len;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// A half-open range of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Span {
    /// First position of the range.
    pub start: Position,
    /// Position just past the range.
    pub end: Position,
}

impl Span {
    /// Byte range of the span.
    #[must_use]
    pub fn range(&self) -> core::ops::Range<usize> {
        self.start.offset..self.end.offset
    }

    /// Whether the span covers no input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

/// A token recognised by [`SourceLexer::scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned<'src> {
    /// What was recognised.
    pub kind: TokenKind,
    /// Where it is.
    pub span: Span,
    /// The token's bytes.
    pub text: &'src BStr,
}

/// A [`Lexer`] over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct SourceLexer<'src> {
    src: &'src [u8],
    /// Read position.
    pos: Position,
    /// Start of the token being scanned.
    token_start: Position,
    /// Last committed token end.
    marked: Option<Position>,
    /// Whether the scan has advanced over any token character yet.
    advanced: bool,
}

impl<'src> SourceLexer<'src> {
    /// Creates a cursor at the start of `src`.
    pub fn new(src: &'src (impl AsRef<[u8]> + ?Sized)) -> Self {
        Self {
            src: src.as_ref(),
            pos: Position::START,
            token_start: Position::START,
            marked: None,
            advanced: false,
        }
    }

    /// The whole input.
    #[must_use]
    pub fn source(&self) -> &'src BStr {
        self.src.as_bstr()
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// The unread input.
    #[must_use]
    pub fn rest(&self) -> &'src BStr {
        self.src[self.pos.offset..].as_bstr()
    }

    /// The bytes covered by `span`.
    #[must_use]
    pub fn slice(&self, span: Span) -> &'src BStr {
        self.src[span.range()].as_bstr()
    }

    /// Whether the unread input starts with `prefix`.
    #[must_use]
    pub fn at(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix.as_bytes())
    }

    /// Consumes one character on the host's behalf, outside of any scan.
    /// Returns the character, or `None` at end of input.
    pub fn bump(&mut self) -> Option<char> {
        let (ch, len) = self.decode()?;
        self.pos.bump(ch, len);
        Some(ch)
    }

    /// Runs the scanner at the current position.
    ///
    /// On success the cursor moves to the end of the token. On failure it
    /// stays where it was.
    pub fn scan(&mut self, valid: ValidSymbols) -> Option<Scanned<'src>> {
        let origin = self.pos;
        self.token_start = origin;
        self.marked = None;
        self.advanced = false;

        let Some(kind) = scanner::scan(self, valid) else {
            self.pos = origin;
            return None;
        };

        // The scanner marks before it reports, but an unmarked token ends
        // where reading stopped, as in tree-sitter.
        let end = self.marked.unwrap_or(self.pos);
        let span = Span {
            start: self.token_start,
            end,
        };
        self.pos = end;
        Some(Scanned {
            kind,
            span,
            text: self.slice(span),
        })
    }

    fn decode(&self) -> Option<(char, usize)> {
        let rest = self.src.get(self.pos.offset..)?;
        if rest.is_empty() {
            return None;
        }
        let (ch, len) = bstr::decode_utf8(rest);
        Some((ch.unwrap_or(char::REPLACEMENT_CHARACTER), len.max(1)))
    }
}

impl Lexer for SourceLexer<'_> {
    fn lookahead(&self) -> Option<char> {
        self.decode().map(|(ch, _)| ch)
    }

    fn advance(&mut self) {
        if let Some((ch, len)) = self.decode() {
            self.pos.bump(ch, len);
            self.advanced = true;
        }
    }

    fn skip(&mut self) {
        if let Some((ch, len)) = self.decode() {
            self.pos.bump(ch, len);
            if !self.advanced {
                self.token_start = self.pos;
            }
        }
    }

    fn mark_end(&mut self) {
        self.marked = Some(self.pos);
    }

    fn eof(&self) -> bool {
        self.pos.offset >= self.src.len()
    }
}

//! A reference host for the scanner.
//!
//! The scanner only ever sees what a grammar hands it. `Tokenizer` stands
//! in for that grammar over whole source files, the way an editor
//! highlighter would: it finds template openers and free-form keywords in
//! ordinary text, lexes interpolated expressions itself, and offers the
//! scanner the kinds a real parse would accept at each step.

use alloc::{string::String, vec::Vec};

use bstr::{BStr, ByteSlice};

use crate::{
    ErrorKind, SourceLexer, Span, TokenKind, TokenizeError, TokenizerOptions, ValidSymbols, cook,
};

const SINGLELINE_OPEN: &str = "$\"";
const MULTILINE_OPEN: &str = "$|";

/// What a [`TemplateToken`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum TemplateTokenKind {
    /// A `$"` or `$|` opener, lexed by the host.
    Start {
        /// Whether the opener was `$|`.
        multiline: bool,
    },
    /// A token produced by the scanner.
    Scanned(TokenKind),
    /// The text of an interpolated expression, lexed by the host.
    Expression,
    /// The free-form keyword, lexed by the host.
    Keyword,
}

/// A token of a template literal or free-form keyword statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateToken<'src> {
    /// What the token is.
    pub kind: TemplateTokenKind,
    /// Where it is.
    pub span: Span,
    /// Its raw bytes.
    pub text: &'src BStr,
}

impl TemplateToken<'_> {
    /// The decoded value of a content token, or `None` for other tokens.
    #[must_use]
    pub fn cooked(&self) -> Option<String> {
        match self.kind {
            TemplateTokenKind::Scanned(TokenKind::SinglelineContent) => {
                Some(cook(self.text, false))
            }
            TemplateTokenKind::Scanned(TokenKind::MultilineContent) => Some(cook(self.text, true)),
            _ => None,
        }
    }
}

/// Tokenizes the template literals and free-form keyword statements of a
/// source file with default options.
///
/// ```rust
/// use templex::{TemplateTokenKind, TokenKind};
///
/// let tokens = templex::tokenize("x = $\"Hello {name}!\";").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         TemplateTokenKind::Start { multiline: false },
///         TemplateTokenKind::Scanned(TokenKind::SinglelineContent),
///         TemplateTokenKind::Scanned(TokenKind::SinglelineExprStart),
///         TemplateTokenKind::Expression,
///         TemplateTokenKind::Scanned(TokenKind::TemplateExprEnd),
///         TemplateTokenKind::Scanned(TokenKind::SinglelineContent),
///         TemplateTokenKind::Scanned(TokenKind::SinglelineEnd),
///     ]
/// );
/// ```
///
/// # Errors
///
/// See [`Tokenizer::tokenize`].
pub fn tokenize<S: AsRef<[u8]> + ?Sized>(src: &S) -> Result<Vec<TemplateToken<'_>>, TokenizeError> {
    Tokenizer::default().tokenize(src)
}

/// Drives the scanner over source files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    options: TokenizerOptions,
}

impl Tokenizer {
    /// Creates a tokenizer with the given options.
    #[must_use]
    pub fn new(options: TokenizerOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Tokenizes every template literal and free-form keyword statement in
    /// `src`. Text outside of them produces no tokens.
    ///
    /// # Errors
    ///
    /// Returns the first [`TokenizeError`]: a `$"..."` template cut off by
    /// the end of input, an interpolated expression left open, or a line
    /// break inside the expression of a `$"..."` template.
    pub fn tokenize<'src, S: AsRef<[u8]> + ?Sized>(
        &self,
        src: &'src S,
    ) -> Result<Vec<TemplateToken<'src>>, TokenizeError> {
        let mut run = Run {
            options: &self.options,
            lexer: SourceLexer::new(src),
            tokens: Vec::new(),
        };
        let result = run.source_text();

        #[cfg(any(test, feature = "fuzzing"))]
        if let Err(err) = &result {
            if self.options.panic_on_error {
                panic!("{err}");
            }
        }

        result.map(|()| run.tokens)
    }
}

/// One tokenizer pass over one source.
struct Run<'o, 'src> {
    options: &'o TokenizerOptions,
    lexer: SourceLexer<'src>,
    tokens: Vec<TemplateToken<'src>>,
}

impl<'src> Run<'_, 'src> {
    fn source_text(&mut self) -> Result<(), TokenizeError> {
        while !self.lexer.rest().is_empty() {
            if self.lexer.at(SINGLELINE_OPEN) {
                self.template(false)?;
            } else if self.lexer.at(MULTILINE_OPEN) {
                self.template(true)?;
            } else if let Some(keyword) = self.keyword_here() {
                self.freeform_statement(keyword);
            } else {
                self.lexer.bump();
            }
        }
        Ok(())
    }

    fn push(&mut self, kind: TemplateTokenKind, span: Span) {
        self.tokens.push(TemplateToken {
            kind,
            span,
            text: self.lexer.slice(span),
        });
    }

    /// Consumes `count` characters as one host token.
    fn host_token(&mut self, kind: TemplateTokenKind, count: usize) {
        let start = self.lexer.position();
        for _ in 0..count {
            self.lexer.bump();
        }
        let end = self.lexer.position();
        self.push(kind, Span { start, end });
    }

    fn template(&mut self, multiline: bool) -> Result<(), TokenizeError> {
        let start = self.lexer.position();
        self.host_token(TemplateTokenKind::Start { multiline }, 2);

        let mut valid = if multiline {
            ValidSymbols::MULTILINE
        } else {
            ValidSymbols::SINGLELINE
        };
        if !self.options.statement_blocks {
            valid.remove(ValidSymbols::MULTILINE_STMT_BLOCK | ValidSymbols::SINGLELINE_STMT_BLOCK);
        }

        loop {
            // A `$|` body always closes, at the latest at end of input. A
            // `$"` body fails only when the input runs out before its quote.
            let Some(token) = self.lexer.scan(valid) else {
                return Err(TokenizeError::at(ErrorKind::UnterminatedTemplate, start));
            };
            self.push(TemplateTokenKind::Scanned(token.kind), token.span);

            match token.kind {
                TokenKind::SinglelineEnd | TokenKind::MultilineEnd => return Ok(()),
                TokenKind::SinglelineExprStart | TokenKind::MultilineExprStart => {
                    self.expression(multiline)?;
                }
                _ => {}
            }
        }
    }

    /// Lexes an interpolated expression up to its closing `}` and lets the
    /// scanner take the brace.
    fn expression(&mut self, multiline: bool) -> Result<(), TokenizeError> {
        let start = self.lexer.position();
        let unclosed = || TokenizeError::at(ErrorKind::UnclosedExpression, start);
        let mut depth = 0u32;

        loop {
            let Some(ch) = self.lexer.rest().chars().next() else {
                return Err(unclosed());
            };
            match ch {
                '}' if depth == 0 => break,
                '{' => {
                    depth += 1;
                    self.lexer.bump();
                }
                '}' => {
                    depth -= 1;
                    self.lexer.bump();
                }
                '"' | '\'' => {
                    if !self.skip_quoted(ch) {
                        return Err(unclosed());
                    }
                }
                '/' if self.lexer.at("//") => {
                    while self.lexer.rest().first().is_some_and(|&b| b != b'\n') {
                        self.lexer.bump();
                    }
                }
                '/' if self.lexer.at("/*") => {
                    self.lexer.bump();
                    self.lexer.bump();
                    while !self.lexer.at("*/") {
                        if self.lexer.bump().is_none() {
                            return Err(unclosed());
                        }
                    }
                    self.lexer.bump();
                    self.lexer.bump();
                }
                '\n' if !multiline => {
                    return Err(TokenizeError::at(
                        ErrorKind::NewlineInExpression,
                        self.lexer.position(),
                    ));
                }
                _ => {
                    self.lexer.bump();
                }
            }
        }

        let end = self.lexer.position();
        if end.offset > start.offset {
            self.push(TemplateTokenKind::Expression, Span { start, end });
        }
        let token = self
            .lexer
            .scan(ValidSymbols::TEMPLATE_EXPR_END)
            .ok_or_else(unclosed)?;
        self.push(TemplateTokenKind::Scanned(token.kind), token.span);
        Ok(())
    }

    /// Skips a quoted literal, escapes included. Returns `false` if the
    /// input ends first.
    fn skip_quoted(&mut self, quote: char) -> bool {
        self.lexer.bump();
        loop {
            match self.lexer.bump() {
                None => return false,
                Some('\\') => {
                    self.lexer.bump();
                }
                Some(ch) if ch == quote => return true,
                Some(_) => {}
            }
        }
    }

    /// The free-form keyword, if it starts here as a whole word.
    fn keyword_here(&self) -> Option<&'static str> {
        let keyword = self.options.freeform_keyword?;
        if keyword.is_empty() || !self.lexer.at(keyword) {
            return None;
        }
        let offset = self.lexer.position().offset;
        let before = self.lexer.source()[..offset].chars().next_back();
        let after = self.lexer.rest()[keyword.len()..].chars().next();
        if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
            return None;
        }
        Some(keyword)
    }

    fn freeform_statement(&mut self, keyword: &str) {
        self.host_token(TemplateTokenKind::Keyword, keyword.chars().count());
        if let Some(token) = self.lexer.scan(ValidSymbols::KEYWORD_FREEFORM) {
            self.push(TemplateTokenKind::Scanned(token.kind), token.span);
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

use thiserror::Error;

use crate::Position;

/// A template that the reference tokenizer could not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct TokenizeError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// 1-based line of the offending position.
    pub line: usize,
    /// 1-based column of the offending position.
    pub column: usize,
    /// Byte offset of the offending position.
    pub offset: usize,
}

impl TokenizeError {
    pub(crate) fn at(kind: ErrorKind, position: Position) -> Self {
        Self {
            kind,
            line: position.line,
            column: position.column,
            offset: position.offset,
        }
    }
}

/// Why tokenizing stopped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input ended inside a `$"..."` template.
    #[error("unterminated template string")]
    UnterminatedTemplate,
    /// The input ended inside an interpolated expression.
    #[error("unclosed expression in template")]
    UnclosedExpression,
    /// A `$"..."` template's expression ran into a line break.
    #[error("newline in template expression")]
    NewlineInExpression,
}

//! A stateless external scanner for interpolated template string literals.
//!
//! The scanner is called by a host parser once per token, with a cursor over
//! the input and the set of token kinds the grammar would accept at that
//! point. It infers its mode from that set alone and recognises:
//!
//! - content runs, expression starts and terminators of single-line
//!   (`$"...{expr}..."`) and multi-line (`$|...` with `|` continuations)
//!   templates,
//! - `{{ ... }}` statement blocks, balancing braces around nested quoted
//!   literals,
//! - the `}` that closes an interpolated expression,
//! - free-form text following a keyword such as `TODO`.
//!
//! ```rust
//! use templex::{SourceLexer, TokenKind, ValidSymbols};
//!
//! let mut lexer = SourceLexer::new(b"hello {name}\"");
//! let token = lexer.scan(ValidSymbols::SINGLELINE).unwrap();
//! assert_eq!(token.kind, TokenKind::SinglelineContent);
//! assert_eq!(token.text, "hello ");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod trace;

mod error;
mod escape;
#[cfg(feature = "tree-sitter")]
pub mod ffi;
mod lexer;
mod options;
mod scanner;
mod source;
mod token;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, TokenizeError};
pub use escape::cook;
pub use lexer::Lexer;
pub use options::TokenizerOptions;
pub use scanner::{Mode, resolve_mode, scan};
pub use source::{Position, Scanned, SourceLexer, Span};
pub use token::{TokenKind, ValidSymbols};
pub use tokenizer::{TemplateToken, TemplateTokenKind, Tokenizer, tokenize};

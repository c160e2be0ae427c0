//! The tree-sitter external scanner ABI.
//!
//! Linking this crate into a tree-sitter grammar for the `xtc` language
//! replaces a hand-written `scanner.c`. The grammar's `externals` array must
//! list the [`TokenKind`]s in index order.
//!
//! The scanner is stateless, so the payload is null and serialization
//! writes nothing.

use core::{
    ffi::{c_char, c_void},
    marker::PhantomData,
    ptr::NonNull,
};

use crate::{Lexer, TokenKind, ValidSymbols, scan};

/// tree-sitter's lexer interface, laid out as in `tree_sitter/parser.h`.
#[repr(C)]
pub struct TSLexer {
    /// The current code point, or 0 at end of input.
    pub lookahead: i32,
    /// The symbol to report for the recognised token.
    pub result_symbol: u16,
    /// Advances the lexer; `skip` leaves the character out of the token.
    pub advance: unsafe extern "C" fn(*mut TSLexer, bool),
    /// Marks the current position as the end of the token.
    pub mark_end: unsafe extern "C" fn(*mut TSLexer),
    /// The current column.
    pub get_column: unsafe extern "C" fn(*mut TSLexer) -> u32,
    /// Whether the lexer is at the start of an included range.
    pub is_at_included_range_start: unsafe extern "C" fn(*const TSLexer) -> bool,
    /// Whether the lexer is at the end of input.
    pub eof: unsafe extern "C" fn(*const TSLexer) -> bool,
    /// Debug logging; unused by this scanner.
    pub log: Option<unsafe extern "C" fn(*const TSLexer, *const c_char, ...)>,
}

/// A [`Lexer`] over a host-provided [`TSLexer`].
///
/// The lexer is kept as a raw pointer. tree-sitter embeds `TSLexer` in a
/// larger struct and its callbacks reach past it, so the pointer handed
/// back to them must keep the provenance the host gave it.
pub struct HostLexer<'a> {
    raw: NonNull<TSLexer>,
    _lexer: PhantomData<&'a mut TSLexer>,
}

impl HostLexer<'_> {
    /// Wraps a lexer handed out by tree-sitter.
    ///
    /// # Safety
    ///
    /// `raw` must point to a live `TSLexer` whose callbacks accept `raw`
    /// itself as their argument for as long as the wrapper lives, and
    /// nothing else may access the lexer during that time.
    pub unsafe fn from_raw(raw: NonNull<TSLexer>) -> Self {
        Self {
            raw,
            _lexer: PhantomData,
        }
    }

    fn set_result_symbol(&mut self, symbol: u16) {
        // SAFETY: `from_raw` guarantees a live, unaliased lexer.
        unsafe { (*self.raw.as_ptr()).result_symbol = symbol }
    }
}

impl Lexer for HostLexer<'_> {
    fn lookahead(&self) -> Option<char> {
        if self.eof() {
            return None;
        }
        // SAFETY: `from_raw` guarantees a live lexer.
        let code = unsafe { (*self.raw.as_ptr()).lookahead };
        let code = u32::try_from(code).ok()?;
        Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn advance(&mut self) {
        let raw = self.raw.as_ptr();
        // SAFETY: `from_raw` guarantees the callback accepts this lexer.
        unsafe { ((*raw).advance)(raw, false) }
    }

    fn skip(&mut self) {
        let raw = self.raw.as_ptr();
        // SAFETY: as above.
        unsafe { ((*raw).advance)(raw, true) }
    }

    fn mark_end(&mut self) {
        let raw = self.raw.as_ptr();
        // SAFETY: as above.
        unsafe { ((*raw).mark_end)(raw) }
    }

    fn eof(&self) -> bool {
        let raw = self.raw.as_ptr();
        // SAFETY: as above.
        unsafe { ((*raw).eof)(raw.cast_const()) }
    }
}

/// Creates the (empty) scanner payload.
#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_xtc_external_scanner_create() -> *mut c_void {
    core::ptr::null_mut()
}

/// Destroys the scanner payload.
#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_xtc_external_scanner_destroy(_payload: *mut c_void) {}

/// Serializes the scanner state, of which there is none.
#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_xtc_external_scanner_serialize(
    _payload: *mut c_void,
    _buffer: *mut c_char,
) -> u32 {
    0
}

/// Restores the scanner state, of which there is none.
#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_xtc_external_scanner_deserialize(
    _payload: *mut c_void,
    _buffer: *const c_char,
    _length: u32,
) {
}

/// Scans one token.
///
/// # Safety
///
/// `lexer` must be a live tree-sitter lexer and `valid_symbols` must point
/// to at least as many `bool`s as there are [`TokenKind`]s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tree_sitter_xtc_external_scanner_scan(
    _payload: *mut c_void,
    lexer: *mut TSLexer,
    valid_symbols: *const bool,
) -> bool {
    if valid_symbols.is_null() {
        return false;
    }
    let Some(raw) = NonNull::new(lexer) else {
        return false;
    };
    // SAFETY: the caller provides one flag per external token.
    let table = unsafe { core::slice::from_raw_parts(valid_symbols, TokenKind::ALL.len()) };
    let valid = ValidSymbols::from_table(table);

    // SAFETY: the lexer comes straight from tree-sitter.
    let mut host = unsafe { HostLexer::from_raw(raw) };
    match scan(&mut host, valid) {
        Some(kind) => {
            host.set_result_symbol(kind.index());
            true
        }
        None => false,
    }
}

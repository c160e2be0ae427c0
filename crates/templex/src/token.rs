use core::fmt;

use bitflags::bitflags;

/// Token kinds produced by the scanner.
///
/// The discriminants are the indices of the host grammar's `externals`
/// array, so a `valid_symbols` table handed over by the host can be read
/// positionally (see [`ValidSymbols::from_table`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[repr(u16)]
pub enum TokenKind {
    /// Literal text of a `$"..."` template.
    SinglelineContent = 0,
    /// The `{` opening an interpolated expression in a `$"..."` template.
    SinglelineExprStart,
    /// The closing `"` of a `$"..."` template.
    SinglelineEnd,
    /// Literal text of a `$|...` template, continuation lines included.
    MultilineContent,
    /// The `{` opening an interpolated expression in a `$|...` template.
    MultilineExprStart,
    /// The newline (plus indentation) that ends a `$|...` template.
    MultilineEnd,
    /// The `}` closing an interpolated expression.
    TemplateExprEnd,
    /// A whole `{{ ... }}` statement block inside a `$|...` template.
    MultilineStmtBlock,
    /// A whole `{{ ... }}` statement block inside a `$"..."` template.
    SinglelineStmtBlock,
    /// Free text after a keyword, up to the end of the line.
    KeywordFreeformText,
    /// Free text after a keyword, up to a `;` on the same line.
    KeywordFreeformUntilSeparator,
}

impl TokenKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; 11] = [
        TokenKind::SinglelineContent,
        TokenKind::SinglelineExprStart,
        TokenKind::SinglelineEnd,
        TokenKind::MultilineContent,
        TokenKind::MultilineExprStart,
        TokenKind::MultilineEnd,
        TokenKind::TemplateExprEnd,
        TokenKind::MultilineStmtBlock,
        TokenKind::SinglelineStmtBlock,
        TokenKind::KeywordFreeformText,
        TokenKind::KeywordFreeformUntilSeparator,
    ];

    /// Index of this kind in the host's symbol table.
    #[must_use]
    pub const fn index(self) -> u16 {
        self as u16
    }

    /// Looks a kind up by its symbol table index.
    #[must_use]
    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The single-bit set holding just this kind.
    #[must_use]
    pub const fn symbol(self) -> ValidSymbols {
        ValidSymbols::from_bits_retain(1 << self as u16)
    }

    /// Snake-case name as it appears in the grammar.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::SinglelineContent => "singleline_content",
            TokenKind::SinglelineExprStart => "singleline_expr_start",
            TokenKind::SinglelineEnd => "singleline_end",
            TokenKind::MultilineContent => "multiline_content",
            TokenKind::MultilineExprStart => "multiline_expr_start",
            TokenKind::MultilineEnd => "multiline_end",
            TokenKind::TemplateExprEnd => "template_expr_end",
            TokenKind::MultilineStmtBlock => "multiline_stmt_block",
            TokenKind::SinglelineStmtBlock => "singleline_stmt_block",
            TokenKind::KeywordFreeformText => "keyword_freeform_text",
            TokenKind::KeywordFreeformUntilSeparator => "keyword_freeform_until_separator",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// The token kinds the host would accept at the current position.
    ///
    /// One bit per [`TokenKind`], at the kind's index.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ValidSymbols: u16 {
        /// [`TokenKind::SinglelineContent`].
        const SINGLELINE_CONTENT = 1 << 0;
        /// [`TokenKind::SinglelineExprStart`].
        const SINGLELINE_EXPR_START = 1 << 1;
        /// [`TokenKind::SinglelineEnd`].
        const SINGLELINE_END = 1 << 2;
        /// [`TokenKind::MultilineContent`].
        const MULTILINE_CONTENT = 1 << 3;
        /// [`TokenKind::MultilineExprStart`].
        const MULTILINE_EXPR_START = 1 << 4;
        /// [`TokenKind::MultilineEnd`].
        const MULTILINE_END = 1 << 5;
        /// [`TokenKind::TemplateExprEnd`].
        const TEMPLATE_EXPR_END = 1 << 6;
        /// [`TokenKind::MultilineStmtBlock`].
        const MULTILINE_STMT_BLOCK = 1 << 7;
        /// [`TokenKind::SinglelineStmtBlock`].
        const SINGLELINE_STMT_BLOCK = 1 << 8;
        /// [`TokenKind::KeywordFreeformText`].
        const KEYWORD_FREEFORM_TEXT = 1 << 9;
        /// [`TokenKind::KeywordFreeformUntilSeparator`].
        const KEYWORD_FREEFORM_UNTIL_SEPARATOR = 1 << 10;

        /// Every kind a `$"..."` template body can produce.
        const SINGLELINE = Self::SINGLELINE_CONTENT.bits()
            | Self::SINGLELINE_EXPR_START.bits()
            | Self::SINGLELINE_END.bits()
            | Self::SINGLELINE_STMT_BLOCK.bits();
        /// Every kind a `$|...` template body can produce.
        const MULTILINE = Self::MULTILINE_CONTENT.bits()
            | Self::MULTILINE_EXPR_START.bits()
            | Self::MULTILINE_END.bits()
            | Self::MULTILINE_STMT_BLOCK.bits();
        /// Both free-form keyword variants.
        const KEYWORD_FREEFORM = Self::KEYWORD_FREEFORM_TEXT.bits()
            | Self::KEYWORD_FREEFORM_UNTIL_SEPARATOR.bits();
    }
}

impl ValidSymbols {
    /// Whether `kind` is accepted.
    #[inline]
    #[must_use]
    pub const fn accepts(self, kind: TokenKind) -> bool {
        self.contains(kind.symbol())
    }

    /// Builds the set from a host `valid_symbols` table indexed by
    /// [`TokenKind::index`]. Entries past the last kind are ignored.
    #[must_use]
    pub fn from_table(table: &[bool]) -> Self {
        TokenKind::ALL
            .iter()
            .zip(table)
            .filter(|&(_, &valid)| valid)
            .fold(Self::empty(), |set, (&kind, _)| set | kind.symbol())
    }

    /// Iterates the accepted kinds in index order.
    pub fn kinds(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(move |&kind| self.accepts(kind))
    }
}

impl From<TokenKind> for ValidSymbols {
    fn from(kind: TokenKind) -> Self {
        kind.symbol()
    }
}

impl FromIterator<TokenKind> for ValidSymbols {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | kind.symbol())
    }
}

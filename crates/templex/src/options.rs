/// Configuration for the reference [`Tokenizer`](crate::Tokenizer).
///
/// These options describe what the emulated host grammar accepts; the
/// scanner itself has no configuration.
///
/// # Examples
///
/// ```rust
/// use templex::{Tokenizer, TokenizerOptions};
///
/// let tokenizer = Tokenizer::new(TokenizerOptions {
///     statement_blocks: false,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Whether `{{ ... }}` statement blocks are accepted inside templates.
    ///
    /// When `false`, `{{` opens an ordinary expression whose text starts
    /// with `{`.
    ///
    /// # Default
    ///
    /// `true`
    pub statement_blocks: bool,

    /// The keyword whose trailing text is scanned as free-form text, matched
    /// as a whole word outside of templates. `None` disables free-form
    /// scanning.
    ///
    /// # Default
    ///
    /// `Some("TODO")`
    pub freeform_keyword: Option<&'static str>,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on failures.
    pub panic_on_error: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            statement_blocks: true,
            freeform_keyword: Some("TODO"),
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

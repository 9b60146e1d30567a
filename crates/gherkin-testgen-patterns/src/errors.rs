//! Error types shared by the pattern modules.

use thiserror::Error;

/// Errors surfaced while turning step patterns into compiled matchers.
///
/// # Examples
/// ```
/// use gherkin_testgen_patterns::compile_pattern;
///
/// assert!(compile_pattern("I have {count} cukes").is_ok());
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The generated expression was rejected by the regex engine.
    ///
    /// Placeholder substitution happens before literal escaping, so this can
    /// only arise from pathological inputs (for example a pattern whose
    /// compiled form exceeds the engine's size limit).
    #[error("failed to compile step pattern `{pattern}`: {source}")]
    Regex {
        /// The offending pattern text.
        pattern: String,
        /// The underlying engine error.
        #[source]
        source: regex::Error,
    },
}

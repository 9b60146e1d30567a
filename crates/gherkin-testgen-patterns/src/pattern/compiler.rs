//! Convert lexed patterns into anchored, case-insensitive matchers.

use regex::Regex;

use crate::errors::PatternError;

use super::lexer::{Token, lex_pattern};

/// Capture group accepting either a double-quoted phrase (which may contain
/// spaces) or a run of non-whitespace. The quotes are part of the capture.
const ARGUMENT_GROUP: &str = r#"("[^"]*"|\S+)"#;

/// Translate a step pattern into anchored regular-expression source.
///
/// Placeholders are lexed out before any literal text is escaped, so regex
/// metacharacters in the surrounding literals can never mangle placeholder
/// syntax. Matching is case-insensitive and anchored start-to-end.
///
/// # Examples
/// ```
/// use gherkin_testgen_patterns::build_regex_from_pattern;
///
/// let source = build_regex_from_pattern("I have {count} cukes");
/// assert!(source.starts_with("(?i)^"));
/// assert!(source.ends_with('$'));
/// assert!(source.contains(r#"("[^"]*"|\S+)"#));
/// ```
#[must_use]
pub fn build_regex_from_pattern(pattern: &str) -> String {
    let tokens = lex_pattern(pattern);
    let mut source = String::with_capacity(pattern.len().saturating_mul(2) + 6);
    source.push_str("(?i)^");
    for token in tokens {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(&text)),
            Token::Placeholder(_) => source.push_str(ARGUMENT_GROUP),
        }
    }
    source.push('$');
    source
}

/// Compile a step pattern into a reusable matcher.
///
/// # Errors
/// Returns [`PatternError`] when the regex engine rejects the generated
/// source. Callers treat such definitions as never matching.
pub fn compile_pattern(pattern: &str) -> Result<Regex, PatternError> {
    let source = build_regex_from_pattern(pattern);
    Regex::new(&source).map_err(|err| PatternError::Regex {
        pattern: pattern.to_string(),
        source: err,
    })
}

/// Ordered placeholder names appearing in a pattern.
///
/// Duplicate names are returned as-is; the catalog treats them as an input
/// defect of the step definition.
#[must_use]
pub fn placeholder_names(pattern: &str) -> Vec<String> {
    lex_pattern(pattern)
        .into_iter()
        .filter_map(|token| match token {
            Token::Placeholder(name) => Some(name),
            Token::Literal(_) => None,
        })
        .collect()
}

//! Capture extraction for compiled step matchers.

use regex::Regex;

/// Extract the ordered capture-group values for a concrete step text.
///
/// Returns `None` when `text` does not match. Capture group 0 (the whole
/// match) is ignored; quoted captures keep their surrounding quotes.
///
/// # Examples
/// ```
/// use gherkin_testgen_patterns::{compile_pattern, extract_captured_values};
///
/// let regex = compile_pattern("I have {count} {item}")
///     .expect("example ensures fallible call succeeds");
/// let values = extract_captured_values(&regex, r#"I have 3 "gold coins""#)
///     .expect("example ensures fallible call succeeds");
/// assert_eq!(values, vec!["3".to_string(), "\"gold coins\"".to_string()]);
/// ```
#[must_use]
pub fn extract_captured_values(re: &Regex, text: &str) -> Option<Vec<String>> {
    let caps = re.captures(text)?;
    let mut values = Vec::with_capacity(caps.len().saturating_sub(1));
    for capture in caps.iter().skip(1) {
        values.push(capture.map_or_else(String::new, |m| m.as_str().to_string()));
    }
    Some(values)
}

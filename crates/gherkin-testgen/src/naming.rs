//! Identifier derivation for generated methods.

/// Derive a method identifier from free-form text.
///
/// Splits on spaces, hyphens and underscores, uppercases the first character
/// of each token, concatenates, and strips anything non-alphanumeric.
///
/// Host-language identifier rules go beyond "alphanumeric": a scenario title
/// may start with a digit or be entirely punctuation. Rather than renaming
/// silently, the escape policy is pinned here: an empty result or one that
/// starts with a digit gains a leading underscore.
///
/// # Examples
/// ```
/// use gherkin_testgen::naming::generated_method_name;
///
/// assert_eq!(generated_method_name("I have an account"), "IHaveAnAccount");
/// assert_eq!(generated_method_name("log-in as_admin"), "LogInAsAdmin");
/// assert_eq!(generated_method_name("7 dwarves"), "_7Dwarves");
/// ```
#[must_use]
pub fn generated_method_name(text: &str) -> String {
    let mut name = String::with_capacity(text.len());
    for token in text.split([' ', '-', '_']) {
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name.retain(char::is_alphanumeric);
    if name.is_empty() || name.starts_with(|c: char| c.is_numeric()) {
        name.insert(0, '_');
    }
    name
}

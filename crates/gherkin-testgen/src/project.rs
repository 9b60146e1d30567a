//! Project-level defaults supplied by the host analyser.

/// The designated base class for generated test classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBase {
    /// Class name without its namespace.
    pub simple_name: String,
    /// Namespace the class lives in; never empty when a base is supplied.
    pub namespace: String,
    /// Fully qualified name, kept for the host's own bookkeeping.
    pub full_name: String,
}

/// Defaults merged beneath explicit feature tags; tags always win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// Namespace for generated classes when no `@namespace:` tag is present.
    pub generated_namespace: Option<String>,
    /// Base class applied when no `@baseclass:` tag is present.
    pub default_test_base: Option<TestBase>,
    /// Override for the utility import; `None` selects
    /// [`DEFAULT_UTILITY_NAMESPACE`](crate::DEFAULT_UTILITY_NAMESPACE).
    pub utility_namespace: Option<String>,
}

impl ProjectMetadata {
    /// The namespace imported whenever data tables or stubs are generated.
    #[must_use]
    pub fn utility_import(&self) -> &str {
        self.utility_namespace
            .as_deref()
            .unwrap_or(crate::DEFAULT_UTILITY_NAMESPACE)
    }
}

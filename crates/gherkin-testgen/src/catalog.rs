//! Step-definition catalog and two-phase lookup.

use std::sync::OnceLock;

use gherkin_testgen_patterns::{StepKind, compile_pattern, extract_captured_values};
use regex::Regex;

/// A single named, typed parameter of a step definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepParam {
    /// Parameter name as declared on the step method.
    pub name: String,
    /// Declared type name, compared case-insensitively.
    pub ty: String,
}

impl StepParam {
    /// Build a parameter from its name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// Whether this parameter receives the step's data table.
    #[must_use]
    pub fn is_data_table(&self) -> bool {
        self.ty.eq_ignore_ascii_case("DataTable")
    }
}

/// A step definition discovered by the host-project analyser.
///
/// The pattern may contain `{name}` placeholders; each placeholder
/// corresponds, in order, to one non-data-table parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    /// The normalised keyword this definition answers to.
    pub kind: StepKind,
    /// Pattern text matched against step texts.
    pub pattern: String,
    /// Name of the implementing method.
    pub method_name: String,
    /// Class declaring the method.
    pub owner_class: String,
    /// Namespace of the owning class.
    pub owner_namespace: String,
    /// Ordered parameter list, placeholders first, data table last.
    pub params: Vec<StepParam>,
}

impl StepDefinition {
    /// Parameters filled from captured step-text tokens, excluding any data
    /// table.
    pub fn value_params(&self) -> impl Iterator<Item = &StepParam> {
        self.params.iter().filter(|param| !param.is_data_table())
    }

    /// Whether the definition takes the step's data table.
    #[must_use]
    pub fn has_data_table_param(&self) -> bool {
        self.params.iter().any(StepParam::is_data_table)
    }
}

#[derive(Debug)]
struct CatalogEntry {
    definition: StepDefinition,
    matcher: OnceLock<Option<Regex>>,
}

impl CatalogEntry {
    /// Lazily compiled matcher; `None` when compilation failed, in which
    /// case the definition never matches.
    fn matcher(&self) -> Option<&Regex> {
        self.matcher
            .get_or_init(|| match compile_pattern(&self.definition.pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    log::warn!("step definition will never match: {err}");
                    None
                }
            })
            .as_ref()
    }
}

/// A catalog hit: the winning definition plus its ordered raw capture
/// tokens (empty for parameterless exact matches).
#[derive(Debug)]
pub struct StepMatch<'a> {
    /// The definition that accepted the step text.
    pub definition: &'a StepDefinition,
    /// Raw captured substrings, in placeholder order.
    pub captures: Vec<String>,
}

/// Insertion-ordered collection of step definitions.
///
/// Immutable after construction; lookups take `&self`, so one catalog may
/// serve any number of parallel invocations.
#[derive(Debug, Default)]
pub struct StepCatalog {
    entries: Vec<CatalogEntry>,
}

impl StepCatalog {
    /// Build a catalog preserving the analyser's definition order.
    #[must_use]
    pub fn new(definitions: Vec<StepDefinition>) -> Self {
        let entries = definitions
            .into_iter()
            .map(|definition| CatalogEntry {
                definition,
                matcher: OnceLock::new(),
            })
            .collect();
        Self { entries }
    }

    /// Number of definitions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the definition matching a normalised keyword and step text.
    ///
    /// Resolution is deterministic: definitions of the queried kind are
    /// scanned in insertion order, first for a parameterless pattern equal
    /// to the text case-insensitively, then for the first compiled matcher
    /// accepting the text. Definitions whose pattern fails to compile never
    /// match.
    #[must_use]
    pub fn find(&self, kind: StepKind, text: &str) -> Option<StepMatch<'_>> {
        let candidates = || {
            self.entries
                .iter()
                .filter(move |entry| entry.definition.kind == kind)
        };
        for entry in candidates() {
            if entry.definition.params.is_empty()
                && entry.definition.pattern.eq_ignore_ascii_case(text)
            {
                return Some(StepMatch {
                    definition: &entry.definition,
                    captures: Vec::new(),
                });
            }
        }
        for entry in candidates() {
            if entry.definition.params.is_empty() {
                continue;
            }
            let Some(regex) = entry.matcher() else {
                continue;
            };
            if let Some(captures) = extract_captured_values(regex, text) {
                return Some(StepMatch {
                    definition: &entry.definition,
                    captures,
                });
            }
        }
        None
    }
}

impl FromIterator<StepDefinition> for StepCatalog {
    fn from_iter<I: IntoIterator<Item = StepDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

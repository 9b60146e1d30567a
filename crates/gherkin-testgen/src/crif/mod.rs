//! The Code-Ready Intermediate Form: the template-ready record produced by
//! the assembler.
//!
//! The tree is strictly ownership-shaped: a [`Feature`] owns everything
//! below it and nothing points back up. Serialised field names are camelCase
//! and form the public contract: the template engine addresses them by name
//! (case-insensitively), and the same serialisation is emitted as the JSON
//! debug artifact.

mod ordered_set;

pub use ordered_set::OrderedSet;

use gherkin_testgen_patterns::{DisplayKeyword, StepKind};
use serde::Serialize;

/// Root of the code model for one feature file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Deduplicated imports in first-seen order.
    pub usings: OrderedSet,
    /// Namespace of the generated class; empty when neither tags nor project
    /// defaults supplied one.
    pub namespace: String,
    /// Feature file's base name without extension, copied verbatim.
    pub file_name: String,
    /// The feature's title.
    pub feature_name: String,
    /// Trimmed, non-empty lines of the feature description.
    pub description_lines: Vec<String>,
    /// Base class of the generated test class; may be empty.
    pub base_class: String,
    /// Deduplicated step-class names in first-seen order.
    pub classes: OrderedSet,
    /// Shared steps run before every scenario.
    pub background: Option<Background>,
    /// Scenario groups; a default rule collects scenarios outside any
    /// Gherkin rule.
    pub rules: Vec<Rule>,
    /// Stub descriptors for steps with no matching definition,
    /// deduplicated by keyword and pattern text.
    pub unimplemented: Vec<UnimplementedStep>,
}

impl Feature {
    /// Serialise the model as the pretty-printed JSON debug artifact.
    ///
    /// # Errors
    /// Returns the underlying serialisation error, which cannot occur for
    /// models produced by the assembler.
    pub fn debug_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Steps shared by every scenario of the feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    /// Processed background steps.
    pub steps: Vec<Step>,
}

/// A named group of scenarios.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Rule title, or the default rule name.
    pub name: String,
    /// Rule description; empty for the default rule.
    pub description: String,
    /// Scenarios in document order.
    pub scenarios: Vec<Scenario>,
}

/// One scenario or scenario outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario title as written.
    pub name: String,
    /// Identifier of the generated test method.
    pub method: String,
    /// Scenario description, if the author wrote one.
    pub remarks: Option<String>,
    /// Whether the test is marked for manual runs only.
    pub is_explicit: bool,
    /// Reason attached to the explicit marking, from a tag or from stub
    /// synthesis; a tag-supplied value is never overwritten.
    pub explicit_reason: Option<String>,
    /// Outline parameters, one per Examples header cell.
    pub parameters: Vec<Parameter>,
    /// Outline test cases, one quoted-and-joined row each.
    pub test_cases: Vec<String>,
    /// Processed steps in document order.
    pub steps: Vec<Step>,
}

/// One processed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Keyword exactly as written (`And`/`But` preserved).
    pub keyword: DisplayKeyword,
    /// Step text as written.
    pub text: String,
    /// Step-class field receiving the call, or the stub-owner sentinel.
    pub owner: String,
    /// Method invoked on the owner.
    pub method: String,
    /// Call arguments in declaration order.
    pub arguments: Vec<Argument>,
    /// The step's data table, when one is attached.
    pub data_table: Option<DataTable>,
}

/// A single rendered call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    /// Source text of the argument.
    pub value: String,
    /// Set on the final argument so a logic-less template can place
    /// separators.
    pub is_last: bool,
}

impl Argument {
    /// Create a non-final argument; [`mark_last_argument`] flags the last.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_last: false,
        }
    }
}

/// A data table attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    /// Local variable holding the table: `table1`, `table2`, … per
    /// scenario or background.
    pub variable_name: String,
    /// Header row cells.
    pub headers: Vec<String>,
    /// Data rows; every row has the header's width.
    pub rows: Vec<Vec<String>>,
}

/// A declared parameter of an outline method or stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Declared type name.
    #[serde(rename = "type")]
    pub ty: String,
    /// Parameter name.
    pub name: String,
    /// Set on the final parameter for separator placement.
    pub is_last: bool,
}

impl Parameter {
    /// Create a non-final parameter; [`mark_last_parameter`] flags the last.
    #[must_use]
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            is_last: false,
        }
    }
}

/// Descriptor of a stub synthesized for an unmatched step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnimplementedStep {
    /// The resolved keyword the stub answers to.
    pub normalized_keyword: StepKind,
    /// Pattern text with `{string<n>}`/`{value<n>}` placeholders.
    pub text: String,
    /// Identifier of the synthesized method.
    pub method: String,
    /// Inferred parameters in textual order, data table last.
    pub parameters: Vec<Parameter>,
}

/// Flag the final argument of a call, if any.
pub(crate) fn mark_last_argument(arguments: &mut [Argument]) {
    if let Some(last) = arguments.last_mut() {
        last.is_last = true;
    }
}

/// Flag the final parameter of a signature, if any.
pub(crate) fn mark_last_parameter(parameters: &mut [Parameter]) {
    if let Some(last) = parameters.last_mut() {
        last.is_last = true;
    }
}

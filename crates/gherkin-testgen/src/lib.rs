//! Core pipeline turning parsed Gherkin features into test-class source.
//!
//! The crate is the generator's core only. It consumes a parsed
//! [`gherkin::Feature`], a [`StepCatalog`] of definitions discovered by the
//! host-project analyser, [`ProjectMetadata`] defaults, and a Mustache-family
//! template, and produces the rendered source text plus the serialisable
//! code model ([`crif`]) and caller-facing [`Diagnostic`]s. Parsing feature
//! files, analysing the host project, writing output, and reporting
//! diagnostics all belong to the caller.
//!
//! One invocation processes one feature document end-to-end, in document
//! order, with no shared mutable state; the same catalog and metadata may
//! serve any number of parallel invocations.

mod assembler;
mod cancel;
mod catalog;
mod diagnostics;
mod errors;
mod project;

pub mod crif;
pub mod naming;
pub mod render;

pub use assembler::{Assembly, assemble};
pub use cancel::CancelToken;
pub use catalog::{StepCatalog, StepDefinition, StepMatch, StepParam};
pub use diagnostics::{Diagnostic, Severity};
pub use errors::GenerateError;
pub use gherkin_testgen_patterns::{DisplayKeyword, KeywordParseError, PatternError, StepKind};
pub use project::{ProjectMetadata, TestBase};
pub use render::RenderError;

/// Utility import added once whenever data tables or stubs are present.
pub const DEFAULT_UTILITY_NAMESPACE: &str = "Gherkin.Generator.Utils";

/// Owner sentinel meaning "a stub on the generated test class itself".
pub const STUB_OWNER: &str = "this";

/// Name of the rule synthesized for scenarios outside any Gherkin rule.
pub const DEFAULT_RULE_NAME: &str = "All scenarios";

/// Reason recorded when stub synthesis marks a scenario explicit.
pub const DEFAULT_STUB_REASON: &str = "steps_in_progress";

/// Output of one full generator invocation.
#[derive(Debug)]
pub struct Generated {
    /// The rendered source text.
    pub source: String,
    /// The assembled code model, kept for the debug artifact.
    pub feature: crif::Feature,
    /// Diagnostics gathered while assembling.
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated {
    /// Pretty-printed JSON debug artifact of the code model, suitable for
    /// emission alongside the generated source.
    ///
    /// # Errors
    /// Returns the underlying serialisation error, which cannot occur for
    /// models produced by [`assemble`].
    pub fn crif_json(&self) -> serde_json::Result<String> {
        self.feature.debug_json()
    }
}

/// Assemble a feature's code model and render it against `template`.
///
/// The cancellation token is checked before each scenario and once more
/// before rendering; a cancelled invocation emits nothing.
///
/// # Errors
/// Returns [`GenerateError`] on cancellation, unknown step keywords,
/// malformed data tables, or template failures.
pub fn generate(
    feature: &gherkin::Feature,
    file_name: &str,
    template: &str,
    catalog: &StepCatalog,
    project: &ProjectMetadata,
    cancel: &CancelToken,
) -> Result<Generated, GenerateError> {
    let Assembly {
        feature: model,
        diagnostics,
    } = assemble(feature, file_name, catalog, project, cancel)?;
    if cancel.is_cancelled() {
        return Err(GenerateError::Cancelled {
            feature: feature.name.clone(),
        });
    }
    log::debug!(
        "rendering feature `{}` ({} unimplemented)",
        model.feature_name,
        model.unimplemented.len()
    );
    let source = render::render_model(template, &model).map_err(|source| GenerateError::Render {
        feature: feature.name.clone(),
        source,
    })?;
    Ok(Generated {
        source,
        feature: model,
        diagnostics,
    })
}

//! Feature-level failures surfaced by the generator core.

use thiserror::Error;

use crate::render::RenderError;

/// Errors that abort a whole feature; no partial output is emitted.
///
/// Scenario-scoped problems (a malformed Examples table) and step-scoped
/// problems (no matching definition, a pattern that fails to compile) are
/// handled locally and never reach this type.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The host requested cancellation.
    #[error("generation of feature `{feature}` was cancelled")]
    Cancelled {
        /// Feature whose processing was abandoned.
        feature: String,
    },
    /// A step used a keyword outside Given/When/Then/And/But.
    #[error("feature `{feature}`: unknown step keyword `{keyword}`")]
    UnknownKeyword {
        /// Feature containing the step.
        feature: String,
        /// The unrecognised keyword text.
        keyword: String,
    },
    /// A data table's rows disagree on width.
    #[error("feature `{feature}`: malformed data table on step `{step}`")]
    MalformedDataTable {
        /// Feature containing the step.
        feature: String,
        /// Text of the step carrying the table.
        step: String,
    },
    /// The template failed to parse or render.
    #[error("feature `{feature}`: {source}")]
    Render {
        /// Feature being rendered.
        feature: String,
        /// The underlying template failure.
        #[source]
        source: RenderError,
    },
}

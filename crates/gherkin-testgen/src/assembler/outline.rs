//! Examples extraction for scenario outlines.

use thiserror::Error;

use crate::crif;

/// Headers and flattened data rows of a scenario's Examples blocks.
pub(crate) struct ExampleTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

/// Scenario-scoped Examples failures; the scenario is dropped with an error
/// diagnostic while the rest of the feature continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ExamplesError {
    #[error("Scenario Outline has no Examples table")]
    MissingTable,
    #[error("Examples table has an empty header row")]
    EmptyHeader,
    #[error("Examples row width {found} does not match header width {expected}")]
    WidthMismatch { expected: usize, found: usize },
}

fn is_outline(scenario: &gherkin::Scenario) -> bool {
    scenario.keyword == "Scenario Outline" || !scenario.examples.is_empty()
}

/// Extract examples data from a scenario when it is an outline.
///
/// Parameters come from the first block's header; data rows of every block
/// contribute test cases. Each block's header and every data row must have
/// the first header's width.
pub(crate) fn extract_examples(
    scenario: &gherkin::Scenario,
) -> Result<Option<ExampleTable>, ExamplesError> {
    if !is_outline(scenario) {
        return Ok(None);
    }
    let tables: Vec<&gherkin::Table> = scenario
        .examples
        .iter()
        .filter_map(|examples| examples.table.as_ref())
        .collect();
    let headers = tables
        .first()
        .and_then(|table| table.rows.first())
        .cloned()
        .ok_or(ExamplesError::MissingTable)?;
    if headers.is_empty() {
        return Err(ExamplesError::EmptyHeader);
    }
    let mut rows = Vec::new();
    for table in &tables {
        for (index, row) in table.rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ExamplesError::WidthMismatch {
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            if index > 0 {
                rows.push(row.clone());
            }
        }
    }
    Ok(Some(ExampleTable { headers, rows }))
}

impl ExampleTable {
    /// One `string` parameter per header cell, last one flagged.
    pub(crate) fn parameters(&self) -> Vec<crif::Parameter> {
        let mut parameters: Vec<crif::Parameter> = self
            .headers
            .iter()
            .map(|header| crif::Parameter::new("string", header.clone()))
            .collect();
        crif::mark_last_parameter(&mut parameters);
        parameters
    }

    /// One test case per data row: cells double-quoted and comma-joined.
    pub(crate) fn test_cases(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| format!("\"{cell}\""))
                    .collect::<Vec<String>>()
                    .join(", ")
            })
            .collect()
    }
}

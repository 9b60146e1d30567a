//! CRIF assembly: one walk over the parsed Gherkin document.

mod outline;
mod steps;
mod stub;
mod tags;

use gherkin_testgen_patterns::StepKind;
use hashbrown::HashSet;

use crate::cancel::CancelToken;
use crate::catalog::StepCatalog;
use crate::crif;
use crate::diagnostics::Diagnostic;
use crate::errors::GenerateError;
use crate::naming::generated_method_name;
use crate::project::ProjectMetadata;

/// The assembled code model plus the diagnostics gathered along the way.
#[derive(Debug)]
pub struct Assembly {
    /// The fully resolved model, ready for rendering.
    pub feature: crif::Feature,
    /// Errors for dropped scenarios and warnings for generated stubs.
    pub diagnostics: Vec<Diagnostic>,
}

/// Walk a parsed feature once and produce its code model.
///
/// Iteration follows document order throughout; `catalog` and `project` are
/// never mutated. The token is checked before each scenario.
///
/// # Errors
/// Returns [`GenerateError`] on cancellation, on a step keyword outside the
/// five Gherkin keywords, or on a data table with ragged rows. No partial
/// model is produced in those cases.
pub fn assemble(
    feature: &gherkin::Feature,
    file_name: &str,
    catalog: &StepCatalog,
    project: &ProjectMetadata,
    cancel: &CancelToken,
) -> Result<Assembly, GenerateError> {
    let mut assembler = Assembler::new(file_name, catalog, project);
    assembler.walk(feature, cancel)?;
    Ok(assembler.finish())
}

struct Assembler<'a> {
    catalog: &'a StepCatalog,
    project: &'a ProjectMetadata,
    feature: crif::Feature,
    diagnostics: Vec<Diagnostic>,
    stub_keys: HashSet<(StepKind, String)>,
    saw_data_table: bool,
}

/// State carried across one independent step sequence: the keyword context
/// and the data-table counter. Each background and each scenario starts
/// fresh.
struct StepSequence {
    context: StepKind,
    tables: usize,
}

impl StepSequence {
    fn new() -> Self {
        Self {
            context: StepKind::Given,
            tables: 0,
        }
    }

    fn next_table_name(&mut self) -> String {
        self.tables += 1;
        format!("table{}", self.tables)
    }
}

impl<'a> Assembler<'a> {
    fn new(file_name: &str, catalog: &'a StepCatalog, project: &'a ProjectMetadata) -> Self {
        Self {
            catalog,
            project,
            feature: crif::Feature {
                file_name: file_name.to_string(),
                ..crif::Feature::default()
            },
            diagnostics: Vec::new(),
            stub_keys: HashSet::new(),
            saw_data_table: false,
        }
    }

    fn walk(
        &mut self,
        feature: &gherkin::Feature,
        cancel: &CancelToken,
    ) -> Result<(), GenerateError> {
        self.feature.feature_name = feature.name.clone();
        self.feature.description_lines = description_lines(feature.description.as_deref());
        tags::apply_feature_tags(&mut self.feature, &feature.tags);
        tags::apply_project_defaults(&mut self.feature, self.project);

        if let Some(background) = &feature.background {
            let mut sequence = StepSequence::new();
            let mut background_steps = Vec::with_capacity(background.steps.len());
            for step in &background.steps {
                background_steps.push(self.process_step(step, &mut sequence)?.step);
            }
            self.feature.background = Some(crif::Background {
                steps: background_steps,
            });
        }

        if !feature.scenarios.is_empty() {
            let scenarios = self.process_scenarios(&feature.scenarios, cancel)?;
            self.feature.rules.push(crif::Rule {
                name: crate::DEFAULT_RULE_NAME.to_string(),
                description: String::new(),
                scenarios,
            });
        }
        for rule in &feature.rules {
            let scenarios = self.process_scenarios(&rule.scenarios, cancel)?;
            self.feature.rules.push(crif::Rule {
                name: rule.name.clone(),
                description: rule.description.clone().unwrap_or_default(),
                scenarios,
            });
        }
        Ok(())
    }

    fn process_scenarios(
        &mut self,
        scenarios: &[gherkin::Scenario],
        cancel: &CancelToken,
    ) -> Result<Vec<crif::Scenario>, GenerateError> {
        let mut processed = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            if cancel.is_cancelled() {
                return Err(GenerateError::Cancelled {
                    feature: self.feature.feature_name.clone(),
                });
            }
            if let Some(model) = self.process_scenario(scenario)? {
                processed.push(model);
            }
        }
        Ok(processed)
    }

    fn process_scenario(
        &mut self,
        scenario: &gherkin::Scenario,
    ) -> Result<Option<crif::Scenario>, GenerateError> {
        let examples = match outline::extract_examples(scenario) {
            Ok(examples) => examples,
            Err(err) => {
                self.diagnostics.push(Diagnostic::error(format!(
                    "scenario `{}` skipped: {err}",
                    scenario.name
                )));
                return Ok(None);
            }
        };

        let mut sequence = StepSequence::new();
        let mut processed_steps = Vec::with_capacity(scenario.steps.len());
        let mut any_unmatched = false;
        for step in &scenario.steps {
            let processed = self.process_step(step, &mut sequence)?;
            any_unmatched |= processed.unmatched;
            processed_steps.push(processed.step);
        }

        // A tag-supplied explicit marking (with or without a reason) is
        // never overwritten by stub synthesis.
        let (is_explicit, explicit_reason) = match tags::explicit_tag(&scenario.tags) {
            Some(reason) => (true, reason),
            None if any_unmatched => (true, Some(crate::DEFAULT_STUB_REASON.to_string())),
            None => (false, None),
        };

        let (parameters, test_cases) = examples
            .map(|table| (table.parameters(), table.test_cases()))
            .unwrap_or_default();

        Ok(Some(crif::Scenario {
            name: scenario.name.clone(),
            method: generated_method_name(&scenario.name),
            remarks: scenario.description.clone(),
            is_explicit,
            explicit_reason,
            parameters,
            test_cases,
            steps: processed_steps,
        }))
    }

    fn finish(mut self) -> Assembly {
        // Global property, decided once after the whole walk: double
        // emission would put a duplicate import in the generated source.
        if self.saw_data_table || !self.feature.unimplemented.is_empty() {
            self.feature.usings.insert(self.project.utility_import());
        }
        if !self.feature.unimplemented.is_empty() {
            let count = self.feature.unimplemented.len();
            self.diagnostics.push(Diagnostic::warning(format!(
                "feature `{}` has {count} unimplemented step(s); stubs were generated",
                self.feature.feature_name
            )));
        }
        Assembly {
            feature: self.feature,
            diagnostics: self.diagnostics,
        }
    }
}

fn description_lines(description: Option<&str>) -> Vec<String> {
    description
        .map(|text| {
            text.lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_lines_trim_and_drop_blanks() {
        let lines = description_lines(Some("  As a user\n\n  I want things  \n"));
        assert_eq!(lines, vec!["As a user".to_string(), "I want things".to_string()]);
        assert!(description_lines(None).is_empty());
    }

    #[test]
    fn table_names_are_sequential_per_sequence() {
        let mut sequence = StepSequence::new();
        assert_eq!(sequence.next_table_name(), "table1");
        assert_eq!(sequence.next_table_name(), "table2");
        let mut fresh = StepSequence::new();
        assert_eq!(fresh.next_table_name(), "table1");
    }
}

//! Per-step processing: catalog binding or stub synthesis.

use std::str::FromStr;

use gherkin_testgen_patterns::{DisplayKeyword, StepKind};

use crate::catalog::{StepMatch, StepParam};
use crate::crif;
use crate::errors::GenerateError;

use super::{Assembler, StepSequence, stub};

pub(super) struct ProcessedStep {
    pub(super) step: crif::Step,
    pub(super) unmatched: bool,
}

impl Assembler<'_> {
    pub(super) fn process_step(
        &mut self,
        step: &gherkin::Step,
        sequence: &mut StepSequence,
    ) -> Result<ProcessedStep, GenerateError> {
        let keyword =
            DisplayKeyword::from_str(&step.keyword).map_err(|err| GenerateError::UnknownKeyword {
                feature: self.feature.feature_name.clone(),
                keyword: err.0,
            })?;
        let kind = keyword.resolve(&mut sequence.context);
        let data_table = step
            .table
            .as_ref()
            .map(|table| self.convert_table(table, &step.value, sequence))
            .transpose()?;
        if data_table.is_some() {
            self.saw_data_table = true;
        }
        let catalog = self.catalog;
        match catalog.find(kind, &step.value) {
            Some(matched) => Ok(ProcessedStep {
                step: self.bind_step(step, keyword, &matched, data_table),
                unmatched: false,
            }),
            None => Ok(ProcessedStep {
                step: self.stub_step(step, keyword, kind, data_table),
                unmatched: true,
            }),
        }
    }

    /// Split a Gherkin table into header and body, rejecting ragged rows.
    fn convert_table(
        &self,
        table: &gherkin::Table,
        step_text: &str,
        sequence: &mut StepSequence,
    ) -> Result<crif::DataTable, GenerateError> {
        let mut rows = table.rows.iter();
        let Some(headers) = rows.next() else {
            return Err(self.malformed_table(step_text));
        };
        let mut body = Vec::new();
        for row in rows {
            if row.len() != headers.len() {
                return Err(self.malformed_table(step_text));
            }
            body.push(row.clone());
        }
        Ok(crif::DataTable {
            variable_name: sequence.next_table_name(),
            headers: headers.clone(),
            rows: body,
        })
    }

    fn malformed_table(&self, step_text: &str) -> GenerateError {
        GenerateError::MalformedDataTable {
            feature: self.feature.feature_name.clone(),
            step: step_text.to_string(),
        }
    }

    /// Matched branch: bind the step to its definition and record the
    /// owning class and namespace.
    fn bind_step(
        &mut self,
        step: &gherkin::Step,
        keyword: DisplayKeyword,
        matched: &StepMatch<'_>,
        data_table: Option<crif::DataTable>,
    ) -> crif::Step {
        let definition = matched.definition;
        debug_assert_eq!(
            matched.captures.len(),
            definition.value_params().count(),
            "captures must align with the definition's placeholder parameters",
        );
        let mut arguments: Vec<crif::Argument> = matched
            .captures
            .iter()
            .zip(definition.value_params())
            .map(|(token, param)| crif::Argument::new(argument_value(token, param)))
            .collect();
        if definition.has_data_table_param() {
            if let Some(table) = &data_table {
                arguments.push(crif::Argument::new(table.variable_name.clone()));
            }
        }
        crif::mark_last_argument(&mut arguments);
        self.feature.classes.insert(definition.owner_class.clone());
        self.feature
            .usings
            .insert(definition.owner_namespace.clone());
        crif::Step {
            keyword,
            text: step.value.clone(),
            owner: definition.owner_class.clone(),
            method: definition.method_name.clone(),
            arguments,
            data_table,
        }
    }

    /// Unmatched branch: synthesize a stub on the generated class itself.
    fn stub_step(
        &mut self,
        step: &gherkin::Step,
        keyword: DisplayKeyword,
        kind: StepKind,
        data_table: Option<crif::DataTable>,
    ) -> crif::Step {
        let stub::SynthesizedStub {
            pattern_text,
            method,
            parameters,
            argument_values,
        } = stub::synthesize(&step.value, data_table.is_some());
        let mut arguments: Vec<crif::Argument> =
            argument_values.into_iter().map(crif::Argument::new).collect();
        if let Some(table) = &data_table {
            arguments.push(crif::Argument::new(table.variable_name.clone()));
        }
        crif::mark_last_argument(&mut arguments);
        if self.stub_keys.insert((kind, pattern_text.clone())) {
            self.feature.unimplemented.push(crif::UnimplementedStep {
                normalized_keyword: kind,
                text: pattern_text,
                method: method.clone(),
                parameters,
            });
        }
        crif::Step {
            keyword,
            text: step.value.clone(),
            owner: crate::STUB_OWNER.to_string(),
            method,
            arguments,
            data_table,
        }
    }
}

/// Render one captured token as call-argument source text.
fn argument_value(token: &str, param: &StepParam) -> String {
    if let Some(name) = outline_placeholder(token) {
        return name.to_string();
    }
    if param.ty.eq_ignore_ascii_case("string") && !is_double_quoted(token) {
        return format!("\"{token}\"");
    }
    token.to_string()
}

/// `<name>` tokens parameterise against the outline's test-case signature.
fn outline_placeholder(token: &str) -> Option<&str> {
    token
        .strip_prefix('<')?
        .strip_suffix('>')
        .filter(|inner| !inner.is_empty())
}

fn is_double_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

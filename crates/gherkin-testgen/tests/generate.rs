//! End-to-end generation: feature text + catalog + template → source.

use gherkin_testgen::{
    CancelToken, GenerateError, ProjectMetadata, StepCatalog, StepDefinition, StepKind, StepParam,
    generate,
};

const TEMPLATE: &str = "\
{{#usings}}using {{.}};
{{/usings}}
namespace {{namespace}};

public class {{fileName}}Feature{{#baseClass}} : {{baseClass}}{{/baseClass}}
{
{{#rules}}    // {{name}}
{{#scenarios}}    public void {{method}}({{#parameters}}string {{name}}{{^isLast}}, {{/isLast}}{{/parameters}})
    {
{{#steps}}        {{owner}}.{{method}}({{#arguments}}{{value}}{{^isLast}}, {{/isLast}}{{/arguments}});
{{/steps}}    }
{{/scenarios}}{{/rules}}{{#unimplemented}}    // stub: {{normalizedKeyword}} {{text}}
    private void {{method}}({{#parameters}}{{type}} {{name}}{{^isLast}}, {{/isLast}}{{/parameters}}) { }
{{/unimplemented}}}
";

fn parse_feature(source: &str) -> gherkin::Feature {
    gherkin::Feature::parse(source, gherkin::GherkinEnv::default())
        .unwrap_or_else(|err| panic!("feature fixture should parse: {err}"))
}

fn account_catalog() -> StepCatalog {
    StepCatalog::new(vec![StepDefinition {
        kind: StepKind::Given,
        pattern: "I have an account named {account}".to_string(),
        method_name: "IHaveAnAccountNamed".to_string(),
        owner_class: "AccountSteps".to_string(),
        owner_namespace: "N.Steps".to_string(),
        params: vec![StepParam::new("account", "string")],
    }])
}

#[test]
fn renders_matched_and_stubbed_steps_into_source() {
    let feature = parse_feature(
        r#"@namespace:My.Tests
Feature: Accounts
  Scenario: opening
    Given I have an account named "Ski Village"
    When I have 12 "shiny" widgets
"#,
    );
    let generated = generate(
        &feature,
        "accounts",
        TEMPLATE,
        &account_catalog(),
        &ProjectMetadata::default(),
        &CancelToken::new(),
    )
    .unwrap_or_else(|err| panic!("generation should succeed: {err}"));

    let source = &generated.source;
    assert!(source.contains("using N.Steps;"));
    assert!(source.contains("using Gherkin.Generator.Utils;"));
    assert!(source.contains("namespace My.Tests;"));
    assert!(source.contains("public class accountsFeature"));
    assert!(source.contains("// All scenarios"));
    assert!(source.contains("public void Opening()"));
    assert!(source.contains("AccountSteps.IHaveAnAccountNamed(\"Ski Village\");"));
    assert!(source.contains("this.IHaveWidgets(12, \"shiny\");"));
    assert!(source.contains("// stub: When I have {value1} {string1} widgets"));
    assert!(source.contains("private void IHaveWidgets(int value1, string string1) { }"));
    assert_eq!(generated.diagnostics.len(), 1);
}

#[test]
fn outline_parameters_flow_into_the_method_signature() {
    let catalog = StepCatalog::new(vec![StepDefinition {
        kind: StepKind::Given,
        pattern: "I have {amount} dollars".to_string(),
        method_name: "IHaveDollars".to_string(),
        owner_class: "AccountSteps".to_string(),
        owner_namespace: "N.Steps".to_string(),
        params: vec![StepParam::new("amount", "int")],
    }]);
    let feature = parse_feature(
        "Feature: Accounts
  Scenario Outline: Withdraw
    Given I have <amount> dollars
    Examples:
      | amount |
      | 100    |
",
    );
    let generated = generate(
        &feature,
        "accounts",
        TEMPLATE,
        &catalog,
        &ProjectMetadata::default(),
        &CancelToken::new(),
    )
    .unwrap_or_else(|err| panic!("generation should succeed: {err}"));

    assert!(generated.source.contains("public void Withdraw(string amount)"));
    assert!(generated.source.contains("AccountSteps.IHaveDollars(amount);"));
}

#[test]
fn template_failures_carry_the_feature_name() {
    let feature = parse_feature("Feature: Accounts\n");
    let result = generate(
        &feature,
        "accounts",
        "{{#never_closed}}",
        &StepCatalog::default(),
        &ProjectMetadata::default(),
        &CancelToken::new(),
    );
    let Err(err) = result else {
        panic!("expected a render failure");
    };
    assert!(matches!(err, GenerateError::Render { .. }));
    assert!(err.to_string().contains("Accounts"));
}

#[test]
fn cancellation_before_rendering_emits_nothing() {
    let feature = parse_feature("Feature: Accounts\n");
    let cancel = CancelToken::new();
    cancel.cancel();
    let result = generate(
        &feature,
        "accounts",
        TEMPLATE,
        &StepCatalog::default(),
        &ProjectMetadata::default(),
        &cancel,
    );
    assert!(matches!(result, Err(GenerateError::Cancelled { .. })));
}

#[test]
fn debug_artifact_serialises_the_contract_field_names() {
    let feature = parse_feature(
        r#"Feature: Accounts
  Scenario: opening
    Given I have an account named "Ski Village"
"#,
    );
    let generated = generate(
        &feature,
        "accounts",
        TEMPLATE,
        &account_catalog(),
        &ProjectMetadata::default(),
        &CancelToken::new(),
    )
    .unwrap_or_else(|err| panic!("generation should succeed: {err}"));
    let json = generated
        .crif_json()
        .unwrap_or_else(|err| panic!("artifact should serialise: {err}"));

    assert!(json.contains("\"fileName\": \"accounts\""));
    assert!(json.contains("\"featureName\": \"Accounts\""));
    assert!(json.contains("\"isLast\": true"));
    assert!(json.contains("\"keyword\": \"Given\""));
    assert!(json.contains("\"owner\": \"AccountSteps\""));
}

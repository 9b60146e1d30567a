//! Logic-less, Mustache-family rendering of the code model.
//!
//! The engine supports variables, sections, inverted sections, comments,
//! dotted paths, and the implicit iterator `{{.}}`. Key lookup is
//! case-insensitive (an exact match wins), because the model's camelCase
//! field names are the contract while templates are free to use the host
//! language's casing. Nothing is escaped: the output is source code, not
//! markup. Rendering is a pure function of the template text and the data.

mod parser;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use parser::{Node, parse};

/// Template failures; the entry point wraps them with the feature name.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A `{{` was never closed.
    #[error("unterminated tag at byte {offset}")]
    UnterminatedTag {
        /// Byte offset of the opening braces.
        offset: usize,
    },
    /// A tag carried no name.
    #[error("empty tag at byte {offset}")]
    EmptyTag {
        /// Byte offset of the opening braces.
        offset: usize,
    },
    /// A section was opened but never closed.
    #[error("section `{name}` is never closed")]
    UnclosedSection {
        /// Name of the innermost unclosed section.
        name: String,
    },
    /// A close tag appeared outside any section.
    #[error("unexpected close tag `{name}`")]
    UnexpectedClose {
        /// Name on the stray close tag.
        name: String,
    },
    /// A close tag named a different section than the one open.
    #[error("close tag `{found}` does not match open section `{expected}`")]
    MismatchedClose {
        /// Name of the open section.
        expected: String,
        /// Name found on the close tag.
        found: String,
    },
    /// The model could not be serialised for rendering.
    #[error("failed to serialise the code model: {0}")]
    Model(#[from] serde_json::Error),
}

/// Render a template against already-serialised data.
///
/// # Errors
/// Returns [`RenderError`] when the template fails to parse.
pub fn render(template: &str, data: &Value) -> Result<String, RenderError> {
    let nodes = parse(template)?;
    let mut output = String::with_capacity(template.len());
    let mut stack: Vec<&Value> = vec![data];
    render_nodes(&nodes, &mut stack, &mut output);
    Ok(output)
}

/// Serialise a model and render a template against it.
///
/// # Errors
/// Returns [`RenderError`] when serialisation or template parsing fails.
pub fn render_model<T: Serialize>(template: &str, model: &T) -> Result<String, RenderError> {
    let value = serde_json::to_value(model)?;
    render(template, &value)
}

fn render_nodes<'v>(nodes: &[Node], stack: &mut Vec<&'v Value>, output: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Variable(name) => {
                if let Some(value) = resolve(stack, name) {
                    write_scalar(value, output);
                }
            }
            Node::Section { name, children } => {
                let Some(value) = resolve(stack, name) else {
                    continue;
                };
                if !is_truthy(value) {
                    continue;
                }
                if let Value::Array(items) = value {
                    for item in items {
                        stack.push(item);
                        render_nodes(children, stack, output);
                        stack.pop();
                    }
                } else {
                    stack.push(value);
                    render_nodes(children, stack, output);
                    stack.pop();
                }
            }
            Node::Inverted { name, children } => {
                if !resolve(stack, name).is_some_and(is_truthy) {
                    render_nodes(children, stack, output);
                }
            }
        }
    }
}

/// Resolve a dotted path against the context stack, innermost frame first.
fn resolve<'v>(stack: &[&'v Value], path: &str) -> Option<&'v Value> {
    if path == "." {
        return stack.last().copied();
    }
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = stack
        .iter()
        .rev()
        .find_map(|frame| get_member(frame, first))?;
    for segment in segments {
        current = get_member(current, segment)?;
    }
    Some(current)
}

/// Object member lookup: exact key first, then case-insensitive.
fn get_member<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    let map = value.as_object()?;
    if let Some(found) = map.get(key) {
        return Some(found);
    }
    map.iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, found)| found)
}

/// Falsy values skip sections: null, false, empty arrays, empty strings.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Array(items) => !items.is_empty(),
        Value::String(text) => !text.is_empty(),
        Value::Number(_) | Value::Object(_) => true,
    }
}

fn write_scalar(value: &Value, output: &mut String) {
    match value {
        Value::String(text) => output.push_str(text),
        Value::Number(number) => output.push_str(&number.to_string()),
        Value::Bool(flag) => output.push_str(if *flag { "true" } else { "false" }),
        Value::Null | Value::Array(_) | Value::Object(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(template: &str, data: &Value) -> String {
        render(template, data).unwrap_or_else(|err| panic!("template should render: {err}"))
    }

    #[test]
    fn substitutes_variables_case_insensitively() {
        let data = json!({"featureName": "Accounts"});
        assert_eq!(rendered("// {{FEATURENAME}}", &data), "// Accounts");
        assert_eq!(rendered("// {{featureName}}", &data), "// Accounts");
    }

    #[test]
    fn exact_key_match_wins_over_case_folding() {
        let data = json!({"name": "lower", "Name": "upper"});
        assert_eq!(rendered("{{Name}}", &data), "upper");
        assert_eq!(rendered("{{name}}", &data), "lower");
    }

    #[test]
    fn sections_iterate_arrays_with_the_implicit_iterator() {
        let data = json!({"usings": ["A", "B"]});
        assert_eq!(
            rendered("{{#usings}}using {{.}};\n{{/usings}}", &data),
            "using A;\nusing B;\n"
        );
    }

    #[test]
    fn sections_push_objects_onto_the_context() {
        let data = json!({"step": {"owner": "Steps", "method": "Go"}});
        assert_eq!(
            rendered("{{#step}}{{owner}}.{{method}}(){{/step}}", &data),
            "Steps.Go()"
        );
    }

    #[test]
    fn is_last_flags_drive_separators() {
        let data = json!({"arguments": [
            {"value": "12", "isLast": false},
            {"value": "\"shiny\"", "isLast": true},
        ]});
        assert_eq!(
            rendered("({{#arguments}}{{value}}{{^isLast}}, {{/isLast}}{{/arguments}})", &data),
            "(12, \"shiny\")"
        );
    }

    #[test]
    fn inverted_sections_render_for_missing_null_and_empty() {
        let data = json!({"baseClass": "", "remarks": null});
        assert_eq!(rendered("{{^baseClass}}none{{/baseClass}}", &data), "none");
        assert_eq!(rendered("{{^remarks}}none{{/remarks}}", &data), "none");
        assert_eq!(rendered("{{^missing}}none{{/missing}}", &data), "none");
    }

    #[test]
    fn dotted_paths_descend_from_the_defining_frame() {
        let data = json!({"outer": {"inner": {"value": 7}}});
        assert_eq!(rendered("{{outer.inner.value}}", &data), "7");
    }

    #[test]
    fn parent_frames_stay_reachable_inside_sections() {
        let data = json!({"namespace": "N", "rules": [{"name": "R"}]});
        assert_eq!(
            rendered("{{#rules}}{{namespace}}::{{name}}{{/rules}}", &data),
            "N::R"
        );
    }

    #[test]
    fn nothing_is_escaped() {
        let data = json!({"value": "\"<quoted>\" & co"});
        assert_eq!(rendered("{{value}}", &data), "\"<quoted>\" & co");
    }

    #[test]
    fn render_model_serialises_any_serialize() {
        #[derive(serde::Serialize)]
        struct Model {
            count: u32,
        }
        let output = render_model("n={{count}}", &Model { count: 3 })
            .unwrap_or_else(|err| panic!("model should render: {err}"));
        assert_eq!(output, "n=3");
    }
}

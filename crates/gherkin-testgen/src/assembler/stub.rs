//! Stub synthesis for steps with no matching definition.

use std::sync::LazyLock;

use regex::Regex;

use crate::crif;
use crate::naming::generated_method_name;

// One scan finds outline placeholders, quoted phrases, and bare integers in
// textual order. The alternation lets a quoted phrase consume its contents,
// so digits or angle brackets inside quotes never count on their own.
static STUB_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(\w+)>|"([^"]*)"|\b\d+\b"#)
        .unwrap_or_else(|err| panic!("invalid stub token regex: {err}"))
});

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\w+\}").unwrap_or_else(|err| panic!("invalid placeholder regex: {err}"))
});

/// Everything derived from one unmatched step text.
///
/// `pattern_text` and `method` come from the same substitution pass, so the
/// emitted call site always names the synthesized method.
pub(crate) struct SynthesizedStub {
    pub(crate) pattern_text: String,
    pub(crate) method: String,
    pub(crate) parameters: Vec<crif::Parameter>,
    pub(crate) argument_values: Vec<String>,
}

/// Infer a stub from raw step text.
///
/// Quoted phrases become `{string<n>}`, bare integers `{value<n>}` (numbered
/// per kind, left to right); `<name>` outline placeholders stay in the
/// pattern and arrive as `string` parameters. A data-table-bearing step
/// appends a trailing `DataTable table` parameter.
pub(crate) fn synthesize(text: &str, has_data_table: bool) -> SynthesizedStub {
    let mut pattern_text = String::with_capacity(text.len());
    let mut parameters = Vec::new();
    let mut argument_values = Vec::new();
    let mut strings = 0usize;
    let mut values = 0usize;
    let mut last_end = 0usize;
    for caps in STUB_TOKENS.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        pattern_text.push_str(text.get(last_end..whole.start()).unwrap_or_default());
        if let Some(name) = caps.get(1) {
            pattern_text.push_str(whole.as_str());
            parameters.push(crif::Parameter::new("string", name.as_str()));
            argument_values.push(name.as_str().to_string());
        } else if caps.get(2).is_some() {
            strings += 1;
            pattern_text.push_str(&format!("{{string{strings}}}"));
            parameters.push(crif::Parameter::new("string", format!("string{strings}")));
            argument_values.push(whole.as_str().to_string());
        } else {
            values += 1;
            pattern_text.push_str(&format!("{{value{values}}}"));
            parameters.push(crif::Parameter::new("int", format!("value{values}")));
            argument_values.push(whole.as_str().to_string());
        }
        last_end = whole.end();
    }
    pattern_text.push_str(text.get(last_end..).unwrap_or_default());
    if has_data_table {
        parameters.push(crif::Parameter::new("DataTable", "table"));
    }
    crif::mark_last_parameter(&mut parameters);
    let method = generated_method_name(&PLACEHOLDER.replace_all(&pattern_text, ""));
    SynthesizedStub {
        pattern_text,
        method,
        parameters,
        argument_values,
    }
}

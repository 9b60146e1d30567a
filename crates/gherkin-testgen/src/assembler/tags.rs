//! Feature-tag processing and project-default merging.

use crate::crif;
use crate::project::ProjectMetadata;

/// Parsers may hand tags over with or without their leading `@`; accept both.
fn normalised(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}

/// Apply feature-level tags in document order.
///
/// Recognised: `namespace:<ns>`, `baseclass:<qualified-or-simple>`,
/// `using:<ns>`. Anything else is reserved for future categorisation and
/// ignored.
pub(crate) fn apply_feature_tags(feature: &mut crif::Feature, tags: &[String]) {
    for tag in tags {
        let tag = normalised(tag);
        if let Some(namespace) = tag.strip_prefix("namespace:") {
            feature.namespace = namespace.trim().to_string();
        } else if let Some(base) = tag.strip_prefix("baseclass:") {
            apply_base_class(feature, base.trim());
        } else if let Some(import) = tag.strip_prefix("using:") {
            feature.usings.insert(import.trim());
        }
    }
}

/// A qualified base class splits on the last dot: the prefix becomes an
/// import, the suffix the base-class name.
fn apply_base_class(feature: &mut crif::Feature, value: &str) {
    match value.rsplit_once('.') {
        Some((namespace, simple)) => {
            feature.usings.insert(namespace);
            feature.base_class = simple.to_string();
        }
        None => feature.base_class = value.to_string(),
    }
}

/// Fill project defaults beneath explicit tag values; tags always win.
pub(crate) fn apply_project_defaults(feature: &mut crif::Feature, project: &ProjectMetadata) {
    if feature.namespace.is_empty() {
        if let Some(namespace) = &project.generated_namespace {
            feature.namespace = namespace.clone();
        }
    }
    if feature.base_class.is_empty() {
        if let Some(base) = &project.default_test_base {
            feature.base_class = base.simple_name.clone();
            feature.usings.insert(base.namespace.clone());
        }
    }
}

/// Look up the scenario's explicit marking.
///
/// Returns `Some(reason)` when an explicit tag is present; the first such
/// tag wins. A bare `explicit` carries no reason.
pub(crate) fn explicit_tag(tags: &[String]) -> Option<Option<String>> {
    for tag in tags {
        let tag = normalised(tag);
        if tag == "explicit" {
            return Some(None);
        }
        if let Some(reason) = tag.strip_prefix("explicit:") {
            return Some(Some(reason.to_string()));
        }
    }
    None
}

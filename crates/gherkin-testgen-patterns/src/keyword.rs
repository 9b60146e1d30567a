//! Display keywords and normalised step kinds.
//!
//! Gherkin's conjunction keywords (`And`/`But`) derive their meaning from the
//! preceding concrete keyword, so the generator carries two distinct types: a
//! [`DisplayKeyword`] preserving what the author wrote, and a [`StepKind`]
//! holding the three-way resolution used for step lookup.

use gherkin::StepType;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Normalised step kind after `And`/`But` resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform the action under test.
    When,
    /// Assert the expected outcome.
    Then,
}

impl StepKind {
    /// Return the kind as its canonical string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StepKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<StepType> for StepKind {
    fn from(ty: StepType) -> Self {
        match ty {
            StepType::Given => Self::Given,
            StepType::When => Self::When,
            StepType::Then => Self::Then,
        }
    }
}

/// Keyword exactly as written in the feature file.
///
/// Preserved for emission and documentation; lookup always goes through the
/// resolved [`StepKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform the action under test.
    When,
    /// Assert the expected outcome.
    Then,
    /// Additional conditions sharing context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
}

impl DisplayKeyword {
    /// Return the keyword as its canonical string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Resolve this keyword against the kind of the preceding concrete step.
    ///
    /// `Given`/`When`/`Then` overwrite `context` and return it; `And`/`But`
    /// return `context` unchanged. Callers seed `context` with
    /// [`StepKind::Given`] at the start of each independent step sequence.
    ///
    /// # Examples
    /// ```
    /// use gherkin_testgen_patterns::{DisplayKeyword, StepKind};
    ///
    /// let mut context = StepKind::Given;
    /// assert_eq!(DisplayKeyword::When.resolve(&mut context), StepKind::When);
    /// assert_eq!(DisplayKeyword::And.resolve(&mut context), StepKind::When);
    /// assert_eq!(context, StepKind::When);
    /// ```
    #[must_use]
    pub fn resolve(self, context: &mut StepKind) -> StepKind {
        match self {
            Self::Given => *context = StepKind::Given,
            Self::When => *context = StepKind::When,
            Self::Then => *context = StepKind::Then,
            Self::And | Self::But => {}
        }
        *context
    }
}

impl fmt::Display for DisplayKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DisplayKeyword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when a raw keyword is not one of the five Gherkin keywords.
///
/// Carries the unrecognised text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown step keyword: {0}")]
pub struct KeywordParseError(pub String);

impl FromStr for DisplayKeyword {
    type Err = KeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("given") {
            Ok(Self::Given)
        } else if trimmed.eq_ignore_ascii_case("when") {
            Ok(Self::When)
        } else if trimmed.eq_ignore_ascii_case("then") {
            Ok(Self::Then)
        } else if trimmed.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if trimmed.eq_ignore_ascii_case("but") {
            Ok(Self::But)
        } else {
            Err(KeywordParseError(trimmed.to_string()))
        }
    }
}

impl TryFrom<&str> for DisplayKeyword {
    type Error = KeywordParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[expect(clippy::expect_used, reason = "test helper with descriptive failures")]
    fn parse_kw(input: &str) -> DisplayKeyword {
        input
            .parse()
            .expect("test input should parse to a valid keyword")
    }

    #[rstest]
    #[case("Given", DisplayKeyword::Given)]
    #[case("given", DisplayKeyword::Given)]
    #[case(" WhEn ", DisplayKeyword::When)]
    #[case("THEN", DisplayKeyword::Then)]
    #[case("And ", DisplayKeyword::And)]
    #[case(" but ", DisplayKeyword::But)]
    fn parses_case_insensitively(#[case] input: &str, #[case] expected: DisplayKeyword) {
        assert_eq!(parse_kw(input), expected);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "test verifies the error case")]
    fn rejects_unknown_keyword() {
        let err = "*".parse::<DisplayKeyword>().expect_err("expected failure");
        assert_eq!(err.0, "*");
    }

    #[rstest]
    #[case(StepType::Given, StepKind::Given)]
    #[case(StepType::When, StepKind::When)]
    #[case(StepType::Then, StepKind::Then)]
    fn maps_step_type(#[case] ty: StepType, #[case] expected: StepKind) {
        assert_eq!(StepKind::from(ty), expected);
    }

    #[test]
    fn resolve_returns_context_for_conjunctions() {
        let mut context = StepKind::Then;
        assert_eq!(DisplayKeyword::And.resolve(&mut context), StepKind::Then);
        assert_eq!(DisplayKeyword::But.resolve(&mut context), StepKind::Then);
        assert_eq!(context, StepKind::Then);
    }

    #[test]
    fn resolve_updates_context_for_primary_keywords() {
        let mut context = StepKind::Given;
        assert_eq!(DisplayKeyword::When.resolve(&mut context), StepKind::When);
        assert_eq!(context, StepKind::When);
        assert_eq!(DisplayKeyword::Then.resolve(&mut context), StepKind::Then);
        assert_eq!(context, StepKind::Then);
    }
}

//! # Check Errors — Structured Validation Failures
//!
//! Defines [`CheckError`], the single currency for every validation failure
//! in the checks engine, and [`CheckErrorMatcher`], the predicate used to
//! select or exclude errors when merging the structural and business-rule
//! tiers.
//!
//! ## Ordering Invariant
//!
//! `CheckError` is totally ordered by `json_path`, then `validator`, then
//! `message`. Every check entry point sorts its output with this order so
//! results are reproducible regardless of discovery order.

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validator tags emitted by the checks engine itself, in addition to the
/// structural tags reported by the schema validator (`required`, `type`,
/// `format`, `pattern`, ...).
pub mod validators {
    /// A required property is missing.
    pub const REQUIRED: &str = "required";
    /// A value has the wrong type.
    pub const TYPE: &str = "type";
    /// A value violates a format constraint.
    pub const FORMAT: &str = "format";
    /// A value does not match a regex pattern.
    pub const PATTERN: &str = "pattern";
    /// A present value is blank (empty string or empty list).
    pub const BLANK: &str = "blank";
    /// A resource carries inline data, which Sprout disallows.
    pub const INLINE_DATA: &str = "inline-data";
    /// A table's column names do not match the declared field names.
    pub const COLUMN_NAMES: &str = "column-names";
}

/// One validation failure: where it happened, what went wrong, and which
/// rule reported it.
///
/// Field declaration order matters: the derived `Ord` compares `json_path`
/// first, then `validator`, then `message`, which is the canonical output
/// order of the engine.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CheckError {
    /// Root-anchored location of the failure, e.g. `$.resources[0].name`.
    pub json_path: String,
    /// The rule tag that produced this error, e.g. `required` or `blank`.
    pub validator: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl CheckError {
    /// Construct a check error from its three parts.
    pub fn new(
        json_path: impl Into<String>,
        validator: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            json_path: json_path.into(),
            validator: validator.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.json_path, self.message, self.validator)
    }
}

/// A predicate over [`CheckError`]s.
///
/// Each criterion is optional; an unset criterion is vacuously satisfied.
/// A matcher with no criteria matches every error.
#[derive(Debug, Clone, Default)]
pub struct CheckErrorMatcher {
    /// Substring that must occur in the error message.
    pub message: Option<String>,
    /// Regex the error's `json_path` must match.
    pub json_path: Option<Regex>,
    /// Exact validator tag the error must carry.
    pub validator: Option<String>,
}

impl CheckErrorMatcher {
    /// A matcher with no criteria (matches everything).
    pub fn any() -> Self {
        Self::default()
    }

    /// Require the message to contain `substring`.
    pub fn with_message(mut self, substring: impl Into<String>) -> Self {
        self.message = Some(substring.into());
        self
    }

    /// Require the `json_path` to match `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex. Matchers are built from
    /// compile-time literals, so an invalid pattern is a programming error.
    pub fn with_json_path(mut self, pattern: &str) -> Self {
        self.json_path = Some(
            Regex::new(pattern)
                .unwrap_or_else(|e| panic!("invalid matcher path regex {pattern:?}: {e}")),
        );
        self
    }

    /// Require the validator tag to equal `tag`.
    pub fn with_validator(mut self, tag: impl Into<String>) -> Self {
        self.validator = Some(tag.into());
        self
    }

    /// Returns true iff every present criterion matches `error`.
    pub fn matches(&self, error: &CheckError) -> bool {
        let message_ok = self
            .message
            .as_ref()
            .map_or(true, |needle| error.message.contains(needle.as_str()));
        let path_ok = self
            .json_path
            .as_ref()
            .map_or(true, |re| re.is_match(&error.json_path));
        let validator_ok = self
            .validator
            .as_ref()
            .map_or(true, |tag| error.validator == *tag);
        message_ok && path_ok && validator_ok
    }
}

/// Drop every error matched by at least one matcher.
///
/// An empty matcher list is the identity: the input comes back unchanged,
/// in its original order.
pub fn exclude_matching_errors(
    errors: Vec<CheckError>,
    matchers: &[CheckErrorMatcher],
) -> Vec<CheckError> {
    if matchers.is_empty() {
        return errors;
    }
    errors
        .into_iter()
        .filter(|error| !matchers.iter().any(|m| m.matches(error)))
        .collect()
}

/// Deduplicate and sort errors into the canonical order.
pub fn dedupe_and_sort(errors: Vec<CheckError>) -> Vec<CheckError> {
    errors.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

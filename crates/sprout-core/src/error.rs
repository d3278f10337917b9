//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the checks engine. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Validation failures are always aggregated: a [`CheckFailure`] carries
//!   the complete, ordered, deduplicated set of [`CheckError`]s so callers
//!   and tests can assert on the whole failure in one pass.
//! - An invalid bundled schema document is a configuration error, distinct
//!   from ordinary check failures. It indicates a packaging defect and is
//!   never retried.

use std::fmt;

use thiserror::Error;

use crate::check::CheckError;

/// Top-level error type for the checks engine.
#[derive(Error, Debug)]
pub enum SproutError {
    /// The bundled standard schema document is itself invalid.
    #[error("invalid standard schema document: {reason}")]
    InvalidSchema {
        /// Reason the schema failed to compile.
        reason: String,
    },

    /// One or more checks failed.
    #[error(transparent)]
    Check(#[from] CheckFailure),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A grouped validation failure carrying every distinct [`CheckError`].
///
/// The error list is deduplicated and sorted by the canonical order
/// (`json_path`, then `validator`, then `message`) before construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    /// Human-readable header identifying what was checked.
    pub header: String,
    /// The complete, ordered set of failures.
    pub errors: Vec<CheckError>,
}

impl CheckFailure {
    /// Construct a grouped failure from a header and an already
    /// deduplicated, sorted error list.
    pub fn new(header: impl Into<String>, errors: Vec<CheckError>) -> Self {
        Self {
            header: header.into(),
            errors,
        }
    }

    /// Returns the number of errors in this failure.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CheckFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_failure_display_lists_every_error() {
        let failure = CheckFailure::new(
            "Checking package properties found 2 errors:",
            vec![
                CheckError::new("$.name", "blank", "'name' must not be blank"),
                CheckError::new("$.version", "required", "'version' is required"),
            ],
        );
        let rendered = failure.to_string();
        assert!(rendered.starts_with("Checking package properties"));
        assert!(rendered.contains("$.name"));
        assert!(rendered.contains("$.version"));
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn test_sprout_error_wraps_check_failure() {
        let failure = CheckFailure::new("header", vec![]);
        let err: SproutError = failure.into();
        assert!(matches!(err, SproutError::Check(_)));
    }
}

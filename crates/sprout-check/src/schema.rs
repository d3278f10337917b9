//! # Schema Engine — Structural Validation Against the Standard
//!
//! Validates package- and resource-shaped property mappings against the
//! bundled data package schema (Draft 2020-12), harvesting the validator's
//! raw failure tree into flat, deduplicated, canonically ordered
//! [`CheckError`]s.
//!
//! ## Harvesting Rules
//!
//! The validator's basic output yields one unit per failed keyword,
//! including units inside `anyOf`/`oneOf`/`allOf` branches. Harvesting:
//!
//! - discards combinator summary units (`allOf`, `anyOf`, `oneOf`) — they
//!   are redundant restatements of their already-reported child failures;
//! - tags each surviving unit with the failing keyword name;
//! - extends the location of `required` failures with the missing member's
//!   name (the raw unit points at the parent object, not the member);
//! - deduplicates and sorts into the canonical order.
//!
//! The bundled schema is parsed once per process and cached; every check
//! works on a defensive copy, so the cached document is immutable after
//! construction. A schema that fails to compile is a configuration error
//! ([`SproutError::InvalidSchema`]), not a check failure.

use std::sync::OnceLock;

use jsonschema::output::{BasicOutput, ErrorDescription, OutputUnit};
use jsonschema::Draft;
use serde_json::{json, Value};
use sprout_core::{dedupe_and_sort, CheckError, JsonPath, SproutError};

use crate::recommendations::{with_recommendations, with_resource_recommendations};

/// The bundled standard schema document.
const DATA_PACKAGE_SCHEMA: &str = include_str!("../schemas/data-package.schema.json");

/// Keywords whose failures merely summarize child failures.
const COMBINATOR_KEYWORDS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

/// The parsed base schema document.
///
/// Parsed once per process and cached. Callers receive a copy; the cached
/// value is never handed out mutably.
pub(crate) fn base_schema() -> Result<Value, SproutError> {
    static CACHE: OnceLock<Result<Value, String>> = OnceLock::new();
    let cached = CACHE.get_or_init(|| {
        serde_json::from_str::<Value>(DATA_PACKAGE_SCHEMA).map_err(|e| e.to_string())
    });
    match cached {
        Ok(schema) => Ok(schema.clone()),
        Err(reason) => Err(SproutError::InvalidSchema {
            reason: reason.clone(),
        }),
    }
}

/// Check package-shaped properties against the standard schema.
///
/// With `check_recommendations` set, the schema copy is strengthened with
/// the full recommendation set before validation.
///
/// # Errors
///
/// Returns [`SproutError::InvalidSchema`] if the bundled schema document
/// cannot be parsed or compiled.
pub fn check_properties(
    properties: &Value,
    check_recommendations: bool,
) -> Result<Vec<CheckError>, SproutError> {
    let schema = if check_recommendations {
        with_recommendations(&base_schema()?)
    } else {
        base_schema()?
    };
    let errors = validate_against(properties, &schema)?;
    tracing::debug!(
        error_count = errors.len(),
        check_recommendations,
        "checked package-shaped properties against the standard schema"
    );
    Ok(errors)
}

/// Check a single resource's properties against the standard schema.
///
/// The resource is wrapped in a synthetic one-resource package so the
/// package-shaped schema (and its `$defs`) can be reused. Only errors
/// located under the synthetic `resources[0]` are kept, and that prefix is
/// stripped so every returned path is rooted at the resource.
///
/// The only applicable recommendation at resource scope is the name
/// pattern.
///
/// # Errors
///
/// Returns [`SproutError::InvalidSchema`] if the bundled schema document
/// cannot be parsed or compiled.
pub fn check_resource_properties(
    resource: &Value,
    check_recommendations: bool,
) -> Result<Vec<CheckError>, SproutError> {
    let schema = if check_recommendations {
        with_resource_recommendations(&base_schema()?)
    } else {
        base_schema()?
    };
    let wrapped = json!({ "resources": [resource] });
    let errors: Vec<CheckError> = validate_against(&wrapped, &schema)?
        .into_iter()
        .filter_map(|error| {
            let path = JsonPath::parse(&error.json_path);
            if path.is_under_resource(0) {
                Some(CheckError {
                    json_path: path.strip_resource_prefix().to_string(),
                    ..error
                })
            } else {
                None
            }
        })
        .collect();
    tracing::debug!(
        error_count = errors.len(),
        check_recommendations,
        "checked resource properties against the standard schema"
    );
    Ok(errors)
}

/// Run the structural validator and harvest its output.
fn validate_against(instance: &Value, schema: &Value) -> Result<Vec<CheckError>, SproutError> {
    let mut options = jsonschema::options();
    options.with_draft(Draft::Draft202012);
    options.should_validate_formats(true);
    let validator = options
        .build(schema)
        .map_err(|e| SproutError::InvalidSchema {
            reason: e.to_string(),
        })?;

    let errors = match validator.apply(instance).basic() {
        BasicOutput::Valid(_) => Vec::new(),
        BasicOutput::Invalid(units) => units.iter().filter_map(unit_to_error).collect(),
    };
    Ok(dedupe_and_sort(errors))
}

/// Convert one failed-keyword unit into a [`CheckError`], or `None` for
/// combinator summaries.
fn unit_to_error(unit: &OutputUnit<ErrorDescription>) -> Option<CheckError> {
    let keyword_location = unit.keyword_location().to_string();
    let validator = keyword_tag(&keyword_location)?;
    if COMBINATOR_KEYWORDS.contains(&validator) {
        return None;
    }

    let message = unit.error_description().to_string();
    let mut path = JsonPath::from_pointer(&unit.instance_location().to_string());
    if validator == "required" {
        // The raw failure points at the parent object; extend the path with
        // the missing member's name so the error lands on the member.
        if let Some(member) = quoted_member(&message) {
            path.push_field(member);
        }
    }

    Some(CheckError::new(path.to_string(), validator, message))
}

/// The failing keyword named by a keyword location, skipping trailing
/// branch indices (e.g. `/oneOf/0` names `oneOf`).
fn keyword_tag(keyword_location: &str) -> Option<&str> {
    keyword_location
        .rsplit('/')
        .find(|segment| !segment.is_empty() && segment.parse::<usize>().is_err())
}

/// The first double-quoted token of a message, as produced by `required`
/// failures (`"name" is a required property`).
fn quoted_member(message: &str) -> Option<&str> {
    let start = message.find('"')? + 1;
    let end = start + message[start..].find('"')?;
    Some(&message[start..end])
}

//! # Property Checks — Merged Structural and Sprout-Rule Tiers
//!
//! The entry points callers use before persisting properties. Each check:
//!
//! 1. serializes the properties to their compact form;
//! 2. runs the structural tier (schema engine, recommendations on);
//! 3. runs the Sprout rule tier;
//! 4. concatenates, excludes known-overlapping errors, deduplicates, sorts;
//! 5. returns the properties unchanged, or fails once with the complete
//!    grouped error set.
//!
//! ## Fixed Exclusions
//!
//! - `required` on `$.resources`: packages are checked and saved before
//!   their first resource exists.
//! - `required` on `$.resources[i].data`: the standard wants `path` or
//!   `data`; Sprout mandates `path`, so the `data` branch of that choice is
//!   noise. Inline data that *is* present gets its own `inline-data` error.
//! - `type` expecting an array on `$.resources[i].path`: the standard also
//!   permits `path` as an array of strings; Sprout paths are intentionally
//!   single strings, so the array branch's type error is noise.

use sprout_core::{
    dedupe_and_sort, exclude_matching_errors, validators, CheckError, CheckErrorMatcher,
    CheckFailure, SproutError,
};
use sprout_properties::{PackageProperties, Properties, ResourceProperties};

use crate::{rules, schema};

/// Exclusion matchers for package-rooted error paths.
fn package_exclusions() -> Vec<CheckErrorMatcher> {
    vec![
        CheckErrorMatcher::any()
            .with_validator(validators::REQUIRED)
            .with_json_path(r"^\$\.resources$"),
        CheckErrorMatcher::any()
            .with_validator(validators::REQUIRED)
            .with_json_path(r"^\$\.resources\[\d+\]\.data$"),
        CheckErrorMatcher::any()
            .with_validator(validators::TYPE)
            .with_json_path(r"^\$\.resources\[\d+\]\.path$")
            .with_message("array"),
    ]
}

/// Exclusion matchers for resource-rooted error paths.
fn resource_exclusions() -> Vec<CheckErrorMatcher> {
    vec![
        CheckErrorMatcher::any()
            .with_validator(validators::REQUIRED)
            .with_json_path(r"^\$\.data$"),
        CheckErrorMatcher::any()
            .with_validator(validators::TYPE)
            .with_json_path(r"^\$\.path$")
            .with_message("array"),
    ]
}

/// Matcher dropping everything located inside any resource.
fn any_resource_scoped() -> CheckErrorMatcher {
    CheckErrorMatcher::any().with_json_path(r"^\$\.resources\[\d+\]")
}

/// Check a full package: structural tier, package rules, and the rules of
/// every resource (with index-qualified paths).
///
/// # Errors
///
/// [`SproutError::Check`] with the complete grouped error set when any
/// check fails; [`SproutError::InvalidSchema`] if the bundled schema is
/// broken.
pub fn check_package(properties: &PackageProperties) -> Result<&PackageProperties, SproutError> {
    let compact = properties.compact_value()?;
    let mut errors = schema::check_properties(&compact, true)?;
    errors.extend(rules::check_package_rules(properties));
    for (index, resource) in properties.resources.iter().flatten().enumerate() {
        errors.extend(rules::check_resource_rules(resource, Some(index)));
    }

    finish(
        format!("package {}", display_name(properties.name.as_deref())),
        errors,
        &package_exclusions(),
    )?;
    Ok(properties)
}

/// Check package-level properties only, ignoring every error located
/// inside a resource. Used when package metadata is edited on its own, so
/// resource problems are not double-reported.
///
/// # Errors
///
/// See [`check_package`].
pub fn check_package_properties(
    properties: &PackageProperties,
) -> Result<&PackageProperties, SproutError> {
    let compact = properties.compact_value()?;
    let mut errors = schema::check_properties(&compact, true)?;
    errors.extend(rules::check_package_rules(properties));

    let mut exclusions = package_exclusions();
    exclusions.push(any_resource_scoped());

    finish(
        format!("package {}", display_name(properties.name.as_deref())),
        errors,
        &exclusions,
    )?;
    Ok(properties)
}

/// Check a single resource in isolation. All error paths are rooted at the
/// resource (`$.name`, not `$.resources[0].name`).
///
/// # Errors
///
/// See [`check_package`].
pub fn check_resource_properties(
    resource: &ResourceProperties,
) -> Result<&ResourceProperties, SproutError> {
    let compact = resource.compact_value()?;
    let mut errors = schema::check_resource_properties(&compact, true)?;
    errors.extend(rules::check_resource_rules(resource, None));

    finish(
        format!("resource {}", display_name(resource.name.as_deref())),
        errors,
        &resource_exclusions(),
    )?;
    Ok(resource)
}

/// Exclude, deduplicate, sort, and raise the merged error set as one
/// grouped failure.
fn finish(
    subject: String,
    errors: Vec<CheckError>,
    exclusions: &[CheckErrorMatcher],
) -> Result<(), SproutError> {
    let remaining = dedupe_and_sort(exclude_matching_errors(errors, exclusions));
    tracing::debug!(subject = %subject, error_count = remaining.len(), "merged check tiers");
    if remaining.is_empty() {
        Ok(())
    } else {
        let header = format!("Checking {subject} found {} error(s):", remaining.len());
        Err(CheckFailure::new(header, remaining).into())
    }
}

fn display_name(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("'{name}'"),
        _ => "(unnamed)".to_string(),
    }
}

//! # Sprout Rules — Domain Checks Beyond the Standard
//!
//! The standard says what a structurally well-formed package looks like;
//! Sprout is stricter. Packages must carry a fixed set of fields and none
//! of them may be blank; resources must store their data at the path
//! derived from their name and may never carry inline data.
//!
//! Errors use the same taxonomy as the structural tier. Missing fields
//! reuse the structural `required` message verbatim so that overlapping
//! findings collapse during deduplication; blank values get their own
//! `blank` tag because the structural tier cannot see them (a blank string
//! is still a string).
//!
//! Blankness is type-directed: a string is blank iff empty, a list is
//! blank iff empty. An unset field is never blank — it is missing.

use sprout_core::{validators, CheckError, JsonPath};
use sprout_properties::{
    derived_resource_path, is_valid_resource_name, PackageProperties, ResourceProperties,
};

/// Package fields Sprout requires, beyond the standard's own requirements.
pub const PACKAGE_REQUIRED_FIELDS: [&str; 6] =
    ["name", "title", "description", "id", "version", "created"];

/// Resource fields Sprout requires.
pub const RESOURCE_REQUIRED_FIELDS: [&str; 4] = ["name", "title", "description", "path"];

/// A field value as seen by the blank/missing checks.
enum FieldState {
    Unset,
    Blank,
    Filled,
}

fn string_state(value: Option<&str>) -> FieldState {
    match value {
        None => FieldState::Unset,
        Some("") => FieldState::Blank,
        Some(_) => FieldState::Filled,
    }
}

fn list_state<T>(value: Option<&Vec<T>>) -> FieldState {
    match value {
        None => FieldState::Unset,
        Some(list) if list.is_empty() => FieldState::Blank,
        Some(_) => FieldState::Filled,
    }
}

fn missing_error(path: JsonPath, field: &str) -> CheckError {
    CheckError::new(
        path.to_string(),
        validators::REQUIRED,
        format!("\"{field}\" is a required property"),
    )
}

fn blank_error(path: JsonPath, field: &str) -> CheckError {
    CheckError::new(
        path.to_string(),
        validators::BLANK,
        format!("\"{field}\" must not be blank"),
    )
}

fn field_path(field: &str) -> JsonPath {
    let mut path = JsonPath::root();
    path.push_field(field);
    path
}

fn item_path(list: &str, index: usize, field: &str) -> JsonPath {
    let mut path = JsonPath::root();
    path.push_field(list);
    path.push_index(index);
    path.push_field(field);
    path
}

/// Report a required string field as missing or blank.
fn check_required_string(
    errors: &mut Vec<CheckError>,
    field: &str,
    value: Option<&str>,
) {
    match string_state(value) {
        FieldState::Unset => errors.push(missing_error(field_path(field), field)),
        FieldState::Blank => errors.push(blank_error(field_path(field), field)),
        FieldState::Filled => {}
    }
}

/// Report a set list field as blank when it is empty.
fn check_list_not_blank<T>(errors: &mut Vec<CheckError>, field: &str, value: Option<&Vec<T>>) {
    if let FieldState::Blank = list_state(value) {
        errors.push(blank_error(field_path(field), field));
    }
}

/// Report a set per-item string as blank when it is empty.
fn check_item_not_blank(
    errors: &mut Vec<CheckError>,
    list: &str,
    index: usize,
    field: &str,
    value: Option<&str>,
) {
    if let FieldState::Blank = string_state(value) {
        errors.push(blank_error(item_path(list, index, field), field));
    }
}

/// Sprout's package-level checks: required fields present, nothing blank,
/// and nested contributor/source/license entries carrying their display
/// fields.
pub fn check_package_rules(package: &PackageProperties) -> Vec<CheckError> {
    let mut errors = Vec::new();

    check_required_string(&mut errors, "name", package.name.as_deref());
    check_required_string(&mut errors, "title", package.title.as_deref());
    check_required_string(&mut errors, "description", package.description.as_deref());
    check_required_string(&mut errors, "id", package.id.as_deref());
    check_required_string(&mut errors, "version", package.version.as_deref());
    check_required_string(&mut errors, "created", package.created.as_deref());

    check_list_not_blank(&mut errors, "licenses", package.licenses.as_ref());
    check_list_not_blank(&mut errors, "contributors", package.contributors.as_ref());
    check_list_not_blank(&mut errors, "sources", package.sources.as_ref());
    check_list_not_blank(&mut errors, "resources", package.resources.as_ref());

    for (i, contributor) in package.contributors.iter().flatten().enumerate() {
        check_item_not_blank(&mut errors, "contributors", i, "title", contributor.title.as_deref());
    }
    for (i, source) in package.sources.iter().flatten().enumerate() {
        check_item_not_blank(&mut errors, "sources", i, "title", source.title.as_deref());
    }
    for (i, license) in package.licenses.iter().flatten().enumerate() {
        check_item_not_blank(&mut errors, "licenses", i, "name", license.name.as_deref());
        check_item_not_blank(&mut errors, "licenses", i, "path", license.path.as_deref());
    }

    errors
}

/// Sprout's resource-level checks.
///
/// When `index` is given, every emitted path is qualified to
/// `$.resources[index]....`; without it, paths stay rooted at the resource
/// (used when a resource is checked in isolation).
pub fn check_resource_rules(
    resource: &ResourceProperties,
    index: Option<usize>,
) -> Vec<CheckError> {
    let mut errors = Vec::new();

    check_required_string(&mut errors, "name", resource.name.as_deref());
    check_required_string(&mut errors, "title", resource.title.as_deref());
    check_required_string(&mut errors, "description", resource.description.as_deref());
    check_required_string(&mut errors, "path", resource.path.as_deref());

    check_derived_path(&mut errors, resource);

    if resource.data.is_some() {
        errors.push(CheckError::new(
            field_path("data").to_string(),
            validators::INLINE_DATA,
            "inline data is not allowed; data belongs in the file at the resource's path"
                .to_string(),
        ));
    }

    match index {
        Some(i) => errors
            .into_iter()
            .map(|error| CheckError {
                json_path: JsonPath::parse(&error.json_path)
                    .qualify_resource(i)
                    .to_string(),
                ..error
            })
            .collect(),
        None => errors,
    }
}

/// The path must be exactly the one derived from the resource name.
///
/// Skipped when the name is unset or invalid, or when the path is unset or
/// blank — those conditions are already reported by the missing/blank
/// checks (or by the structural name pattern), and one field should never
/// be reported twice for the same root cause.
fn check_derived_path(errors: &mut Vec<CheckError>, resource: &ResourceProperties) {
    let Some(name) = resource.name.as_deref() else {
        return;
    };
    if !is_valid_resource_name(name) {
        return;
    }
    let Some(path) = resource.path.as_deref() else {
        return;
    };
    if path.is_empty() {
        return;
    }
    if let Some(expected) = derived_resource_path(name) {
        if path != expected {
            errors.push(CheckError::new(
                field_path("path").to_string(),
                validators::FORMAT,
                format!("path {path:?} does not match the expected path {expected:?}"),
            ));
        }
    }
}

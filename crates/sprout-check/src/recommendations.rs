//! # Recommendations — Stricter Constraints, Injected on Demand
//!
//! The standard keeps its required surface deliberately small. Sprout
//! recommends more: packages should carry a name, id, version, and creation
//! timestamp; names should be machine-friendly; versions should be semver;
//! contributors and sources should at least have a title.
//!
//! These constraints are injected into a *copy* of the base schema document
//! by pure functions. The cached base schema is never mutated in place.

use serde_json::{json, Value};

/// Machine-friendly name pattern: lowercase alphanumerics plus `.`, `-`, `_`.
pub const NAME_PATTERN: &str = "^[a-z0-9._-]+$";

/// Semantic version pattern (`major.minor.patch` with optional pre-release
/// and build metadata).
pub const SEMVER_PATTERN: &str =
    "^(0|[1-9]\\d*)\\.(0|[1-9]\\d*)\\.(0|[1-9]\\d*)(?:-[0-9A-Za-z.-]+)?(?:\\+[0-9A-Za-z.-]+)?$";

/// Package fields a well-formed Sprout package is expected to carry.
const RECOMMENDED_PACKAGE_FIELDS: [&str; 4] = ["name", "id", "version", "created"];

/// Return a copy of `schema` with the full recommendation set applied:
/// package required fields, name/version patterns, the resource name
/// pattern, and required titles on contributor and source items.
pub fn with_recommendations(schema: &Value) -> Value {
    let mut schema = schema.clone();
    extend_required(&mut schema, "", &RECOMMENDED_PACKAGE_FIELDS);
    set_pattern(&mut schema, "/properties/name", NAME_PATTERN);
    set_pattern(&mut schema, "/properties/version", SEMVER_PATTERN);
    set_pattern(&mut schema, "/$defs/resource/properties/name", NAME_PATTERN);
    extend_required(&mut schema, "/$defs/contributor", &["title"]);
    extend_required(&mut schema, "/$defs/source", &["title"]);
    schema
}

/// Return a copy of `schema` with only the resource-scoped recommendation
/// applied: the resource name pattern.
pub fn with_resource_recommendations(schema: &Value) -> Value {
    let mut schema = schema.clone();
    set_pattern(&mut schema, "/$defs/resource/properties/name", NAME_PATTERN);
    schema
}

/// Add `fields` to the `required` list of the sub-schema at `pointer`,
/// creating the list if absent and skipping entries already present.
fn extend_required(schema: &mut Value, pointer: &str, fields: &[&str]) {
    let Some(target) = schema.pointer_mut(pointer).and_then(Value::as_object_mut) else {
        return;
    };
    let required = target
        .entry("required")
        .or_insert_with(|| json!([]));
    let Some(list) = required.as_array_mut() else {
        return;
    };
    for field in fields {
        if !list.iter().any(|existing| existing == field) {
            list.push(json!(field));
        }
    }
}

/// Set a `pattern` keyword on the sub-schema at `pointer`.
fn set_pattern(schema: &mut Value, pointer: &str, pattern: &str) {
    if let Some(target) = schema.pointer_mut(pointer).and_then(Value::as_object_mut) {
        target.insert("pattern".to_string(), json!(pattern));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::base_schema;

    #[test]
    fn test_with_recommendations_leaves_original_untouched() {
        let base = base_schema().unwrap();
        let recommended = with_recommendations(&base);
        assert_ne!(base, recommended);
        assert_eq!(base, base_schema().unwrap(), "cached base must stay pristine");
    }

    #[test]
    fn test_package_required_fields_are_added() {
        let recommended = with_recommendations(&base_schema().unwrap());
        let required = recommended["required"].as_array().unwrap();
        for field in ["resources", "name", "id", "version", "created"] {
            assert!(
                required.iter().any(|entry| entry == field),
                "missing required entry {field:?}"
            );
        }
    }

    #[test]
    fn test_required_entries_are_not_duplicated() {
        let recommended = with_recommendations(&with_recommendations(&base_schema().unwrap()));
        let required = recommended["required"].as_array().unwrap();
        let names: Vec<_> = required.iter().filter(|e| *e == "name").collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_name_and_version_patterns_are_set() {
        let recommended = with_recommendations(&base_schema().unwrap());
        assert_eq!(
            recommended.pointer("/properties/name/pattern").unwrap(),
            NAME_PATTERN
        );
        assert_eq!(
            recommended.pointer("/properties/version/pattern").unwrap(),
            SEMVER_PATTERN
        );
        assert_eq!(
            recommended
                .pointer("/$defs/resource/properties/name/pattern")
                .unwrap(),
            NAME_PATTERN
        );
    }

    #[test]
    fn test_contributor_and_source_titles_become_required() {
        let recommended = with_recommendations(&base_schema().unwrap());
        for def in ["contributor", "source"] {
            let required = recommended
                .pointer(&format!("/$defs/{def}/required"))
                .and_then(Value::as_array)
                .unwrap();
            assert!(required.iter().any(|entry| entry == "title"), "{def}");
        }
    }

    #[test]
    fn test_resource_recommendations_touch_only_the_name_pattern() {
        let base = base_schema().unwrap();
        let recommended = with_resource_recommendations(&base);
        assert_eq!(
            recommended
                .pointer("/$defs/resource/properties/name/pattern")
                .unwrap(),
            NAME_PATTERN
        );
        assert_eq!(recommended["required"], base["required"]);
        assert_eq!(recommended.pointer("/$defs/contributor"), base.pointer("/$defs/contributor"));
    }
}

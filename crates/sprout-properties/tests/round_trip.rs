//! Property-based round-trip coverage for the compact form.
//!
//! For any property tree, the compact serialization must contain no unset
//! field at any depth, and deserializing it must reproduce the original
//! tree exactly.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use serde_json::Value;
use sprout_properties::{
    ContributorProperties, FieldProperties, FieldType, LicenseProperties, PackageProperties,
    Properties, ResourceProperties, SourceProperties, TableSchemaProperties,
};

fn opt_string() -> impl Strategy<Value = Option<String>> {
    option::of("[a-z][a-z0-9 _.-]{0,12}")
}

fn resource_name() -> impl Strategy<Value = Option<String>> {
    option::of("[a-z0-9][a-z0-9._-]{0,10}")
}

fn field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

fn field() -> impl Strategy<Value = FieldProperties> {
    (resource_name(), opt_string(), option::of(field_type())).prop_map(
        |(name, description, field_type)| FieldProperties {
            name,
            description,
            field_type,
            ..FieldProperties::default()
        },
    )
}

fn table_schema() -> impl Strategy<Value = Option<TableSchemaProperties>> {
    option::of(vec(field(), 0..3).prop_map(|fields| TableSchemaProperties {
        fields: if fields.is_empty() { None } else { Some(fields) },
        ..TableSchemaProperties::default()
    }))
}

fn resource() -> impl Strategy<Value = ResourceProperties> {
    (resource_name(), opt_string(), opt_string(), table_schema()).prop_map(
        |(name, title, description, schema)| {
            // Mirror construction-time path derivation so the generated tree
            // is a fixed point of from_value.
            let path = name
                .as_deref()
                .and_then(sprout_properties::derived_resource_path);
            ResourceProperties {
                name,
                path,
                title,
                description,
                schema,
                ..ResourceProperties::default()
            }
        },
    )
}

fn license() -> impl Strategy<Value = LicenseProperties> {
    (opt_string(), opt_string()).prop_map(|(name, path)| LicenseProperties {
        name,
        path,
        ..LicenseProperties::default()
    })
}

fn contributor() -> impl Strategy<Value = ContributorProperties> {
    (opt_string(), opt_string()).prop_map(|(title, email)| ContributorProperties {
        title,
        email,
        ..ContributorProperties::default()
    })
}

fn source() -> impl Strategy<Value = SourceProperties> {
    (opt_string(), opt_string()).prop_map(|(title, path)| SourceProperties {
        title,
        path,
        ..SourceProperties::default()
    })
}

fn package() -> impl Strategy<Value = PackageProperties> {
    (
        resource_name(),
        opt_string(),
        opt_string(),
        option::of(vec(license(), 0..2)),
        option::of(vec(contributor(), 0..2)),
        option::of(vec(source(), 0..2)),
        option::of(vec(resource(), 0..3)),
    )
        .prop_map(
            |(name, title, description, licenses, contributors, sources, resources)| {
                PackageProperties {
                    name,
                    title,
                    description,
                    licenses,
                    contributors,
                    sources,
                    resources,
                    ..PackageProperties::default()
                }
            },
        )
}

/// Recursively assert the compact form contains no null values.
fn assert_no_nulls(value: &Value, at: &str) {
    match value {
        Value::Null => panic!("unexpected null at {at}"),
        Value::Object(map) => {
            for (key, nested) in map {
                assert_no_nulls(nested, &format!("{at}.{key}"));
            }
        }
        Value::Array(items) => {
            for (i, nested) in items.iter().enumerate() {
                assert_no_nulls(nested, &format!("{at}[{i}]"));
            }
        }
        _ => {}
    }
}

proptest! {
    #[test]
    fn compact_form_has_no_unset_keys(package in package()) {
        let compact = package.compact_value().unwrap();
        assert_no_nulls(&compact, "$");
    }

    #[test]
    fn compact_form_round_trips(package in package()) {
        let compact = package.compact_value().unwrap();
        let back = PackageProperties::from_value(compact).unwrap();
        prop_assert_eq!(back, package);
    }
}

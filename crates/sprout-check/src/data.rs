//! # Data Reconciliation — Table Against Declared Schema
//!
//! Before a table is persisted, its column names and native column types
//! must be compatible with the resource's declared fields. The check is
//! order-insensitive over columns and reports every mismatch at once.
//!
//! [`is_compatible`] is the single source of truth for which native types
//! a declared field type accepts. Notable edge cases:
//!
//! - `geopoint` requires a fixed-size-2 array of a numeric type;
//! - `array` and `list` accept nested list types of any inner type, plus
//!   their serialized string form;
//! - `boolean` also accepts string columns, since boolean-ish values
//!   (`"true"`, `"false"`) frequently arrive as text.

use std::collections::BTreeSet;
use std::fmt;

use sprout_core::{dedupe_and_sort, validators, CheckError, CheckFailure, SproutError};
use sprout_properties::{FieldType, ResourceProperties};

/// A native column type of the tabular engine at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Decimal,
    String,
    Categorical,
    Enum,
    Date,
    Time,
    Datetime,
    Duration,
    Binary,
    Null,
    /// A variable-length list with a typed element.
    List(Box<DataType>),
    /// A fixed-size array with a typed element.
    Array {
        inner: Box<DataType>,
        size: usize,
    },
}

impl DataType {
    /// Convenience constructor for list types.
    pub fn list(inner: DataType) -> Self {
        DataType::List(Box::new(inner))
    }

    /// Convenience constructor for fixed-size array types.
    pub fn array(inner: DataType, size: usize) -> Self {
        DataType::Array {
            inner: Box::new(inner),
            size,
        }
    }

    /// True for the integer kinds, signed or unsigned.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    /// True for the floating-point and decimal kinds.
    pub fn is_float(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64 | DataType::Decimal)
    }

    /// True for any numeric kind.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// True for the string-like kinds.
    pub fn is_string_like(&self) -> bool {
        matches!(self, DataType::String | DataType::Categorical | DataType::Enum)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::List(inner) => write!(f, "List[{inner}]"),
            DataType::Array { inner, size } => write!(f, "Array[{inner}, {size}]"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// One column of a table at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Native column type.
    pub data_type: DataType,
}

impl Column {
    /// Construct a column from a name and native type.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// The name/type surface of an in-memory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Columns in table order. Order is irrelevant to every check.
    pub columns: Vec<Column>,
}

impl Table {
    /// Construct a table surface from its columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }
}

/// Whether a native column type is acceptable for a declared field type.
pub fn is_compatible(field_type: FieldType, data_type: &DataType) -> bool {
    match field_type {
        FieldType::Any => true,
        FieldType::String => data_type.is_string_like(),
        FieldType::Integer | FieldType::Year => data_type.is_integer(),
        FieldType::Number => data_type.is_float(),
        FieldType::Boolean => {
            matches!(data_type, DataType::Boolean) || data_type.is_string_like()
        }
        FieldType::Object | FieldType::Geojson => matches!(data_type, DataType::String),
        FieldType::Array => matches!(
            data_type,
            DataType::List(_) | DataType::Array { .. } | DataType::String
        ),
        FieldType::List => matches!(data_type, DataType::List(_) | DataType::String),
        FieldType::Date => matches!(data_type, DataType::Date),
        FieldType::Time => matches!(data_type, DataType::Time),
        FieldType::Datetime => matches!(data_type, DataType::Datetime),
        FieldType::Yearmonth => matches!(data_type, DataType::Date | DataType::String),
        FieldType::Duration => matches!(data_type, DataType::Duration | DataType::String),
        FieldType::Geopoint => matches!(
            data_type,
            DataType::Array { inner, size: 2 } if inner.is_numeric()
        ),
    }
}

/// Check that a table's columns reconcile with the resource's declared
/// fields before the table is persisted.
///
/// Reports one combined error when the column name sets differ (listing
/// extra and missing names), plus one `type` error per declared field whose
/// native column type is outside the allow-list. All errors are collected
/// before reporting.
///
/// # Errors
///
/// [`SproutError::Check`] with the complete grouped error set on any
/// mismatch.
pub fn check_data(table: &Table, resource: &ResourceProperties) -> Result<(), SproutError> {
    let fields: &[sprout_properties::FieldProperties] = resource
        .schema
        .as_ref()
        .and_then(|schema| schema.fields.as_deref())
        .unwrap_or(&[]);

    let mut errors = Vec::new();

    let declared: BTreeSet<&str> = fields
        .iter()
        .filter_map(|field| field.name.as_deref())
        .collect();
    let actual: BTreeSet<&str> = table
        .columns
        .iter()
        .map(|column| column.name.as_str())
        .collect();

    let extra: Vec<&str> = actual.difference(&declared).copied().collect();
    let missing: Vec<&str> = declared.difference(&actual).copied().collect();
    if !extra.is_empty() || !missing.is_empty() {
        errors.push(CheckError::new(
            "$.schema.fields",
            validators::COLUMN_NAMES,
            format!(
                "table columns do not match the declared fields: extra columns {extra:?}, missing columns {missing:?}"
            ),
        ));
    }

    for (index, field) in fields.iter().enumerate() {
        let (Some(name), Some(field_type)) = (field.name.as_deref(), field.field_type) else {
            continue;
        };
        let Some(column) = table.columns.iter().find(|column| column.name == name) else {
            continue;
        };
        if !is_compatible(field_type, &column.data_type) {
            errors.push(CheckError::new(
                format!("$.schema.fields[{index}].type"),
                validators::TYPE,
                format!(
                    "column {name:?} has type {}, which is not allowed for fields of type {field_type:?}",
                    column.data_type
                ),
            ));
        }
    }

    let errors = dedupe_and_sort(errors);
    tracing::debug!(
        error_count = errors.len(),
        column_count = table.columns.len(),
        "reconciled table columns against declared fields"
    );
    if errors.is_empty() {
        Ok(())
    } else {
        let header = format!(
            "Checking data against resource {} found {} error(s):",
            resource
                .name
                .as_deref()
                .map(|name| format!("'{name}'"))
                .unwrap_or_else(|| "(unnamed)".to_string()),
            errors.len()
        );
        Err(CheckFailure::new(header, errors).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_properties::{FieldProperties, TableSchemaProperties};

    fn resource_with_fields(fields: Vec<(&str, FieldType)>) -> ResourceProperties {
        ResourceProperties {
            name: Some("samples".to_string()),
            schema: Some(TableSchemaProperties {
                fields: Some(
                    fields
                        .into_iter()
                        .map(|(name, field_type)| FieldProperties {
                            name: Some(name.to_string()),
                            field_type: Some(field_type),
                            ..FieldProperties::default()
                        })
                        .collect(),
                ),
                ..TableSchemaProperties::default()
            }),
            ..ResourceProperties::default()
        }
    }

    fn errors_of(result: Result<(), SproutError>) -> Vec<CheckError> {
        match result.unwrap_err() {
            SproutError::Check(failure) => failure.errors,
            other => panic!("expected a check failure, got: {other}"),
        }
    }

    #[test]
    fn test_matching_table_passes() {
        let resource = resource_with_fields(vec![
            ("id", FieldType::Integer),
            ("label", FieldType::String),
        ]);
        let table = Table::new(vec![
            Column::new("id", DataType::Int64),
            Column::new("label", DataType::String),
        ]);
        assert!(check_data(&table, &resource).is_ok());
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let resource = resource_with_fields(vec![
            ("id", FieldType::Integer),
            ("label", FieldType::String),
        ]);
        let reordered = Table::new(vec![
            Column::new("label", DataType::String),
            Column::new("id", DataType::Int8),
        ]);
        assert!(check_data(&reordered, &resource).is_ok());
    }

    #[test]
    fn test_extra_and_missing_names_raise_one_combined_error() {
        let resource = resource_with_fields(vec![("my_bool", FieldType::Boolean)]);
        let table = Table::new(vec![
            Column::new("extra_col1", DataType::Boolean),
            Column::new("my_bool", DataType::Boolean),
            Column::new("extra_col2", DataType::Int8),
        ]);
        let errors = errors_of(check_data(&table, &resource));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].validator, "column-names");
        assert!(errors[0].message.contains("extra_col1"));
        assert!(errors[0].message.contains("extra_col2"));
        assert!(!errors[0].message.contains("my_bool"));
    }

    #[test]
    fn test_missing_columns_are_listed() {
        let resource = resource_with_fields(vec![
            ("a", FieldType::Integer),
            ("b", FieldType::Integer),
        ]);
        let table = Table::new(vec![Column::new("a", DataType::Int32)]);
        let errors = errors_of(check_data(&table, &resource));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("missing columns [\"b\"]"));
    }

    #[test]
    fn test_one_type_error_per_mismatched_column() {
        let resource = resource_with_fields(vec![
            ("a", FieldType::Integer),
            ("b", FieldType::Date),
            ("c", FieldType::String),
        ]);
        let table = Table::new(vec![
            Column::new("a", DataType::String),
            Column::new("b", DataType::Int64),
            Column::new("c", DataType::String),
        ]);
        let errors = errors_of(check_data(&table, &resource));
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors.iter().all(|e| e.validator == "type"));
        assert_eq!(errors[0].json_path, "$.schema.fields[0].type");
        assert_eq!(errors[1].json_path, "$.schema.fields[1].type");
    }

    #[test]
    fn test_geopoint_requires_numeric_pair() {
        let resource = resource_with_fields(vec![("location", FieldType::Geopoint)]);

        let good = Table::new(vec![Column::new(
            "location",
            DataType::array(DataType::Float64, 2),
        )]);
        assert!(check_data(&good, &resource).is_ok());

        let wrong_size_and_kind = Table::new(vec![Column::new(
            "location",
            DataType::array(DataType::String, 3),
        )]);
        let errors = errors_of(check_data(&wrong_size_and_kind, &resource));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].validator, "type");
    }

    #[test]
    fn test_nested_list_types() {
        let resource = resource_with_fields(vec![("tags", FieldType::Array)]);
        let nested = Table::new(vec![Column::new(
            "tags",
            DataType::list(DataType::list(DataType::Int64)),
        )]);
        assert!(check_data(&nested, &resource).is_ok());
    }

    #[test]
    fn test_boolean_accepts_boolish_strings() {
        let resource = resource_with_fields(vec![("flag", FieldType::Boolean)]);
        let table = Table::new(vec![Column::new("flag", DataType::String)]);
        assert!(check_data(&table, &resource).is_ok());
    }

    #[test]
    fn test_resource_without_schema_rejects_any_column() {
        let resource = ResourceProperties::with_name("samples");
        let table = Table::new(vec![Column::new("x", DataType::Int64)]);
        let errors = errors_of(check_data(&table, &resource));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].validator, "column-names");
    }

    /// Exhaustive allow/deny coverage of the type mapping: one accepted and
    /// one rejected native type per declared field type.
    #[test]
    fn test_type_mapping_is_exhaustive() {
        let cases: Vec<(FieldType, DataType, DataType)> = vec![
            (FieldType::String, DataType::Categorical, DataType::Int64),
            (FieldType::Number, DataType::Float32, DataType::Int64),
            (FieldType::Integer, DataType::UInt16, DataType::Float64),
            (FieldType::Boolean, DataType::Boolean, DataType::Int8),
            (FieldType::Object, DataType::String, DataType::Boolean),
            (
                FieldType::Array,
                DataType::list(DataType::String),
                DataType::Int64,
            ),
            (
                FieldType::List,
                DataType::list(DataType::Float64),
                DataType::array(DataType::Float64, 4),
            ),
            (FieldType::Date, DataType::Date, DataType::Datetime),
            (FieldType::Time, DataType::Time, DataType::Datetime),
            (FieldType::Datetime, DataType::Datetime, DataType::Date),
            (FieldType::Year, DataType::Int32, DataType::String),
            (FieldType::Yearmonth, DataType::Date, DataType::Int64),
            (FieldType::Duration, DataType::Duration, DataType::Int64),
            (
                FieldType::Geopoint,
                DataType::array(DataType::Float64, 2),
                DataType::array(DataType::Float64, 3),
            ),
            (FieldType::Geojson, DataType::String, DataType::Binary),
            (FieldType::Any, DataType::Null, DataType::Null),
        ];

        let covered: Vec<FieldType> = cases.iter().map(|(ft, _, _)| *ft).collect();
        for field_type in FieldType::ALL {
            assert!(covered.contains(&field_type), "uncovered: {field_type:?}");
        }

        for (field_type, accepted, rejected) in cases {
            assert!(
                is_compatible(field_type, &accepted),
                "{field_type:?} should accept {accepted}"
            );
            if field_type != FieldType::Any {
                assert!(
                    !is_compatible(field_type, &rejected),
                    "{field_type:?} should reject {rejected}"
                );
            }
        }
    }
}

//! # Field Types — The Standard's Declared Column Types
//!
//! The closed set of field types a table schema may declare for a column.
//! Serialized form is the standard's lowercase spelling (`"datetime"`,
//! `"geopoint"`, ...).

use serde::{Deserialize, Serialize};

/// A field's declared type in a table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text.
    String,
    /// Real numbers, including exponent notation.
    Number,
    /// Whole numbers.
    Integer,
    /// True/false values.
    Boolean,
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
    /// A typed, delimiter-separated list of values.
    List,
    /// A calendar date without time.
    Date,
    /// A time of day without date.
    Time,
    /// A date with time.
    Datetime,
    /// A calendar year.
    Year,
    /// A calendar year and month.
    Yearmonth,
    /// An ISO 8601 duration.
    Duration,
    /// A longitude/latitude coordinate pair.
    Geopoint,
    /// A GeoJSON geometry.
    Geojson,
    /// Any value; no type constraint.
    Any,
}

impl FieldType {
    /// Every declarable field type, for exhaustive mapping coverage.
    pub const ALL: [FieldType; 16] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Integer,
        FieldType::Boolean,
        FieldType::Object,
        FieldType::Array,
        FieldType::List,
        FieldType::Date,
        FieldType::Time,
        FieldType::Datetime,
        FieldType::Year,
        FieldType::Yearmonth,
        FieldType::Duration,
        FieldType::Geopoint,
        FieldType::Geojson,
        FieldType::Any,
    ];
}

//! # Property Records — Typed Metadata Trees
//!
//! One record type per standard concept: package, resource, table schema,
//! field, constraints, contributor, license, source, and foreign-key
//! reference. Every field is optional — absent means *unset*, which is
//! distinct from an explicit blank value.
//!
//! ## Compact Form Invariant
//!
//! A record with all fields unset serializes to an empty mapping. Unset
//! fields never appear in the serialized output at any nesting depth, so
//! the compact form is the minimal mapping representation and round-trips
//! losslessly through [`Properties::from_value`].
//!
//! ## Construction
//!
//! Construction never infers defaults, with one exception: a resource's
//! storage `path` is derived from its `name` at construction time when the
//! name is syntactically valid. A later rename does not recompute the path;
//! that is the caller's job.

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprout_core::SproutError;
use uuid::Uuid;

/// Version string assigned to freshly generated packages.
const STARTING_VERSION: &str = "0.1.0";

/// Conversion between property records and their compact mapping form.
///
/// `from_value` ignores unknown keys; `compact_value` strips every unset
/// field recursively.
pub trait Properties: Serialize + DeserializeOwned + Sized {
    /// Build a record tree from a plain nested mapping.
    fn from_value(value: Value) -> Result<Self, SproutError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize to the compact (non-null) mapping form.
    fn compact_value(&self) -> Result<Value, SproutError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Properties describing a data package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageProperties {
    /// Machine-readable package identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Globally unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Semantic version of the package metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Creation timestamp, RFC 3339 with `Z` suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Home page URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Representative image URL or path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Keywords for discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Licenses covering the package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<LicenseProperties>>,
    /// People and organizations who contributed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<ContributorProperties>>,
    /// Raw sources the package data came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceProperties>>,
    /// The package's data resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceProperties>>,
}

impl Properties for PackageProperties {
    fn from_value(value: Value) -> Result<Self, SproutError> {
        let mut package: PackageProperties = serde_json::from_value(value)?;
        if let Some(resources) = package.resources.as_mut() {
            for resource in resources.iter_mut() {
                resource.derive_path();
            }
        }
        Ok(package)
    }
}

impl PackageProperties {
    /// A package record with system-generated defaults: a fresh unique id,
    /// the starting version, and the current UTC timestamp (seconds
    /// precision, `Z` suffix).
    ///
    /// Overrides are applied by mutating the returned record; assigning
    /// `None` to a generated field suppresses that default.
    pub fn from_default() -> Self {
        Self {
            id: Some(Uuid::new_v4().to_string()),
            version: Some(STARTING_VERSION.to_string()),
            created: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            ..Self::default()
        }
    }
}

/// Properties describing one data resource inside a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceProperties {
    /// Machine-readable resource identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Storage path of the resource's data file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Resource type tag (the standard's `type`, normally `"table"`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Data file format, e.g. `parquet`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Media type of the data file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediatype: Option<String>,
    /// Character encoding of the data file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Size of the data file in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    /// Content hash of the data file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Raw sources for this resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceProperties>>,
    /// Licenses covering this resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<LicenseProperties>>,
    /// The table schema declaring column names and types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<TableSchemaProperties>,
    /// Inline data. The standard permits it; Sprout forbids it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Properties for ResourceProperties {
    fn from_value(value: Value) -> Result<Self, SproutError> {
        let mut resource: ResourceProperties = serde_json::from_value(value)?;
        resource.derive_path();
        Ok(resource)
    }
}

impl ResourceProperties {
    /// Construct a resource with the given name, deriving the storage path
    /// when the name is syntactically valid.
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut resource = Self {
            name: Some(name.into()),
            ..Self::default()
        };
        resource.derive_path();
        resource
    }

    /// Derive `path` from `name` if `path` is unset and the name is valid.
    ///
    /// Runs once at construction time. Renaming a resource afterwards does
    /// not recompute the path.
    fn derive_path(&mut self) {
        if self.path.is_some() {
            return;
        }
        if let Some(path) = self.name.as_deref().and_then(derived_resource_path) {
            self.path = Some(path);
        }
    }
}

/// The storage path derived from a resource name, or `None` when the name
/// is not syntactically valid.
pub fn derived_resource_path(name: &str) -> Option<String> {
    if is_valid_resource_name(name) {
        Some(format!("resources/{name}/data.parquet"))
    } else {
        None
    }
}

/// A resource name is valid when it is non-empty and contains only
/// lowercase alphanumerics, `.`, `-`, and `_`.
pub fn is_valid_resource_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_'))
}

/// A table schema: the declared columns of a tabular resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableSchemaProperties {
    /// Declared columns, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldProperties>>,
    /// How strictly data columns must match declared fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields_match: Option<String>,
    /// Fields forming the primary key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Vec<String>>,
    /// Foreign-key declarations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_keys: Option<Vec<ForeignKeyProperties>>,
    /// String values to interpret as missing data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_values: Option<Vec<String>>,
}

impl Properties for TableSchemaProperties {}

/// One declared column in a table schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldProperties {
    /// Column name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Declared field type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<crate::FieldType>,
    /// Type-specific format refinement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Value constraints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ConstraintsProperties>,
}

impl Properties for FieldProperties {}

/// Value constraints on a single field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstraintsProperties {
    /// Values must be present (not missing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Values must be unique within the column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    /// Regex every value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Closed set of permitted values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Minimum value (numeric or temporal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,
    /// Maximum value (numeric or temporal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
}

impl Properties for ConstraintsProperties {}

/// A person or organization who contributed to the package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContributorProperties {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL or path with more information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Affiliated organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Contribution roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl Properties for ContributorProperties {}

/// A license covering a package or resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseProperties {
    /// SPDX-style license identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL or path to the license text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Human-readable license title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Properties for LicenseProperties {}

/// A raw source the data was gathered from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceProperties {
    /// Display name of the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL or path of the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Version of the source material.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Properties for SourceProperties {}

/// A foreign-key declaration on a table schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKeyProperties {
    /// Local fields forming the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// The referenced resource and fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceProperties>,
}

impl Properties for ForeignKeyProperties {}

/// The target of a foreign-key declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceProperties {
    /// Name of the referenced resource; empty means self-reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Referenced fields, positionally matched to the local fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl Properties for ReferenceProperties {}

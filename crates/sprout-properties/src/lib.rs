//! # sprout-properties — Typed Metadata Records
//!
//! The property data model of the Sprout checks engine: a forest of record
//! types mirroring the standard's package and resource shapes. Every field
//! is optional; absent means unset, which is distinct from blank.
//!
//! Key entry points:
//!
//! - [`Properties::from_value`] — build a record tree from a plain nested
//!   mapping, ignoring unknown keys.
//! - [`Properties::compact_value`] — the minimal (non-null) serialization.
//! - [`PackageProperties::from_default`] — defaulted construction with a
//!   generated id, starting version, and creation timestamp.
//!
//! ## Crate Policy
//!
//! - Depends only on `sprout-core` internally.
//! - Records own their children exclusively; there is no sharing and no
//!   back-reference, so trees can be validated concurrently without
//!   coordination.

pub mod field_types;
pub mod properties;

pub use field_types::FieldType;
pub use properties::{
    derived_resource_path, is_valid_resource_name, ConstraintsProperties, ContributorProperties,
    FieldProperties, ForeignKeyProperties, LicenseProperties, PackageProperties, Properties,
    ReferenceProperties, ResourceProperties, SourceProperties, TableSchemaProperties,
};

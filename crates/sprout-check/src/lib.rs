//! # sprout-check — The Metadata Checks Engine
//!
//! Validates package and resource properties against two independent rule
//! tiers, and reconciles a table's columns against its resource's declared
//! fields before the table is persisted.
//!
//! ## Tiers
//!
//! - **Structural** ([`schema`]): the bundled data package standard schema
//!   (Draft 2020-12), optionally strengthened with the recommendation
//!   constraints ([`recommendations`]).
//! - **Sprout rules** ([`rules`]): required/blank/shape checks that go
//!   beyond the standard.
//!
//! [`check_package`], [`check_package_properties`], and
//! [`check_resource_properties`] merge both tiers: concatenate, exclude
//! known-overlapping errors, deduplicate, sort, and fail once with the
//! complete grouped error set ([`sprout_core::CheckFailure`]).
//!
//! [`check_data`] reconciles a [`Table`]'s column names and native types
//! against the declared fields; [`data::is_compatible`] is the single
//! source of truth for the type mapping.
//!
//! ## Concurrency
//!
//! Everything here is synchronous and pure over its inputs. The bundled
//! schema document is cached process-wide after the first load and treated
//! as immutable; each check works on a defensive copy.

pub mod data;
pub mod package;
pub mod recommendations;
pub mod rules;
pub mod schema;

pub use data::{check_data, Column, DataType, Table};
pub use package::{check_package, check_package_properties, check_resource_properties};

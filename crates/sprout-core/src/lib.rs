//! # sprout-core — Foundational Types for the Checks Engine
//!
//! Defines the shared vocabulary of the Sprout metadata checks engine:
//!
//! - [`CheckError`] — one structured validation failure (location, message,
//!   rule tag), totally ordered for reproducible output.
//! - [`CheckErrorMatcher`] — predicate used to select or exclude errors when
//!   merging the structural and business-rule tiers.
//! - [`JsonPath`] — structured dotted/bracket error locations, with the
//!   resource qualification and prefix-stripping transforms.
//! - [`SproutError`] / [`CheckFailure`] — the error hierarchy: configuration
//!   errors are fatal, validation failures are grouped and complete.
//!
//! ## Crate Policy
//!
//! This crate has no internal dependencies and performs no I/O. All types
//! are plain values; concurrent callers need no coordination.

pub mod check;
pub mod error;
pub mod path;

pub use check::{
    dedupe_and_sort, exclude_matching_errors, validators, CheckError, CheckErrorMatcher,
};
pub use error::{CheckFailure, SproutError};
pub use path::{JsonPath, PathSegment};

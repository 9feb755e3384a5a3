//! Foundation types for mdb editorial records.
//!
//! Records fetched from the metadata service are semi-structured JSON
//! objects: nested maps and ordered collections of maps describing
//! contributors, subjects, spatial locations, categories and references.
//! This crate gives the rest of the workspace one vocabulary for them.
//!
//! # Key Types
//!
//! - [`Record`] / [`Value`] -- JSON object snapshot of an editorial entity
//! - [`Truthy`] -- "is this value worth reporting" test used when packing diffs
//! - [`RecordExt`] -- safe, absent-tolerant field accessors
//! - [`fields`] -- well-known field names, reference types and roles

pub mod error;
pub mod fields;
pub mod record;

pub use error::{TypeError, TypeResult};
pub use record::{
    as_record, is_client_generated_id, is_scalar, values_equal, Record, RecordExt, Truthy, Value,
};

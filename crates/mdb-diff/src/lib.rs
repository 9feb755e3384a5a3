//! Structural diff engine for mdb editorial records.
//!
//! Compares two versions of a record and produces a [`Diff`]: what was
//! added, modified and removed, field by field. Scalar attributes compare
//! by value; tracked collections (contributors, categories, subjects,
//! spatials, references) are reconciled item by item with a pair of
//! identity/value comparators per collection. A diff can be rendered for
//! humans, filtered, and applied back onto the original record.
//!
//! # Key Types
//!
//! - [`Differ`] / [`DifferConfig`] -- Configured diff calculator
//! - [`Diff`] / [`ChangeKind`] -- The three change mappings and their operations
//! - [`FieldChange`] / [`FieldDiffResult`] -- Per-field outcome
//! - [`Comparator`] / [`CollectionRule`] -- Identity and value predicates for collections
//! - [`reconcile`] -- The collection reconciliation algorithm on its own

pub mod attributes;
pub mod comparators;
pub mod config;
pub mod diff;
pub mod differ;
pub mod error;
pub mod explain;
pub mod field_result;
pub mod functions;
pub mod reconcile;

pub use attributes::{attribute_changes, nested_record_changes};
pub use comparators::{default_rules, CollectionRule, Comparator};
pub use config::DifferConfig;
pub use diff::{ChangeKind, ChangeMap, Diff};
pub use differ::Differ;
pub use error::{DiffError, DiffResult};
pub use explain::{describe_item, explain_contributor_change};
pub use field_result::{FieldChange, FieldDiffResult};
pub use functions::{attribute_change, categories_changes, categories_changes_with, illustration_changes};
pub use reconcile::{reconcile, reconcile_field, Reconciliation};

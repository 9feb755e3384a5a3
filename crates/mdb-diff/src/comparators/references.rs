//! References: `{resId, type, reference}`.
//!
//! The service assigns a fresh `resId` to every stored reference, so
//! references are matched purely on what they point at.

use mdb_types::{RecordExt, Value};

use super::same_at;

/// Same reference type and same referenced id.
pub fn same_reference(a: &Value, b: &Value) -> bool {
    same_at(a, b, &["type"]) && same_at(a, b, &["reference"])
}

/// Whether a reference carries the given type tag.
pub fn is_of_type(reference: &Value, reference_type: &str) -> bool {
    reference.str_field("type") == Some(reference_type)
}

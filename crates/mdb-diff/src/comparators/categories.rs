//! Categories: `{resource, resId, title}`.

use mdb_types::fields::RES_ID;
use mdb_types::Value;

use super::same_at;

/// Default identity: same `resource` reference.
pub fn resource_equals(a: &Value, b: &Value) -> bool {
    same_at(a, b, &["resource"])
}

/// Identity by the category's own `resId`.
pub fn res_id_equals(a: &Value, b: &Value) -> bool {
    same_at(a, b, &[RES_ID])
}

/// Default value comparison: same `title`.
pub fn title_equals(a: &Value, b: &Value) -> bool {
    same_at(a, b, &["title"])
}

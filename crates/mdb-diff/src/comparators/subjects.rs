//! Subjects (tags): `{resId, title}`.

use mdb_types::{RecordExt, Value};

use super::{mixed_identity as by_res_id, same_at};

/// Default identity and value comparison: same `title`.
pub fn title_equals(a: &Value, b: &Value) -> bool {
    same_at(a, b, &["title"])
}

/// `resId` when the original subject has one, title otherwise.
pub fn mixed_identity(a: &Value, b: &Value) -> bool {
    by_res_id(a, b, title_equals)
}

/// A subject is usable when it has a non-empty title.
pub fn is_wellformed_subject(subject: &Value) -> bool {
    subject.str_field("title").is_some_and(|t| !t.is_empty())
}

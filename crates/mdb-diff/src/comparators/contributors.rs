//! Contributors: `{contact: {title}, role: {resId, title}, characterName, comment, capacity}`.

use mdb_types::fields::RES_ID;
use mdb_types::{RecordExt, Value};

use super::{mixed_identity, same_at};

/// Fields describing how a contact took part. Older payloads carry them
/// inside `contact`, newer ones on the contributor itself.
const PARTICIPATION_FIELDS: [&str; 3] = ["characterName", "comment", "capacity"];

/// Default identity: same contact title and same role title.
pub fn value_based_identity(a: &Value, b: &Value) -> bool {
    same_at(a, b, &["contact", "title"]) && same_at(a, b, &["role", "title"])
}

/// Same contact title and same role identifier.
pub fn name_and_role_matcher(a: &Value, b: &Value) -> bool {
    same_at(a, b, &["contact", "title"]) && same_at(a, b, &["role", RES_ID])
}

/// `resId` when the original contributor has one, contact + role otherwise.
pub fn id_matcher(a: &Value, b: &Value) -> bool {
    if a.has(RES_ID) {
        return a.field(RES_ID) == b.field(RES_ID);
    }
    name_and_role_matcher(a, b)
}

/// [`mixed_identity`] over [`value_based_identity`].
pub fn mixed_identity_by_title(a: &Value, b: &Value) -> bool {
    mixed_identity(a, b, value_based_identity)
}

/// Content equality over contact, role and participation details.
pub fn value_equals(a: &Value, b: &Value) -> bool {
    same_at(a, b, &["contact", "title"])
        && same_at(a, b, &["role", RES_ID])
        && same_at(a, b, &["role", "title"])
        && PARTICIPATION_FIELDS.iter().all(|field| {
            same_at(a, b, &[*field]) && same_at(a, b, &["contact", *field])
        })
}

//! Standalone field functions.
//!
//! Single-field diffs for callers that only care about one part of a record
//! and do not want to configure a whole [`Differ`](crate::Differ).

use mdb_types::fields::CATEGORIES;
use mdb_types::{values_equal, Record, RecordExt, Truthy};

use crate::comparators::{categories, Comparator};
use crate::field_result::FieldDiffResult;
use crate::reconcile::reconcile;

const ILLUSTRATION: &str = "illustration";
const IDENTIFIER: &str = "identifier";
const ILLUSTRATION_ATTRIBUTES: &str = "illustrationAttributes";

/// Diff a single field by value; numbers compare numerically.
pub fn attribute_change(original: &Record, modified: &Record, key: &str) -> FieldDiffResult {
    match (original.field(key), modified.field(key)) {
        (Some(old), None) => FieldDiffResult::with_removed(key, old.clone()),
        (None, Some(new)) => FieldDiffResult::with_added(key, new.clone()),
        (Some(old), Some(new)) if !values_equal(old, new) => {
            FieldDiffResult::with_modified(key, new.clone())
        }
        _ => FieldDiffResult::unchanged(key),
    }
}

/// Reconcile `categories`, matching on `resId` and comparing `title`.
pub fn categories_changes(original: &Record, modified: &Record) -> FieldDiffResult {
    categories_changes_with(
        original,
        modified,
        &categories::res_id_equals,
        &categories::title_equals,
    )
}

/// Reconcile `categories` with caller-supplied comparators.
pub fn categories_changes_with(
    original: &Record,
    modified: &Record,
    identity: &dyn Comparator,
    value: &dyn Comparator,
) -> FieldDiffResult {
    reconcile(original.items(CATEGORIES), modified.items(CATEGORIES), identity, value)
        .into_field_result(CATEGORIES)
}

/// Diff the `illustration` of two records.
///
/// An illustration is replaced when its `identifier` changes. With the same
/// identifier, differing `illustrationAttributes` count as a modification:
/// newly appearing attributes are reported on their own, any other change
/// reports the whole modified illustration.
pub fn illustration_changes(original: &Record, modified: &Record) -> FieldDiffResult {
    let old = original.field(ILLUSTRATION).filter(|v| v.is_truthy());
    let new = modified.field(ILLUSTRATION).filter(|v| v.is_truthy());

    let (old, new) = match (old, new) {
        (None, None) => return FieldDiffResult::unchanged(ILLUSTRATION),
        (None, Some(new)) => return FieldDiffResult::with_added(ILLUSTRATION, new.clone()),
        (Some(old), None) => return FieldDiffResult::with_removed(ILLUSTRATION, old.clone()),
        (Some(old), Some(new)) => (old, new),
    };

    let same_identifier = match (old.field(IDENTIFIER), new.field(IDENTIFIER)) {
        (Some(a), Some(b)) => values_equal(a, b),
        (a, b) => a == b,
    };
    if !same_identifier {
        return FieldDiffResult::with_modified(ILLUSTRATION, new.clone());
    }

    let old_attrs = old.field(ILLUSTRATION_ATTRIBUTES).filter(|v| v.is_truthy());
    let new_attrs = new.field(ILLUSTRATION_ATTRIBUTES).filter(|v| v.is_truthy());
    match (old_attrs, new_attrs) {
        (None, None) => FieldDiffResult::unchanged(ILLUSTRATION),
        (None, Some(attrs)) => FieldDiffResult::with_modified(ILLUSTRATION, attrs.clone()),
        (Some(a), Some(b)) if values_equal(a, b) => FieldDiffResult::unchanged(ILLUSTRATION),
        _ => FieldDiffResult::with_modified(ILLUSTRATION, new.clone()),
    }
}

//! Attribute-level diff: compare the flat fields of two records.
//!
//! Only scalar values (strings, numbers, booleans) are considered here;
//! collections belong to the reconciler and nested records to
//! [`nested_record_changes`], so nothing is counted twice. Values compare
//! with [`values_equal`], so `1` and `1.0` are the same. A `null` reads as
//! an absent field.

use mdb_types::{is_scalar, values_equal, Record, RecordExt};

use crate::config::DifferConfig;
use crate::field_result::FieldDiffResult;

/// Compare the scalar fields of `original` and `modified`.
///
/// - in both, different value: modified (new value);
/// - only in `modified`: added;
/// - only in `original`: removed (old value).
///
/// Fields excluded by `config` are skipped.
pub fn attribute_changes(
    original: &Record,
    modified: &Record,
    config: &DifferConfig,
) -> Vec<FieldDiffResult> {
    let mut results = Vec::new();

    for (key, old) in original {
        if !config.is_tracked(key) || !is_scalar(old) {
            continue;
        }
        match modified.field(key) {
            Some(new) if !values_equal(old, new) => {
                results.push(FieldDiffResult::with_modified(key.clone(), new.clone()));
            }
            Some(_) => {}
            None => results.push(FieldDiffResult::with_removed(key.clone(), old.clone())),
        }
    }

    for (key, new) in modified {
        if config.is_tracked(key) && is_scalar(new) && !original.has(key) {
            results.push(FieldDiffResult::with_added(key.clone(), new.clone()));
        }
    }

    results
}

/// Compare record-valued fields such as `geoAvailability` as whole values.
///
/// A field qualifies when either side holds a record and the original side
/// is not a scalar (that case is already an attribute modification).
/// Fields in `skip` (the tracked collections) are never considered.
pub fn nested_record_changes(
    original: &Record,
    modified: &Record,
    config: &DifferConfig,
    skip: &[&str],
) -> Vec<FieldDiffResult> {
    let qualifies = |key: &str| {
        config.is_tracked(key)
            && !skip.contains(&key)
            && !original.field(key).is_some_and(is_scalar)
            && (original.record_field(key).is_some() || modified.record_field(key).is_some())
    };

    let mut results = Vec::new();

    for key in original.keys().filter(|k| qualifies(k.as_str())) {
        match (original.field(key), modified.field(key)) {
            (Some(old), None) => {
                results.push(FieldDiffResult::with_removed(key.clone(), old.clone()));
            }
            (Some(old), Some(new)) if !values_equal(old, new) => {
                results.push(FieldDiffResult::with_modified(key.clone(), new.clone()));
            }
            (None, Some(new)) => {
                results.push(FieldDiffResult::with_added(key.clone(), new.clone()));
            }
            _ => {}
        }
    }

    for (key, new) in modified {
        if !original.contains_key(key) && qualifies(key.as_str()) && !new.is_null() {
            results.push(FieldDiffResult::with_added(key.clone(), new.clone()));
        }
    }

    results
}

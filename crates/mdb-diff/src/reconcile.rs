//! Collection reconciliation: match two ordered collections item by item.
//!
//! Given the original and modified collection of one field and a pair of
//! comparators, produce three lists:
//!
//! - `added`: modified items no original item is identical to, in the order
//!   they appear in `modified`;
//! - `modified`: for each original position, the first modified item with
//!   the same identity but different content, else `None`;
//! - `removed`: for each original position, the original item when no
//!   modified item has its identity, else `None`.
//!
//! `modified` and `removed` always have the length of the original
//! collection, so consumers can zip them with it.
//!
//! When an identity matches several candidates the first one wins. That is
//! logged at debug level, never treated as an error.

use tracing::debug;

use mdb_types::{RecordExt, Truthy, Value};

use crate::comparators::{CollectionRule, Comparator};
use crate::field_result::{FieldChange, FieldDiffResult};

/// Unpacked result of reconciling one collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciliation {
    pub added: Vec<Value>,
    pub modified: Vec<Option<Value>>,
    pub removed: Vec<Option<Value>>,
}

impl Reconciliation {
    /// Convert into a field result, dropping lists without a truthy entry.
    pub fn into_field_result(self, field: impl Into<String>) -> FieldDiffResult {
        let added = FieldChange::items(self.added);
        let modified = FieldChange::Items(self.modified);
        let removed = FieldChange::Items(self.removed);
        FieldDiffResult {
            field: field.into(),
            added: added.is_significant().then_some(added),
            modified: modified.is_significant().then_some(modified),
            removed: removed.is_significant().then_some(removed),
        }
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        !self.added.as_slice().is_truthy()
            && !self.modified.as_slice().is_truthy()
            && !self.removed.as_slice().is_truthy()
    }
}

/// Reconcile `original` against `modified` with explicit comparators.
pub fn reconcile(
    original: &[Value],
    modified: &[Value],
    identity: &dyn Comparator,
    value: &dyn Comparator,
) -> Reconciliation {
    let added = modified
        .iter()
        .filter(|m| !original.iter().any(|o| identity.matches(o, m)))
        .cloned()
        .collect();

    let mut modified_items = Vec::with_capacity(original.len());
    let mut removed_items = Vec::with_capacity(original.len());

    for (index, o) in original.iter().enumerate() {
        let candidates: Vec<&Value> = modified.iter().filter(|m| identity.matches(o, m)).collect();
        if candidates.is_empty() {
            modified_items.push(None);
            removed_items.push(Some(o.clone()));
            continue;
        }
        if candidates.len() > 1 {
            debug!(index, candidates = candidates.len(), "ambiguous identity match, first wins");
        }

        let changed = candidates.into_iter().find(|m| !value.matches(o, m));
        modified_items.push(changed.cloned());
        removed_items.push(None);
    }

    Reconciliation {
        added,
        modified: modified_items,
        removed: removed_items,
    }
}

/// Reconcile the collection named by `rule` between two records.
///
/// Absent or non-array fields read as empty collections.
pub fn reconcile_field<R: RecordExt + ?Sized>(
    rule: &CollectionRule,
    original: &R,
    modified: &R,
) -> FieldDiffResult {
    let result = reconcile(
        original.items(&rule.field),
        modified.items(&rule.field),
        rule.identity.as_ref(),
        rule.value.as_ref(),
    );
    debug!(
        field = %rule.field,
        added = result.added.len(),
        modified = result.modified.iter().flatten().count(),
        removed = result.removed.iter().flatten().count(),
        "reconciled collection"
    );
    result.into_field_result(rule.field.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::{categories, spatials, subjects};
    use serde_json::json;

    fn by_id(a: &Value, b: &Value) -> bool {
        a.field("id") == b.field("id")
    }

    fn same(a: &Value, b: &Value) -> bool {
        a == b
    }

    #[test]
    fn identical_collections_have_no_diff() {
        let items = vec![json!({"id": 1}), json!({"id": 2})];
        let r = reconcile(&items, &items, &by_id, &same);
        assert!(r.is_empty());
        assert_eq!(r.modified, vec![None, None]);
        assert_eq!(r.removed, vec![None, None]);
    }

    #[test]
    fn collection_modify_by_identity() {
        let original = vec![json!({"resource": "c1"}), json!({"resource": "c2"})];
        let modified = vec![json!({"resource": "c1"}), json!({"resource": "c2", "title": "øl"})];
        let r = reconcile(&original, &modified, &categories::resource_equals, &categories::title_equals);
        assert!(r.added.is_empty());
        assert_eq!(r.modified, vec![None, Some(json!({"resource": "c2", "title": "øl"}))]);
        assert_eq!(r.removed, vec![None, None]);
    }

    #[test]
    fn additions_preserve_modified_order() {
        let original = vec![json!({"id": 1})];
        let modified = vec![json!({"id": 3}), json!({"id": 1}), json!({"id": 2})];
        let r = reconcile(&original, &modified, &by_id, &same);
        assert_eq!(r.added, vec![json!({"id": 3}), json!({"id": 2})]);
    }

    #[test]
    fn removals_are_positional() {
        let original = vec![json!({"title": "a"}), json!({"title": "b"}), json!({"title": "c"})];
        let modified = vec![json!({"title": "a"}), json!({"title": "b"})];
        let r = reconcile(&original, &modified, &subjects::title_equals, &subjects::title_equals);
        assert_eq!(r.removed, vec![None, None, Some(json!({"title": "c"}))]);
        assert_eq!(r.modified.len(), 3);
    }

    #[test]
    fn value_identity_reports_remove_and_add() {
        let original = vec![json!({"title": "sub1"}), json!({"title": "sub2"})];
        let modified = vec![json!({"title": "sub1"}), json!({"title": "subX"})];
        let r = reconcile(&original, &modified, &subjects::title_equals, &subjects::title_equals);
        assert_eq!(r.added, vec![json!({"title": "subX"})]);
        assert_eq!(r.removed, vec![None, Some(json!({"title": "sub2"}))]);
        assert_eq!(r.modified, vec![None, None]);
    }

    #[test]
    fn spatial_rename_is_remove_plus_add() {
        let original = vec![json!({"name": "Oslo", "latitude": 7.123, "longitude": -1.456})];
        let modified = vec![json!({"name": "Kristiania", "latitude": 7.123, "longitude": -1.456})];
        let equals = |a: &Value, b: &Value| spatials::value_equals(a, b, 1e-9);
        let r = reconcile(&original, &modified, &equals, &equals);
        assert_eq!(r.added.len(), 1);
        assert_eq!(r.removed, vec![Some(original[0].clone())]);
        assert_eq!(r.modified, vec![None]);
    }

    #[test]
    fn ambiguous_identity_first_changed_candidate_wins() {
        let original = vec![json!({"id": 1, "v": "a"})];
        let modified = vec![
            json!({"id": 1, "v": "b"}),
            json!({"id": 1, "v": "c"}),
        ];
        let r = reconcile(&original, &modified, &by_id, &same);
        assert!(r.added.is_empty());
        assert_eq!(r.modified, vec![Some(json!({"id": 1, "v": "b"}))]);
    }

    #[test]
    fn unchanged_candidate_does_not_hide_changed_one() {
        let original = vec![json!({"id": 1, "v": "a"})];
        let modified = vec![json!({"id": 1, "v": "a"}), json!({"id": 1, "v": "c"})];
        let r = reconcile(&original, &modified, &by_id, &same);
        assert_eq!(r.modified, vec![Some(json!({"id": 1, "v": "c"}))]);
    }

    #[test]
    fn empty_sides() {
        let items = vec![json!({"id": 1})];
        let r = reconcile(&[], &items, &by_id, &same);
        assert_eq!(r.added, items);
        assert!(r.modified.is_empty() && r.removed.is_empty());

        let r = reconcile(&items, &[], &by_id, &same);
        assert!(r.added.is_empty());
        assert_eq!(r.removed, vec![Some(json!({"id": 1}))]);
    }

    #[test]
    fn field_result_prunes_empty_lists() {
        let rule = CollectionRule::new("categories", categories::resource_equals, categories::title_equals);
        let original = json!({"categories": [{"resource": "c1"}]});
        let modified = json!({"categories": [{"resource": "c1"}, {"resource": "c2"}]});
        let result = reconcile_field(&rule, &original, &modified);
        assert_eq!(result.field, "categories");
        assert_eq!(result.added, Some(FieldChange::items([json!({"resource": "c2"})])));
        assert!(result.modified.is_none());
        assert!(result.removed.is_none());
    }

    #[test]
    fn missing_field_reads_as_empty() {
        let rule = CollectionRule::value_identity("subjects", subjects::title_equals);
        let result = reconcile_field(&rule, &json!({}), &json!({"subjects": null}));
        assert!(!result.has_diff());
        assert!(json!({}).items("subjects").is_empty());
    }
}

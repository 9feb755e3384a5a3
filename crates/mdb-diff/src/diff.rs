//! The diff aggregate: everything that changed between two records.
//!
//! A [`Diff`] holds three mappings from field name to [`FieldChange`]:
//! `added`, `modified` and `removed`. Scalar fields appear in at most one of
//! them; a collection field may appear in several (e.g. contributors both
//! added and modified).
//!
//! # Invariants
//!
//! - Collection entries in `modified` and `removed` are aligned with the
//!   original collection; entries in `added` hold only new items.
//! - After [`Diff::pack`], absence from a mapping means "no change of that
//!   kind": entries without any truthy value are gone.
//!
//! Older revisions of this API spelled the mappings `Added`, `Modified` and
//! `Removed`; the lower-case fields are the same data.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mdb_types::fields::{CONTRIBUTORS, REFERENCES, RES_ID};
use mdb_types::{is_scalar, Record, RecordExt, Truthy, Value};

use crate::comparators::references;
use crate::field_result::{FieldChange, FieldDiffResult};

/// One of the three mappings of a [`Diff`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Added, ChangeKind::Modified, ChangeKind::Removed];

    /// Past-tense verb, as used in change summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Removed => "removed",
        }
    }
}

/// Field name to change.
pub type ChangeMap = BTreeMap<String, FieldChange>;

/// The structured delta between an original and a modified record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    /// Fields (or collection items) present only in the modified record.
    #[serde(default)]
    pub added: ChangeMap,
    /// Changed fields with their new value; collections position-aligned.
    #[serde(default)]
    pub modified: ChangeMap,
    /// Fields (or collection items) present only in the original record,
    /// with their old value; collections position-aligned.
    #[serde(default)]
    pub removed: ChangeMap,
}

impl Diff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapping(&self, kind: ChangeKind) -> &ChangeMap {
        match kind {
            ChangeKind::Added => &self.added,
            ChangeKind::Modified => &self.modified,
            ChangeKind::Removed => &self.removed,
        }
    }

    pub fn mapping_mut(&mut self, kind: ChangeKind) -> &mut ChangeMap {
        match kind {
            ChangeKind::Added => &mut self.added,
            ChangeKind::Modified => &mut self.modified,
            ChangeKind::Removed => &mut self.removed,
        }
    }

    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    /// Merge one field's outcome into the aggregate.
    ///
    /// Changes without a truthy value are dropped.
    pub fn merge(&mut self, result: FieldDiffResult) {
        let FieldDiffResult {
            field,
            added,
            modified,
            removed,
        } = result;
        for (kind, change) in [
            (ChangeKind::Added, added),
            (ChangeKind::Modified, modified),
            (ChangeKind::Removed, removed),
        ] {
            if let Some(change) = change {
                self.record(kind, field.clone(), change);
            }
        }
    }

    /// Record a change under `field`. Collection changes for a field that
    /// already has an entry are appended to it.
    pub fn record(&mut self, kind: ChangeKind, field: impl Into<String>, change: FieldChange) {
        if !change.is_significant() {
            return;
        }
        match self.mapping_mut(kind).entry(field.into()) {
            Entry::Occupied(mut slot) => match (slot.get_mut(), change) {
                (FieldChange::Items(existing), FieldChange::Items(more)) => existing.extend(more),
                (current, change) => *current = change,
            },
            Entry::Vacant(slot) => {
                slot.insert(change);
            }
        }
    }

    pub fn add_to_added(&mut self, field: impl Into<String>, items: impl IntoIterator<Item = Value>) {
        self.record(ChangeKind::Added, field, FieldChange::items(items));
    }

    pub fn add_to_modified(&mut self, field: impl Into<String>, items: Vec<Option<Value>>) {
        self.record(ChangeKind::Modified, field, FieldChange::Items(items));
    }

    pub fn add_to_removed(&mut self, field: impl Into<String>, items: Vec<Option<Value>>) {
        self.record(ChangeKind::Removed, field, FieldChange::Items(items));
    }

    /// Drop every entry that no longer carries a truthy value.
    pub fn pack(&mut self) {
        for kind in ChangeKind::ALL {
            self.mapping_mut(kind).retain(|_, change| change.is_significant());
        }
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn has_diff(&self) -> bool {
        !self.added.is_empty() || !self.modified.is_empty() || !self.removed.is_empty()
    }

    pub fn has_add_modify_diff(&self) -> bool {
        !self.added.is_empty() || !self.modified.is_empty()
    }

    pub fn has_removals_only(&self) -> bool {
        !self.removed.is_empty() && !self.has_add_modify_diff()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        !self.has_diff()
    }

    /// Number of fields with additions.
    pub fn additions(&self) -> usize {
        self.added.len()
    }

    /// Number of fields with modifications.
    pub fn modifications(&self) -> usize {
        self.modified.len()
    }

    /// Number of fields with removals.
    pub fn removals(&self) -> usize {
        self.removed.len()
    }

    pub fn get(&self, kind: ChangeKind, field: &str) -> Option<&FieldChange> {
        self.mapping(kind).get(field)
    }

    /// Run `f` on the change for `field`, if there is one.
    pub fn if_present<R>(
        &self,
        kind: ChangeKind,
        field: &str,
        f: impl FnOnce(&FieldChange) -> R,
    ) -> Option<R> {
        self.get(kind, field).map(f)
    }

    /// Names of the fields in one mapping whose change is a plain scalar.
    pub fn primitive_valued_fields(&self, kind: ChangeKind) -> Vec<&str> {
        self.mapping(kind)
            .iter()
            .filter(|(_, change)| change.as_value().is_some_and(is_scalar))
            .map(|(field, _)| field.as_str())
            .collect()
    }

    /// Contributors in one mapping whose role has the given identifier.
    pub fn contributors_with_role(&self, kind: ChangeKind, role_res_id: &str) -> Vec<&Value> {
        self.get(kind, CONTRIBUTORS)
            .map(|change| {
                change
                    .values()
                    .filter(|c| has_role(c, role_res_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ---------------------------------------------------------------
    // Filtering
    // ---------------------------------------------------------------

    /// Keep only the listed fields, in all three mappings.
    pub fn retain_only<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keep: Vec<S> = fields.into_iter().collect();
        let allowed = |field: &String| keep.iter().any(|k| k.as_ref() == field.as_str());
        for kind in ChangeKind::ALL {
            self.mapping_mut(kind).retain(|field, _| allowed(field));
        }
    }

    /// Forget every change to `field`.
    pub fn remove_field(&mut self, field: &str) {
        for kind in ChangeKind::ALL {
            self.mapping_mut(kind).remove(field);
        }
    }

    /// Strip references of `reference_type` from all three mappings.
    ///
    /// Some reference types are mirrored from systems that are not
    /// authoritative and must never signal a change on their own.
    pub fn remove_references_of_type(&mut self, reference_type: &str) {
        self.eliminate_items(REFERENCES, |r| references::is_of_type(r, reference_type));
    }

    /// Strip contributors having `role_res_id` from all three mappings.
    pub fn eliminate_contributors_with_role(&mut self, role_res_id: &str) {
        self.eliminate_items(CONTRIBUTORS, |c| has_role(c, role_res_id));
    }

    /// Drop matching items from `field`. Added lists shrink; aligned lists
    /// keep their length with `None` in place of the dropped item.
    fn eliminate_items(&mut self, field: &str, matches: impl Fn(&Value) -> bool) {
        for kind in ChangeKind::ALL {
            let Some(FieldChange::Items(items)) = self.mapping_mut(kind).get_mut(field) else {
                continue;
            };
            if kind == ChangeKind::Added {
                items.retain(|item| !item.as_ref().is_some_and(&matches));
            } else {
                for item in items.iter_mut() {
                    if item.as_ref().is_some_and(&matches) {
                        *item = None;
                    }
                }
            }
        }
        self.pack();
    }

    // ---------------------------------------------------------------
    // Application
    // ---------------------------------------------------------------

    /// Apply `modified` onto `target`.
    ///
    /// Collection changes are merged positionally: index `i` of the target
    /// collection is replaced when the change has a truthy value at `i`.
    /// Scalar and nested record changes replace the target's value.
    pub fn recursive_apply_modifications(&self, target: &mut Record) {
        for (field, change) in &self.modified {
            match change {
                FieldChange::Value(value) => {
                    target.insert(field.clone(), value.clone());
                }
                FieldChange::Items(items) => match target.get_mut(field) {
                    Some(Value::Array(existing)) => {
                        for (index, item) in items.iter().enumerate() {
                            let Some(item) = item.as_ref().filter(|v| v.is_truthy()) else {
                                continue;
                            };
                            match existing.get_mut(index) {
                                Some(slot) => *slot = item.clone(),
                                None => existing.push(item.clone()),
                            }
                        }
                    }
                    _ => {
                        target.insert(field.clone(), truthy_array(items));
                    }
                },
            }
        }
    }

    /// Apply `removed` onto `target`: drop removed fields, and drop removed
    /// collection items by their original position.
    pub fn apply_removals(&self, target: &mut Record) {
        for (field, change) in &self.removed {
            match change {
                FieldChange::Value(_) => {
                    target.remove(field);
                }
                FieldChange::Items(items) => {
                    let Some(Value::Array(existing)) = target.get_mut(field) else {
                        continue;
                    };
                    let doomed: Vec<usize> = items
                        .iter()
                        .enumerate()
                        .filter(|(_, item)| item.is_truthy())
                        .map(|(index, _)| index)
                        .collect();
                    for index in doomed.into_iter().rev() {
                        if index < existing.len() {
                            existing.remove(index);
                        }
                    }
                }
            }
        }
    }

    /// Apply `added` onto `target`: new collection items are appended in
    /// order, new fields are set.
    pub fn apply_adds(&self, target: &mut Record) {
        for (field, change) in &self.added {
            match change {
                FieldChange::Value(value) => {
                    target.insert(field.clone(), value.clone());
                }
                FieldChange::Items(items) => match target.get_mut(field) {
                    Some(Value::Array(existing)) => {
                        existing.extend(items.iter().flatten().filter(|v| v.is_truthy()).cloned());
                    }
                    _ => {
                        target.insert(field.clone(), truthy_array(items));
                    }
                },
            }
        }
    }

    /// Apply the whole diff: modifications, then removals, then additions.
    ///
    /// Modifications and removals address original positions, so they run
    /// before additions grow the collections.
    pub fn apply(&self, target: &mut Record) {
        self.recursive_apply_modifications(target);
        self.apply_removals(target);
        self.apply_adds(target);
    }

    /// Apply onto a copy of `original` and return the result.
    pub fn applied_to(&self, original: &Record) -> Record {
        let mut patched = original.clone();
        self.apply(&mut patched);
        patched
    }
}

fn has_role(contributor: &Value, role_res_id: &str) -> bool {
    contributor.path_str(&["role", RES_ID]) == Some(role_res_id)
}

fn truthy_array(items: &[Option<Value>]) -> Value {
    Value::Array(items.iter().flatten().filter(|v| v.is_truthy()).cloned().collect())
}

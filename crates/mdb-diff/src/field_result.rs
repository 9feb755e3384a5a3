//! Per-field diff outcomes.

use serde::{Deserialize, Serialize};

use mdb_types::{Truthy, Value};

use crate::explain::describe_item;

/// The change recorded for one field in one of the three diff mappings.
///
/// Serializes untagged, so a diff maps onto plain JSON: scalar and nested
/// record changes as the value itself, collection changes as an array with
/// `null` at positions that did not change.
///
/// Deserialization reads every JSON array as [`FieldChange::Items`]. A
/// non-collection field whose value is an array therefore comes back as a
/// collection change; diffs that must survive a JSON round trip exactly
/// should only carry arrays for tracked collections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldChange {
    /// Collection change. Modified and removed lists are aligned with the
    /// original collection; added lists hold only new items.
    Items(Vec<Option<Value>>),
    /// Scalar or nested record change.
    Value(Value),
}

impl FieldChange {
    /// A dense list of items, e.g. newly added collection entries.
    pub fn items(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Items(items.into_iter().map(Some).collect())
    }

    /// Iterate the truthy entries: the single value, or every changed item.
    pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Self::Value(v) => Box::new(std::iter::once(v).filter(|v| !v.is_null())),
            Self::Items(items) => Box::new(items.iter().flatten().filter(|v| v.is_truthy())),
        }
    }

    /// The collection list, if this is a collection change.
    pub fn as_items(&self) -> Option<&[Option<Value>]> {
        match self {
            Self::Items(items) => Some(items),
            Self::Value(_) => None,
        }
    }

    /// The value, if this is a scalar or nested record change.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Items(_) => None,
        }
    }

    /// Whether the change carries information worth keeping.
    ///
    /// Collections need at least one truthy item. Scalars are kept even
    /// when falsy (a change to `""`, `0` or `false` is still a change);
    /// only `null` and empty containers are dropped.
    pub fn is_significant(&self) -> bool {
        match self {
            Self::Items(items) => items.as_slice().is_truthy(),
            Self::Value(Value::Null) => false,
            Self::Value(Value::Array(a)) => !a.is_empty(),
            Self::Value(Value::Object(o)) => !o.is_empty(),
            Self::Value(_) => true,
        }
    }
}

impl From<Value> for FieldChange {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// The diff outcome for a single named field.
///
/// A scalar field sets at most one of `added`, `modified`, `removed`. A
/// collection field may set several at once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldDiffResult {
    pub field: String,
    pub added: Option<FieldChange>,
    pub modified: Option<FieldChange>,
    pub removed: Option<FieldChange>,
}

impl FieldDiffResult {
    pub fn with_added(field: impl Into<String>, change: impl Into<FieldChange>) -> Self {
        Self {
            field: field.into(),
            added: Some(change.into()),
            ..Default::default()
        }
    }

    pub fn with_modified(field: impl Into<String>, change: impl Into<FieldChange>) -> Self {
        Self {
            field: field.into(),
            modified: Some(change.into()),
            ..Default::default()
        }
    }

    pub fn with_removed(field: impl Into<String>, change: impl Into<FieldChange>) -> Self {
        Self {
            field: field.into(),
            removed: Some(change.into()),
            ..Default::default()
        }
    }

    /// No change for `field`.
    pub fn unchanged(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn has_diff(&self) -> bool {
        self.has_add_modify_diff() || significant(&self.removed)
    }

    pub fn has_add_modify_diff(&self) -> bool {
        significant(&self.added) || significant(&self.modified)
    }

    /// One line per changed item, e.g. `subjects added: sub3`.
    pub fn explain_collection_change(&self) -> String {
        let mut out = String::new();
        for (verb, change) in [
            ("added", &self.added),
            ("modified", &self.modified),
            ("removed", &self.removed),
        ] {
            let Some(change) = change else { continue };
            for item in change.values() {
                out.push_str(&format!("{} {}: {}\n", self.field, verb, describe_item(item)));
            }
        }
        out
    }
}

fn significant(change: &Option<FieldChange>) -> bool {
    change.as_ref().is_some_and(FieldChange::is_significant)
}

//! Identity and value comparators for tracked collections.
//!
//! Every tracked collection is reconciled with a pair of predicates:
//!
//! - **identity** decides whether an original item and a modified item
//!   denote the same real-world entity;
//! - **value** decides, for a pair already matched by identity, whether
//!   their content is equal.
//!
//! When identity is itself value-based, an edited item cannot be matched
//! to its previous version and is reported as removed + added instead of
//! modified. Comparators that prefer a stable `resId` and fall back to a
//! natural key ("mixed identity") avoid that where identifiers exist.

use std::fmt;
use std::sync::Arc;

use mdb_types::fields::{CATEGORIES, CONTRIBUTORS, REFERENCES, SPATIALS, SUBJECTS};
use mdb_types::{values_equal, RecordExt, Value};

use crate::config::DifferConfig;

pub mod categories;
pub mod contributors;
pub mod references;
pub mod spatials;
pub mod subjects;

/// A predicate over an (original, modified) pair of collection items.
pub trait Comparator: Send + Sync {
    fn matches(&self, original: &Value, modified: &Value) -> bool;
}

impl<F> Comparator for F
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    fn matches(&self, original: &Value, modified: &Value) -> bool {
        self(original, modified)
    }
}

/// A tracked collection field together with its comparator pair.
#[derive(Clone)]
pub struct CollectionRule {
    pub field: String,
    pub identity: Arc<dyn Comparator>,
    pub value: Arc<dyn Comparator>,
}

impl CollectionRule {
    pub fn new(
        field: impl Into<String>,
        identity: impl Comparator + 'static,
        value: impl Comparator + 'static,
    ) -> Self {
        Self {
            field: field.into(),
            identity: Arc::new(identity),
            value: Arc::new(value),
        }
    }

    /// A rule whose identity is the value comparison itself.
    pub fn value_identity(field: impl Into<String>, equals: impl Comparator + 'static) -> Self {
        let equals: Arc<dyn Comparator> = Arc::new(equals);
        Self {
            field: field.into(),
            identity: Arc::clone(&equals),
            value: equals,
        }
    }

    /// Replace the identity comparator, keeping the value comparator.
    pub fn with_identity(mut self, identity: impl Comparator + 'static) -> Self {
        self.identity = Arc::new(identity);
        self
    }
}

impl fmt::Debug for CollectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRule")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// The rules a default [`Differ`](crate::Differ) reconciles, in order.
pub fn default_rules(config: &DifferConfig) -> Vec<CollectionRule> {
    let tolerance = config.coordinate_tolerance;
    vec![
        CollectionRule::new(
            CONTRIBUTORS,
            contributors::value_based_identity,
            contributors::value_equals,
        ),
        CollectionRule::new(CATEGORIES, categories::resource_equals, categories::title_equals),
        CollectionRule::value_identity(SUBJECTS, subjects::title_equals),
        CollectionRule::new(
            SPATIALS,
            move |a: &Value, b: &Value| spatials::are_same_spatial(a, b, tolerance),
            move |a: &Value, b: &Value| spatials::value_equals(a, b, tolerance),
        ),
        CollectionRule::value_identity(REFERENCES, references::same_reference),
    ]
}

/// `resId` identity when the original carries one, `fallback` otherwise.
pub fn mixed_identity(original: &Value, modified: &Value, fallback: impl Fn(&Value, &Value) -> bool) -> bool {
    match original.str_field(mdb_types::fields::RES_ID) {
        Some(res_id) => modified.str_field(mdb_types::fields::RES_ID) == Some(res_id),
        None => fallback(original, modified),
    }
}

/// Compare the value at `path` on both sides; two absent values are equal.
pub(crate) fn same_at(a: &Value, b: &Value, path: &[&str]) -> bool {
    match (a.path(path), b.path(path)) {
        (Some(x), Some(y)) => values_equal(x, y),
        (x, y) => x == y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn closures_are_comparators() {
        let rule = CollectionRule::new(
            "things",
            |a: &Value, b: &Value| a.str_field("id") == b.str_field("id"),
            |a: &Value, b: &Value| a == b,
        );
        assert!(rule.identity.matches(&json!({"id": "1"}), &json!({"id": "1", "x": 2})));
        assert!(!rule.value.matches(&json!({"id": "1"}), &json!({"id": "1", "x": 2})));
    }

    #[test]
    fn value_identity_shares_the_predicate() {
        let rule = CollectionRule::value_identity("subjects", subjects::title_equals);
        assert!(Arc::ptr_eq(&rule.identity, &rule.value));
    }

    #[test]
    fn with_identity_keeps_value() {
        let rule = CollectionRule::value_identity("subjects", subjects::title_equals)
            .with_identity(subjects::mixed_identity);
        assert!(!Arc::ptr_eq(&rule.identity, &rule.value));
        assert!(rule
            .identity
            .matches(&json!({"resId": "s1", "title": "a"}), &json!({"resId": "s1", "title": "b"})));
    }

    #[test]
    fn default_rules_cover_tracked_collections() {
        let fields: Vec<String> = default_rules(&DifferConfig::default())
            .into_iter()
            .map(|r| r.field)
            .collect();
        assert_eq!(
            fields,
            vec!["contributors", "categories", "subjects", "spatials", "references"]
        );
    }

    #[test]
    fn mixed_identity_prefers_res_id() {
        let by_title = |a: &Value, b: &Value| same_at(a, b, &["title"]);
        let a = json!({"resId": "x", "title": "one"});
        assert!(mixed_identity(&a, &json!({"resId": "x", "title": "two"}), by_title));
        assert!(!mixed_identity(&a, &json!({"resId": "y", "title": "one"}), by_title));
        assert!(mixed_identity(&json!({"title": "one"}), &json!({"resId": "y", "title": "one"}), by_title));
    }

    #[test]
    fn same_at_compares_numbers_by_value() {
        assert!(same_at(&json!({"n": {"v": 2}}), &json!({"n": {"v": 2.0}}), &["n", "v"]));
        assert!(!same_at(&json!({"n": {"v": 2}}), &json!({"n": {}}), &["n", "v"]));
        assert!(same_at(&json!({}), &json!({"n": null}), &["n"]));
    }

    #[test]
    fn debug_shows_field() {
        let rule = CollectionRule::value_identity("subjects", subjects::title_equals);
        assert!(format!("{rule:?}").contains("subjects"));
    }
}

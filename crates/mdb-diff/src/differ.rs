//! The orchestrator: diff two records field by field.

use tracing::debug;

use mdb_types::{as_record, Record, Value};

use crate::attributes::{attribute_changes, nested_record_changes};
use crate::comparators::{default_rules, CollectionRule};
use crate::config::DifferConfig;
use crate::diff::Diff;
use crate::error::DiffResult;
use crate::reconcile::reconcile_field;

/// Computes [`Diff`]s between pairs of editorial records.
///
/// A differ is configured once (ignore-set, comparator pairs per tracked
/// collection) and can then be reused for any number of comparisons. It
/// never mutates its inputs and holds no per-comparison state, so one
/// differ can be shared across threads.
///
/// ```rust
/// use mdb_diff::{Differ, FieldChange};
/// use serde_json::json;
///
/// let original = json!({"title": "foo", "baz": "bazz"});
/// let modified = json!({"title": "foo", "baz": "bazt"});
/// let diff = Differ::default().calculate_values(&original, &modified).unwrap();
/// assert_eq!(diff.modified["baz"], FieldChange::from(json!("bazt")));
/// assert!(diff.added.is_empty() && diff.removed.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Differ {
    config: DifferConfig,
    rules: Vec<CollectionRule>,
}

impl Default for Differ {
    fn default() -> Self {
        Self::new(DifferConfig::default())
    }
}

impl Differ {
    /// A differ with the default comparators for every tracked collection.
    pub fn new(config: DifferConfig) -> Self {
        let rules = default_rules(&config);
        Self { config, rules }
    }

    /// A differ tracking exactly the given collections.
    pub fn with_rules(config: DifferConfig, rules: Vec<CollectionRule>) -> Self {
        Self { config, rules }
    }

    /// Replace the rule for `rule.field`, or start tracking a new field.
    pub fn with_rule(mut self, rule: CollectionRule) -> Self {
        match self.rules.iter_mut().find(|r| r.field == rule.field) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DifferConfig {
        &self.config
    }

    /// The tracked collections, in reconciliation order.
    pub fn rules(&self) -> &[CollectionRule] {
        &self.rules
    }

    /// The rule for a tracked collection.
    pub fn rule(&self, field: &str) -> Option<&CollectionRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Compute the diff from `original` to `modified`.
    ///
    /// Scalar attributes first, then nested records, then each tracked
    /// collection.
    pub fn calculate(&self, original: &Record, modified: &Record) -> Diff {
        let mut diff = Diff::new();

        for result in attribute_changes(original, modified, &self.config) {
            diff.merge(result);
        }

        if self.config.track_nested_records {
            let tracked: Vec<&str> = self.rules.iter().map(|r| r.field.as_str()).collect();
            for result in nested_record_changes(original, modified, &self.config, &tracked) {
                diff.merge(result);
            }
        }

        for rule in &self.rules {
            if !self.config.is_tracked(&rule.field) {
                continue;
            }
            diff.merge(reconcile_field(rule, original, modified));
        }

        diff.pack();
        debug!(
            added = diff.additions(),
            modified = diff.modifications(),
            removed = diff.removals(),
            "calculated diff"
        );
        diff
    }

    /// [`calculate`](Self::calculate) over raw JSON values, which must both
    /// be objects.
    pub fn calculate_values(&self, original: &Value, modified: &Value) -> DiffResult<Diff> {
        let original = as_record(original, "original")?;
        let modified = as_record(modified, "modified")?;
        Ok(self.calculate(original, modified))
    }
}

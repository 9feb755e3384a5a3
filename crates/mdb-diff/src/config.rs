use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mdb_types::fields::{EDITORIAL_IGNORABLES, SYSTEM_FIELDS};

/// Configuration for a [`Differ`](crate::Differ).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferConfig {
    /// Fields generated by the service. Never reported as changes.
    pub system_fields: BTreeSet<String>,
    /// Additional fields the caller excludes from change tracking.
    pub ignored_fields: BTreeSet<String>,
    /// Compare record-valued fields (e.g. `geoAvailability`) as whole values.
    pub track_nested_records: bool,
    /// Relative tolerance used when comparing spatial coordinates.
    pub coordinate_tolerance: f64,
}

impl Default for DifferConfig {
    fn default() -> Self {
        Self {
            system_fields: SYSTEM_FIELDS.iter().map(|f| f.to_string()).collect(),
            ignored_fields: BTreeSet::new(),
            track_nested_records: true,
            coordinate_tolerance: 1e-9,
        }
    }
}

impl DifferConfig {
    /// The configuration editorial sync jobs run with: titles, descriptions,
    /// publishing flags and durations are owned by other systems.
    pub fn editorial() -> Self {
        Self {
            ignored_fields: EDITORIAL_IGNORABLES.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Add a field to the ignore-set.
    pub fn ignore(mut self, field: impl Into<String>) -> Self {
        self.ignored_fields.insert(field.into());
        self
    }

    /// Whether `field` takes part in change tracking.
    pub fn is_tracked(&self, field: &str) -> bool {
        !self.system_fields.contains(field) && !self.ignored_fields.contains(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DifferConfig::default();
        assert!(!c.is_tracked("resId"));
        assert!(!c.is_tracked("created"));
        assert!(!c.is_tracked("lastUpdated"));
        assert!(c.is_tracked("title"));
        assert!(c.track_nested_records);
        assert_eq!(c.coordinate_tolerance, 1e-9);
    }

    #[test]
    fn editorial_ignores_owned_fields() {
        let c = DifferConfig::editorial();
        for field in ["title", "shortDescription", "published", "embeddingAllowed", "duration"] {
            assert!(!c.is_tracked(field), "{field} should be ignored");
        }
        assert!(!c.is_tracked("resId"));
        assert!(c.is_tracked("description"));
    }

    #[test]
    fn ignore_builder() {
        let c = DifferConfig::default().ignore("baz");
        assert!(!c.is_tracked("baz"));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let c: DifferConfig = serde_json::from_str(r#"{"ignored_fields": ["title"]}"#).unwrap();
        assert!(!c.is_tracked("title"));
        assert!(!c.is_tracked("resId"));
        assert!(c.track_nested_records);
    }
}

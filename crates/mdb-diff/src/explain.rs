//! Human-readable rendering of diffs.
//!
//! Rendering never fails on unexpected shapes: an item without the keys a
//! renderer looks for falls back to its compact JSON form.

use std::fmt;

use mdb_types::fields::{CONTRIBUTORS, RES_ID};
use mdb_types::{RecordExt, Value};

use crate::diff::{ChangeKind, Diff};
use crate::error::DiffResult;
use crate::field_result::FieldChange;

/// One-line description of a changed item.
///
/// Locations render by `name`, categories and subjects by `title`,
/// contributors as `{contact title} as {role}`. Anything else renders as
/// compact JSON (strings without quotes).
pub fn describe_item(item: &Value) -> String {
    if let Some(name) = item.str_field("name") {
        return name.to_string();
    }
    if let Some(title) = item.str_field("title") {
        return title.to_string();
    }
    if let Some(text) = describe_contributor(item) {
        return text;
    }
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn describe_contributor(contributor: &Value) -> Option<String> {
    let title = contributor.path_str(&["contact", "title"]).filter(|t| !t.is_empty())?;
    let role = contributor
        .path_str(&["role", "title"])
        .or_else(|| contributor.path_str(&["role", RES_ID]))
        .filter(|r| !r.is_empty());
    Some(match role {
        Some(role) => format!("{title} as {role}"),
        None => title.to_string(),
    })
}

/// `{contact title} as {role resId}`, empty for a missing contributor.
pub fn explain_contributor_change(contributor: Option<&Value>) -> String {
    match contributor {
        Some(c) => format!(
            "{} as {}",
            c.path_str(&["contact", "title"]).unwrap_or_default(),
            c.path_str(&["role", RES_ID]).unwrap_or_default()
        ),
        None => String::new(),
    }
}

impl Diff {
    /// Every non-empty mapping as pretty-printed JSON.
    pub fn explain(&self) -> DiffResult<String> {
        let mut out = String::new();
        for (label, map) in [
            ("Added", &self.added),
            ("Modified", &self.modified),
            ("Removed", &self.removed),
        ] {
            if !map.is_empty() {
                out.push_str(label);
                out.push_str(":\n");
                out.push_str(&serde_json::to_string_pretty(map)?);
                out.push('\n');
            }
        }
        Ok(out)
    }

    /// Added and removed contributors on one line, e.g.
    /// `Added: ole olsen as http://authority.nrk.no/role/V23 Removed: ...`.
    pub fn explain_contributor_changes(&self) -> String {
        let mut parts = Vec::new();
        for (label, kind) in [("Added", ChangeKind::Added), ("Removed", ChangeKind::Removed)] {
            let Some(change) = self.get(kind, CONTRIBUTORS) else {
                continue;
            };
            let names: Vec<String> = change
                .values()
                .map(|c| explain_contributor_change(Some(c)))
                .collect();
            if !names.is_empty() {
                parts.push(format!("{label}: {}", names.join(", ")));
            }
        }
        if parts.is_empty() {
            return String::new();
        }
        format!("{}\n", parts.join(" "))
    }

    /// Contributor summary followed by the changed field names per mapping,
    /// e.g. `Added: fizz, Modified: baz, Removed: title`.
    pub fn explain_short(&self) -> String {
        let fields: Vec<String> = [
            ("Added", &self.added),
            ("Modified", &self.modified),
            ("Removed", &self.removed),
        ]
        .into_iter()
        .filter(|(_, map)| !map.is_empty())
        .map(|(label, map)| {
            let names: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("{label}: {}", names.join(" "))
        })
        .collect();
        format!("{}{}", self.explain_contributor_changes(), fields.join(", "))
    }

    /// One line per changed item or field, e.g. `contributors added: ole
    /// olsen as aTitle` or `baz modified: bazt`.
    pub fn explain_long(&self) -> String {
        let mut out = String::new();
        for kind in ChangeKind::ALL {
            for (field, change) in self.mapping(kind) {
                match change {
                    FieldChange::Items(_) => {
                        for item in change.values() {
                            out.push_str(&format!("{field} {}: {}\n", kind.as_str(), describe_item(item)));
                        }
                    }
                    FieldChange::Value(value) => {
                        out.push_str(&format!("{field} {}: {}\n", kind.as_str(), describe_item(value)));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.explain_short())
    }
}

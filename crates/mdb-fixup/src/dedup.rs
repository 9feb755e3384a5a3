//! Content-key deduplication of collection items.
//!
//! Each item gets a derived key built from the fields that make it the
//! "same" entity to an editor. The first item per key is kept and order is
//! preserved.

use std::collections::HashSet;

use tracing::{debug, warn};

use mdb_types::fields::{CONTRIBUTORS, RES_ID, SPATIALS};
use mdb_types::{is_client_generated_id, Record, RecordExt, Value};

use crate::error::{FixupError, FixupResult};

/// Placeholder for a missing coordinate or name in a spatial key.
const MISSING: &str = "-";

/// Key for a contributor: contact title, role title, character name,
/// comment and capacity joined with `:`.
///
/// Fails when the role identifier was generated by the client.
pub fn contributor_key(contributor: &Value) -> FixupResult<String> {
    if let Some(res_id) = contributor.path_str(&["role", RES_ID]) {
        if is_client_generated_id(res_id) {
            warn!(res_id, "contributor role has a client generated identifier");
            return Err(FixupError::ClientGeneratedRole {
                res_id: res_id.to_string(),
            });
        }
    }
    let parts = [
        contributor.path(&["contact", "title"]),
        contributor.path(&["role", "title"]),
        contributor.field("characterName"),
        contributor.field("comment"),
        contributor.field("capacity"),
    ];
    Ok(parts.map(key_part).join(":"))
}

/// Strings as-is, other values in their JSON form, absent as empty.
fn key_part(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Key for a spatial location: name, latitude and longitude joined with
/// `:`, each `-` when missing.
pub fn spatial_key(spatial: &Value) -> String {
    let coordinate = |field: &str| {
        spatial
            .f64_field(field)
            .map(|v| v.to_string())
            .unwrap_or_else(|| MISSING.to_string())
    };
    let name = spatial.str_field("name").unwrap_or(MISSING);
    format!("{name}:{}:{}", coordinate("latitude"), coordinate("longitude"))
}

/// Keep the first contributor per [`contributor_key`].
pub fn squash_contributors(contributors: &[Value]) -> FixupResult<Vec<Value>> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(contributors.len());
    for contributor in contributors {
        if seen.insert(contributor_key(contributor)?) {
            kept.push(contributor.clone());
        }
    }
    Ok(kept)
}

/// Keep the first location per [`spatial_key`].
pub fn squash_spatials(spatials: &[Value]) -> Vec<Value> {
    let mut seen = HashSet::new();
    spatials
        .iter()
        .filter(|s| seen.insert(spatial_key(s)))
        .cloned()
        .collect()
}

/// Squash `contributors` and `spatials` of `record` in place.
///
/// Returns how many items were dropped. On error the record is left
/// untouched.
pub fn remove_duplicates(record: &mut Record) -> FixupResult<usize> {
    let contributors = match record.get(CONTRIBUTORS) {
        Some(Value::Array(items)) => Some(squash_contributors(items)?),
        _ => None,
    };
    let spatials = match record.get(SPATIALS) {
        Some(Value::Array(items)) => Some(squash_spatials(items)),
        _ => None,
    };

    let mut dropped = 0;
    for (field, squashed) in [(CONTRIBUTORS, contributors), (SPATIALS, spatials)] {
        let Some(squashed) = squashed else { continue };
        let before = record.items(field).len();
        dropped += before - squashed.len();
        if before != squashed.len() {
            debug!(field, dropped = before - squashed.len(), "removed duplicates");
        }
        record.insert(field.to_string(), Value::Array(squashed));
    }
    Ok(dropped)
}

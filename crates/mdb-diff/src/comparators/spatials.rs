//! Spatial locations:
//! `{resId, stadnamn: {resId}, name, latitude, longitude}`.
//!
//! Coordinates are floats that round-trip through several systems, so they
//! are compared with a relative tolerance rather than exactly.

use mdb_types::fields::RES_ID;
use mdb_types::{RecordExt, Truthy, Value};

use super::{mixed_identity as by_res_id, same_at};

/// Compare two optional coordinates.
///
/// Two absent (or zero) coordinates are the same; one absent one is not.
pub fn are_same_coordinate(a: Option<f64>, b: Option<f64>, tolerance: f64) -> bool {
    let a = a.filter(|v| *v != 0.0);
    let b = b.filter(|v| *v != 0.0);
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => is_close(a, b, tolerance),
        _ => false,
    }
}

fn is_close(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}

/// Same latitude and longitude within `tolerance`.
pub fn are_same_lat_lon(a: &Value, b: &Value, tolerance: f64) -> bool {
    are_same_coordinate(a.f64_field("latitude"), b.f64_field("latitude"), tolerance)
        && are_same_coordinate(a.f64_field("longitude"), b.f64_field("longitude"), tolerance)
}

/// Default identity: a named original matches only the same name; an
/// unnamed one matches by position.
pub fn are_same_spatial(original: &Value, modified: &Value, tolerance: f64) -> bool {
    match original.str_field("name").filter(|n| !n.is_empty()) {
        Some(name) => modified.str_field("name") == Some(name),
        None => are_same_lat_lon(original, modified, tolerance),
    }
}

/// `resId` when the original location has one, [`are_same_spatial`] otherwise.
pub fn mixed_identity(original: &Value, modified: &Value, tolerance: f64) -> bool {
    by_res_id(original, modified, |a, b| are_same_spatial(a, b, tolerance))
}

/// Content equality: same place by name and position, same place-name
/// authority entry.
pub fn value_equals(original: &Value, modified: &Value, tolerance: f64) -> bool {
    are_same_spatial(original, modified, tolerance)
        && are_same_lat_lon(original, modified, tolerance)
        && same_at(original, modified, &["stadnamn", RES_ID])
}

/// A location is usable when it has a name or a real position.
pub fn is_spatial(spatial: &Value) -> bool {
    if spatial.field("name").is_some_and(|name| name.is_truthy()) {
        return true;
    }
    let usable = |v: Option<f64>| v.is_some_and(|f| f != 0.0 && !f.is_nan());
    usable(spatial.f64_field("latitude")) && usable(spatial.f64_field("longitude"))
}

//! Well-known field names and authority tags.

/// Contributor collection (`contact` + `role` entries).
pub const CONTRIBUTORS: &str = "contributors";
/// Category collection.
pub const CATEGORIES: &str = "categories";
/// Subject (tag) collection.
pub const SUBJECTS: &str = "subjects";
/// Spatial location collection.
pub const SPATIALS: &str = "spatials";
/// External reference collection.
pub const REFERENCES: &str = "references";

/// Stable resource identifier assigned by the service.
pub const RES_ID: &str = "resId";
/// Creation timestamp, maintained by the service.
pub const CREATED: &str = "created";
/// Last update timestamp, maintained by the service.
pub const LAST_UPDATED: &str = "lastUpdated";

/// Fields the service generates itself; never part of a change signal.
pub const SYSTEM_FIELDS: [&str; 3] = [RES_ID, CREATED, LAST_UPDATED];

/// Fields editorial tooling usually leaves to other systems.
pub const EDITORIAL_IGNORABLES: [&str; 5] = [
    "title",
    "shortDescription",
    "published",
    "embeddingAllowed",
    "duration",
];

/// Reference type for programme-system ids.
pub const REFERENCE_PS_API: &str = "http://id.nrk.no/2016/mdb/reference/psAPI";
/// Reference type for clip ids.
pub const REFERENCE_GURI: &str = "http://id.nrk.no/2018/mdb/reference/guri";
/// Reference type mirrored from an older system; not authoritative.
pub const REFERENCE_G3_EXTERNAL: &str = "http://id.nrk.no/2016/mdb/reference/g3external";

/// Contributor role V23.
pub const ROLE_V23: &str = "http://authority.nrk.no/role/V23";
/// Contributor role N58.
pub const ROLE_N58: &str = "http://authority.nrk.no/role/N58";

/// Marker the REST client embeds in identifiers it invents locally.
pub const CLIENT_GENERATED_MARKERS: [&str; 2] = ["rest_client", "rest-client"];

//! Deduplication fixups for mdb editorial records.
//!
//! The metadata service can hand out the same contributor or location twice
//! under different system identifiers. These passes collapse such entries
//! by content before a record is diffed or stored.

pub mod dedup;
pub mod error;

pub use dedup::{contributor_key, remove_duplicates, spatial_key, squash_contributors, squash_spatials};
pub use error::{FixupError, FixupResult};

//! Error types for the diff crate.

use mdb_types::TypeError;

/// Errors that can occur during diff operations.
///
/// Computing a diff over two well-formed records never fails; errors only
/// arise at the edges, when raw JSON has to be accepted or emitted.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A top-level input was not a JSON object.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] TypeError),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

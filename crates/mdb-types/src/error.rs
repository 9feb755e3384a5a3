use thiserror::Error;

/// Errors produced when a value does not have the record shape we need.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("expected a JSON object for {context}, got {actual}")]
    NotARecord { context: String, actual: String },
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;

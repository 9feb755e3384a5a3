use thiserror::Error;

/// Errors raised while cleaning up a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixupError {
    /// A role carries an identifier the REST client invented locally. The
    /// record is corrupt upstream and must not be persisted.
    #[error("client generated role resId: {res_id}")]
    ClientGeneratedRole { res_id: String },
}

pub type FixupResult<T> = Result<T, FixupError>;

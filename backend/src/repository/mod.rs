//! Storage layer. Traits at the seams so services and the import
//! orchestrator receive their storage as injected collaborators; the
//! SQLite implementations open a short-lived connection per operation
//! against the configured database path.

pub mod collaborator;
pub mod user;

use rusqlite::ffi::ErrorCode;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl RepoError {
    /// Maps SQLite constraint violations to `Conflict`, everything else to
    /// the transparent variant.
    pub(crate) fn from_sqlite(err: rusqlite::Error, what: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            if e.code == ErrorCode::ConstraintViolation {
                return RepoError::Conflict(format!("{} already exists", what));
            }
        }
        RepoError::Sqlite(err)
    }
}

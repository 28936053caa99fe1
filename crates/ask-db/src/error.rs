//! Database error types for ask-db.
//!
//! Driver errors are classified on conversion: anything that means "the store
//! could not be reached or did not answer in time" becomes
//! [`DatabaseError::StoreUnavailable`], which callers may retry. Everything
//! else is permanent.

use ask_core::errors::CoreError;
use thiserror::Error;

use crate::retry::is_transient_turso_error;

/// `SQLite` primary result codes that indicate a transient store condition:
/// BUSY, LOCKED, IOERR, FULL, CANTOPEN, PROTOCOL.
const TRANSIENT_SQLITE_CODES: [i32; 6] = [5, 6, 10, 13, 14, 15];

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The store is unreachable, busy, or did not answer within the timeout.
    /// Nothing was committed; the caller may retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Caller input rejected before reaching the store.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Non-transient libSQL error (constraint violation, misuse, ...).
    #[error("libSQL error: {0}")]
    LibSql(libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<libsql::Error> for DatabaseError {
    fn from(e: libsql::Error) -> Self {
        let transient = match &e {
            libsql::Error::ConnectionFailed(_) => true,
            libsql::Error::SqliteFailure(code, _) => {
                TRANSIENT_SQLITE_CODES.contains(&(code & 0xff))
            }
            _ => is_transient_turso_error(&e),
        };
        if transient {
            Self::StoreUnavailable(e.to_string())
        } else {
            Self::LibSql(e)
        }
    }
}

//! # ask-db
//!
//! libSQL question store for askboard.
//!
//! Holds questions, tags, and their many-to-many relation, and implements the
//! two operations with real logic on top of them: filtered, ordered question
//! search and the one-way resolution transition.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

/// Exclusive use of the store connection for the span of one request.
pub type ConnectionGuard<'a> = MutexGuard<'a, libsql::Connection>;

/// Database handle for question board state.
///
/// Owns one libSQL connection. Requests take it with [`AskDb::acquire`] and
/// release it when the guard drops, so a transaction never interleaves with
/// another request's statements.
pub struct AskDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: Mutex<libsql::Connection>,
}

impl AskDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let ask_db = Self {
            db,
            conn: Mutex::new(conn),
        };
        ask_db.run_migrations().await?;
        tracing::debug!(path, "question store opened");
        Ok(ask_db)
    }

    /// Take the connection for one request.
    ///
    /// A request cancelled mid-transaction leaves the connection outside
    /// autocommit; that leftover transaction is rolled back here.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the leftover transaction cannot be rolled back.
    pub async fn acquire(&self) -> Result<ConnectionGuard<'_>, DatabaseError> {
        let conn = self.conn.lock().await;
        if !conn.is_autocommit() {
            tracing::warn!("rolling back transaction left open by a cancelled request");
            conn.execute("ROLLBACK", ()).await?;
        }
        Ok(conn)
    }
}

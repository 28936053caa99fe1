//! Service layer: the explicit store handle callers hold.
//!
//! `AskService` wraps `AskDb` (raw database access) and bounds every request
//! with a timeout. All repo methods are implemented as `impl AskService`.
//! There is no process-wide client: construct one service and pass it down.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::AskDb;
use crate::error::DatabaseError;
use crate::helpers::finish_transaction;

/// Default upper bound on one store request.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Question board operations over an injected store handle.
///
/// Every request follows this protocol:
/// 1. Acquire the connection
/// 2. Begin transaction
/// 3. Execute SQL
/// 4. Commit, or roll back on any failure
///
/// Steps 1 to 3 share one query-timeout deadline; expiry rolls back and
/// surfaces as `DatabaseError::StoreUnavailable`. The commit runs outside
/// the deadline, so a committed write is never reported as timed out.
pub struct AskService {
    db: AskDb,
    query_timeout: Duration,
}

impl AskService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    /// * `query_timeout`: upper bound on each request.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, query_timeout: Duration) -> Result<Self, DatabaseError> {
        let db = AskDb::open_local(db_path).await?;
        Ok(Self { db, query_timeout })
    }

    /// Create from an existing `AskDb` with the default timeout.
    #[must_use]
    pub const fn from_db(db: AskDb) -> Self {
        Self {
            db,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AskDb {
        &self.db
    }

    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Run `work` inside one transaction on the store connection.
    ///
    /// `work` gets a handle to the connection holding the open transaction.
    /// Commit happens after the deadline check: once `COMMIT` is issued the
    /// outcome is reported as-is.
    pub(crate) async fn in_transaction<T, F, Fut>(
        &self,
        op: &'static str,
        work: F,
    ) -> Result<T, DatabaseError>
    where
        F: FnOnce(libsql::Connection) -> Fut,
        Fut: Future<Output = Result<T, DatabaseError>>,
    {
        let deadline = Instant::now() + self.query_timeout;

        let conn = self.until(op, deadline, self.db.acquire()).await?;
        let tx = self
            .until(op, deadline, async {
                conn.transaction().await.map_err(DatabaseError::from)
            })
            .await?;

        let result = self.until(op, deadline, work(libsql::Connection::clone(&conn))).await;
        finish_transaction(tx, result).await
    }

    async fn until<T, F>(&self, op: &'static str, deadline: Instant, request: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, DatabaseError>>,
    {
        match tokio::time::timeout_at(deadline, request).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(op, timeout = ?self.query_timeout, "store request timed out");
                Err(DatabaseError::StoreUnavailable(format!(
                    "{op} timed out after {} ms",
                    self.query_timeout.as_millis()
                )))
            }
        }
    }
}

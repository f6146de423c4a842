//! SQLite connection factory.
//!
//! Uses diesel-async's SyncConnectionWrapper to provide an async interface
//! for SQLite. Connections are cheap to open, so one is created per call
//! rather than pooled.

use std::path::Path;

use diesel::sqlite::SqliteConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::AsyncConnection;

use super::util::to_diesel_error;

/// Diesel error type alias.
pub type DieselError = diesel::result::Error;

/// Async SQLite connection type.
pub type SqliteConn = SyncConnectionWrapper<SqliteConnection>;

/// Opens SQLite connections on demand.
#[derive(Clone, Debug)]
pub struct DbPool {
    database_url: String,
}

impl DbPool {
    /// Create a pool from a database URL or plain file path.
    pub fn new(database_url: &str) -> Self {
        // Strip sqlite: prefix if present for diesel
        let url = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
        Self {
            database_url: url.to_string(),
        }
    }

    /// Create pool from a file path.
    pub fn from_path(path: &Path) -> Self {
        Self::new(&path.display().to_string())
    }

    /// Get a connection.
    pub async fn get(&self) -> Result<SqliteConn, DieselError> {
        SqliteConn::establish(&self.database_url)
            .await
            .map_err(to_diesel_error)
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_sqlite_prefix() {
        assert_eq!(DbPool::new("sqlite:data/app.db").database_url(), "data/app.db");
        assert_eq!(DbPool::new("/tmp/app.db").database_url(), "/tmp/app.db");
    }

    #[tokio::test]
    async fn test_unreachable_path_is_an_error() {
        let pool = DbPool::new("/nonexistent-dir/deeper/app.db");
        assert!(pool.get().await.is_err());
    }
}

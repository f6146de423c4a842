//! Database context for managing the connection pool and repository access.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::downloaded_file::DownloadedFileRepository;
use super::pool::{DbPool, DieselError};

/// Entry point for database operations.
///
/// Create one context per command or service, then use it to access the
/// repositories.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::from_url("sqlite:portalgrab.db");
/// ctx.init_schema().await?;
/// let files = ctx.downloaded_files().get_all().await?;
/// ```
#[derive(Clone)]
pub struct DbContext {
    pool: DbPool,
}

impl DbContext {
    /// Create a context for the SQLite file at `db_path`.
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: DbPool::from_path(db_path),
        }
    }

    /// Create a context from a database URL (`sqlite:` prefix optional).
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: DbPool::new(database_url),
        }
    }

    /// Get a downloaded-file repository.
    pub fn downloaded_files(&self) -> DownloadedFileRepository {
        DownloadedFileRepository::new(self.pool.clone())
    }

    /// Create the tables if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute(
            r#"
            CREATE TABLE IF NOT EXISTS downloaded_files (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                file_url TEXT NOT NULL UNIQUE,
                local_path TEXT NOT NULL,
                downloaded_at TEXT NOT NULL
            );
            "#,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let dir = tempdir().unwrap();
        let ctx = DbContext::from_url(&format!("sqlite:{}", dir.path().join("a.db").display()));
        ctx.init_schema().await.unwrap();
        ctx.init_schema().await.unwrap();
        assert_eq!(ctx.downloaded_files().count().await.unwrap(), 0);
    }
}

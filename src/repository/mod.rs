//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM over SQLite with compile-time query
//! checking.

pub mod context;
pub mod downloaded_file;
pub mod models;
pub mod pool;
pub mod util;

pub use context::DbContext;
pub use downloaded_file::DownloadedFileRepository;
pub use pool::{DbPool, DieselError};

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("2024-03-01T12:00:00+02:00");
        assert_eq!(dt.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(parse_datetime("garbage"), DateTime::UNIX_EPOCH);
    }
}

//! Diesel-based repository for downloaded-file records.

use std::path::PathBuf;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{DownloadedFileRecord, NewDownloadedFile};
use super::parse_datetime;
use super::pool::{DbPool, DieselError};
use crate::models::DownloadedFile;
use crate::schema::downloaded_files;

/// Convert a database record to a domain model.
impl From<DownloadedFileRecord> for DownloadedFile {
    fn from(record: DownloadedFileRecord) -> Self {
        DownloadedFile {
            id: Some(record.id),
            source_url: record.file_url,
            local_path: PathBuf::from(record.local_path),
            downloaded_at: parse_datetime(&record.downloaded_at),
        }
    }
}

/// Persistence for completed downloads, keyed by their unique source link.
#[derive(Clone)]
pub struct DownloadedFileRepository {
    pool: DbPool,
}

impl DownloadedFileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Find the record downloaded from `source_url`, if any.
    pub async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<DownloadedFile>, DieselError> {
        let mut conn = self.pool.get().await?;

        downloaded_files::table
            .filter(downloaded_files::file_url.eq(source_url))
            .select(DownloadedFileRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(DownloadedFile::from))
    }

    /// Insert a new record and return it with its assigned id.
    ///
    /// A second record for the same source link is rejected by the UNIQUE
    /// constraint and surfaces as an error.
    pub async fn save(&self, file: &DownloadedFile) -> Result<DownloadedFile, DieselError> {
        let mut conn = self.pool.get().await?;

        let local_path = file.local_path.to_string_lossy();
        let downloaded_at = file.downloaded_at.to_rfc3339();
        diesel::insert_into(downloaded_files::table)
            .values(NewDownloadedFile {
                file_url: &file.source_url,
                local_path: &local_path,
                downloaded_at: &downloaded_at,
            })
            .execute(&mut conn)
            .await?;

        downloaded_files::table
            .filter(downloaded_files::file_url.eq(&file.source_url))
            .select(DownloadedFileRecord::as_select())
            .first(&mut conn)
            .await
            .map(DownloadedFile::from)
    }

    /// All records in insertion order.
    pub async fn get_all(&self) -> Result<Vec<DownloadedFile>, DieselError> {
        let mut conn = self.pool.get().await?;

        downloaded_files::table
            .order(downloaded_files::id.asc())
            .select(DownloadedFileRecord::as_select())
            .load(&mut conn)
            .await
            .map(|records| records.into_iter().map(DownloadedFile::from).collect())
    }

    /// Number of persisted records.
    pub async fn count(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = downloaded_files::table
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count as u64)
    }
}

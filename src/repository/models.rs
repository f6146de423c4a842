//! Diesel ORM models for database tables.

use diesel::prelude::*;

use crate::schema;

/// Downloaded-file record from the database.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = schema::downloaded_files)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DownloadedFileRecord {
    pub id: i32,
    pub file_url: String,
    pub local_path: String,
    pub downloaded_at: String,
}

/// New downloaded file for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::downloaded_files)]
pub struct NewDownloadedFile<'a> {
    pub file_url: &'a str,
    pub local_path: &'a str,
    pub downloaded_at: &'a str,
}

//! Persisted record of a completed download.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A binary that was fetched and written to local storage.
///
/// `source_url` is unique across all records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedFile {
    /// Database id, `None` until saved.
    #[serde(skip)]
    pub id: Option<i32>,
    #[serde(rename = "fileUrl")]
    pub source_url: String,
    pub local_path: PathBuf,
    pub downloaded_at: DateTime<Utc>,
}

impl DownloadedFile {
    /// Create a new, unsaved record stamped with the current time.
    pub fn new(source_url: String, local_path: PathBuf) -> Self {
        Self {
            id: None,
            source_url,
            local_path,
            downloaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_portal_field_names() {
        let record = DownloadedFile::new(
            "https://portal.example/download/42".to_string(),
            PathBuf::from("/tmp/downloads/report"),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fileUrl"], "https://portal.example/download/42");
        assert_eq!(json["localPath"], "/tmp/downloads/report");
        assert!(json["downloadedAt"].is_string());
        assert!(json.get("id").is_none());
    }
}

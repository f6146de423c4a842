//! Storage helpers for downloaded content on disk.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::extract::NO_NAME;

/// Longest file name written to disk, in characters.
const MAX_FILENAME_CHARS: usize = 100;

/// Replace characters that are unsafe in file names.
///
/// Derived names such as `Finance - March Report - 2024-03-01 - 7` pass through
/// unchanged.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = sanitized.trim().trim_matches('_');
    if trimmed.is_empty() {
        NO_NAME.to_string()
    } else {
        trimmed.chars().take(MAX_FILENAME_CHARS).collect()
    }
}

/// Write `content` to `dir/file_name`, creating `dir` when missing.
///
/// An existing file with the same name is overwritten. Returns the absolute
/// path written.
pub async fn save_download(dir: &Path, file_name: &str, content: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = tokio::fs::canonicalize(dir)
        .await?
        .join(sanitize_filename(file_name));

    let mut file = tokio::fs::File::create(&path).await?;
    file.write_all(content).await?;
    file.flush().await?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_keeps_derived_names() {
        assert_eq!(
            sanitize_filename("Finance - March Report - 2024-03-01 - 7"),
            "Finance - March Report - 2024-03-01 - 7"
        );
        assert_eq!(sanitize_filename(NO_NAME), NO_NAME);
    }

    #[test]
    fn test_sanitize_replaces_unsafe_chars() {
        assert_eq!(sanitize_filename("a/b:c"), "a_b_c");
        assert_eq!(sanitize_filename("__"), NO_NAME);
        assert_eq!(sanitize_filename(&"é".repeat(150)).chars().count(), 100);
    }

    #[tokio::test]
    async fn test_save_download_creates_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("downloads");

        let path = save_download(&target, "Legal - Contract -  - 0", b"%PDF-1.7")
            .await
            .unwrap();

        assert!(path.is_absolute());
        assert_eq!(path.file_name().unwrap(), "Legal - Contract -  - 0");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_save_download_overwrites() {
        let dir = tempdir().unwrap();
        save_download(dir.path(), "same", b"first").await.unwrap();
        let path = save_download(dir.path(), "same", b"second").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }
}

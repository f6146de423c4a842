//! Data models for portalgrab.

mod candidate;
mod downloaded_file;

pub use candidate::{DownloadResolution, FileCandidate};
pub use downloaded_file::DownloadedFile;

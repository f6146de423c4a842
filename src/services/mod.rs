//! Service layer for portalgrab business logic.
//!
//! Services are shared by the CLI and the web server.

pub mod auth;
pub mod file_download;

pub use auth::PortalAuthService;
pub use file_download::{FetchError, FetchOutcome, FileDownloadService};

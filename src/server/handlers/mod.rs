//! HTTP request handlers for the web server.

mod api;

pub use api::{download_files, downloaded_files, health};

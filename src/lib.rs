//! portalgrab - authenticated portal scraper.
//!
//! Logs in to a web portal, mines the JSON embedded in its pages for
//! downloadable files, downloads the first one it has not stored yet and keeps
//! a history of every download.

pub mod cli;
pub mod config;
pub mod extract;
pub mod http_client;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod services;
pub mod storage;

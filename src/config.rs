//! Configuration management for portalgrab using the prefer crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::FieldMap;
use crate::http_client::HttpClient;
use crate::repository::DbContext;

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "portalgrab.db";

/// Default downloads subdirectory name.
const DOWNLOADS_SUBDIR: &str = "downloads";

/// Errors raised while reading an explicit configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// Portal endpoints and credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Form-login endpoint.
    #[serde(default)]
    pub login_url: String,
    /// Page URL prefix; a page name is appended verbatim.
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

/// Download storage options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Target directory for fetched binaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    pub database_url: Option<String>,
    /// Directory for storing downloaded files.
    pub download_dir: PathBuf,
    /// User agent for HTTP requests (None = portalgrab default).
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Delay between requests in milliseconds.
    pub request_delay_ms: u64,
    /// Server bind address from config.
    pub bind: Option<String>,
    pub portal: PortalConfig,
    pub fields: FieldMap,
}

impl Default for Settings {
    fn default() -> Self {
        // Falls back gracefully: data dir -> Home dir -> Current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("portalgrab");

        Self {
            download_dir: data_dir.join(DOWNLOADS_SUBDIR),
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            user_agent: None,
            request_timeout: 30,
            request_delay_ms: 0,
            bind: None,
            portal: PortalConfig::default(),
            fields: FieldMap::default(),
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            download_dir: data_dir.join(DOWNLOADS_SUBDIR),
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            format!("sqlite:{}", self.database_path().display())
        }
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure all directories exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.download_dir)?;
        Ok(())
    }

    /// Create a database context for these settings.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url())
    }

    /// Build the HTTP client described by these settings.
    pub fn http_client(&self) -> Result<HttpClient, reqwest::Error> {
        HttpClient::with_user_agent(
            Duration::from_secs(self.request_timeout),
            Duration::from_millis(self.request_delay_ms),
            self.user_agent.as_deref(),
        )
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Database filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Delay between requests in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<u64>,
    /// Server bind address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default)]
    pub portal: PortalConfig,
    /// JSON field names used when walking portal pages.
    #[serde(default)]
    pub fields: FieldMap,
    #[serde(default)]
    pub download: DownloadConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers portalgrab config files in standard locations.
    pub async fn load() -> Self {
        let path = match prefer::load("portalgrab").await {
            Ok(pref_config) => pref_config.source_path().map(|p| p.to_path_buf()),
            Err(_) => None,
        };

        let Some(path) = path else {
            tracing::debug!("No config file found, using defaults");
            return Self::default();
        };

        match Self::load_from_path(&path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_error("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => serde_json::from_str(contents).map_err(|e| parse_error("JSON", e.to_string())),
        }
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
            settings.download_dir = settings.data_dir.join(DOWNLOADS_SUBDIR);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref dir) = self.download.dir {
            settings.download_dir = self.resolve_path(dir, base_dir);
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(delay) = self.request_delay_ms {
            settings.request_delay_ms = delay;
        }
        if let Some(ref bind) = self.bind {
            settings.bind = Some(bind.clone());
        }
        settings.portal = self.portal.clone();
        settings.fields = self.fields.clone();
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load settings with explicit options.
///
/// An explicit config path must exist and parse; a discovered file that fails
/// to load falls back to defaults. Environment overrides apply last.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings, &base_dir);
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    Ok((settings, config))
}

/// Apply environment variable overrides, which take highest precedence.
/// Empty values are ignored.
fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let var = |key: &str| lookup(key).filter(|s| !s.is_empty());

    if let Some(database_url) = var("DATABASE_URL") {
        tracing::debug!("Using DATABASE_URL from environment: {}", database_url);
        settings.database_url = Some(database_url);
    }
    if let Some(username) = var("PORTAL_USERNAME") {
        settings.portal.username = username;
    }
    if let Some(password) = var("PORTAL_PASSWORD") {
        settings.portal.password = password;
    }
    if let Some(dir) = var("DOWNLOAD_DIR") {
        tracing::debug!("Using DOWNLOAD_DIR from environment: {}", dir);
        settings.download_dir = PathBuf::from(shellexpand::tilde(&dir).as_ref());
    }
}

//! Portal fetch-and-download flow.
//!
//! One run logs in, fetches a page, picks the first file candidate from its
//! embedded JSON, follows it to a detail page, resolves the binary link and
//! stores the binary once. Every failure is logged and reported through
//! [`FetchOutcome`]; nothing is raised to the caller.

use std::fmt;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use super::auth::PortalAuthService;
use crate::config::Settings;
use crate::extract::{
    collect_candidates, derive_file_name, extract_json_tree, resolve_download, FieldMap,
};
use crate::http_client::HttpClient;
use crate::models::{DownloadedFile, FileCandidate};
use crate::repository::{DbContext, DieselError, DownloadedFileRepository};
use crate::storage;

/// Failure of a single network, disk or database step.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("invalid link {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] DieselError),
}

/// How a fetch-and-download run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Login produced no session.
    NotAuthenticated,
    /// The resource page or the candidate's detail page could not be fetched.
    PageUnavailable,
    /// The resource page held no retained file candidate.
    NoCandidates,
    /// The detail page held no download identifier.
    NoResolution,
    /// A record for this download link already exists.
    AlreadyDownloaded(String),
    /// The binary could not be fetched, written or recorded.
    DownloadFailed,
    /// The binary was written and recorded.
    Downloaded(DownloadedFile),
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::NotAuthenticated => write!(f, "login failed"),
            FetchOutcome::PageUnavailable => write!(f, "portal page unavailable"),
            FetchOutcome::NoCandidates => write!(f, "no downloadable files found"),
            FetchOutcome::NoResolution => write!(f, "no download link found on the detail page"),
            FetchOutcome::AlreadyDownloaded(url) => write!(f, "already downloaded: {}", url),
            FetchOutcome::DownloadFailed => write!(f, "download failed"),
            FetchOutcome::Downloaded(file) => write!(
                f,
                "downloaded {} to {}",
                file.source_url,
                file.local_path.display()
            ),
        }
    }
}

/// Orchestrates one portal scrape and download.
#[derive(Clone)]
pub struct FileDownloadService {
    client: HttpClient,
    auth: PortalAuthService,
    files: DownloadedFileRepository,
    resource_url: String,
    fields: FieldMap,
    download_dir: PathBuf,
}

impl FileDownloadService {
    pub fn new(
        client: HttpClient,
        auth: PortalAuthService,
        files: DownloadedFileRepository,
        resource_url: String,
        fields: FieldMap,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            auth,
            files,
            resource_url,
            fields,
            download_dir,
        }
    }

    /// Wire the service from loaded settings.
    pub fn from_settings(settings: &Settings, ctx: &DbContext) -> Result<Self, reqwest::Error> {
        let client = settings.http_client()?;
        let auth = PortalAuthService::new(client.clone(), &settings.portal);
        Ok(Self::new(
            client,
            auth,
            ctx.downloaded_files(),
            settings.portal.resource_url.clone(),
            settings.fields.clone(),
            settings.download_dir.clone(),
        ))
    }

    /// Run the whole flow for `page_name` (appended to the resource URL when
    /// not blank).
    pub async fn fetch_and_download(&self, page_name: Option<&str>) -> FetchOutcome {
        let Some(session) = self.auth.login().await else {
            tracing::error!("Failed to log in to the portal.");
            return FetchOutcome::NotAuthenticated;
        };

        let page_url = page_url(&self.resource_url, page_name);
        let html = match self.fetch_text(&page_url, &session).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error fetching the portal page: {}", e);
                return FetchOutcome::PageUnavailable;
            }
        };

        let candidates = collect_candidates(extract_json_tree(&html).as_ref(), &self.fields);
        let Some(candidate) = candidates.into_iter().next() else {
            tracing::info!("No downloadable files found on {}", page_url);
            return FetchOutcome::NoCandidates;
        };

        let detail_html = match self.fetch_detail(&page_url, &candidate, &session).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error fetching the detail page: {}", e);
                return FetchOutcome::PageUnavailable;
            }
        };

        let Some(resolution) =
            resolve_download(extract_json_tree(&detail_html).as_ref(), &self.fields)
        else {
            tracing::info!("No download identifier found for {}", candidate.url);
            return FetchOutcome::NoResolution;
        };

        let link = self.fields.download_url(&resolution.identifier);
        match self.files.find_by_source_url(&link).await {
            Ok(Some(_)) => {
                tracing::info!("File already downloaded: {}", link);
                return FetchOutcome::AlreadyDownloaded(link);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to check download history for {}: {}", link, e);
                return FetchOutcome::DownloadFailed;
            }
        }

        match self.download(&link, &session, &candidate).await {
            Ok(file) => {
                tracing::info!("Downloaded and saved file: {}", file.local_path.display());
                FetchOutcome::Downloaded(file)
            }
            Err(e) => {
                tracing::error!("Error downloading file: {} => {}", link, e);
                FetchOutcome::DownloadFailed
            }
        }
    }

    async fn fetch_detail(
        &self,
        page_url: &str,
        candidate: &FileCandidate,
        session: &str,
    ) -> Result<String, FetchError> {
        let detail_url = resolve_link(page_url, &candidate.url)?;
        self.fetch_text(detail_url.as_str(), session).await
    }

    async fn fetch_text(&self, url: &str, session: &str) -> Result<String, FetchError> {
        let response = self.get(url, session).await?;
        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn get(
        &self,
        url: &str,
        session: &str,
    ) -> Result<crate::http_client::HttpResponse, FetchError> {
        let response = self
            .client
            .get(url, Some(session))
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response)
    }

    async fn download(
        &self,
        link: &str,
        session: &str,
        candidate: &FileCandidate,
    ) -> Result<DownloadedFile, FetchError> {
        let response = self.get(link, session).await?;
        let content = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: link.to_string(),
                source,
            })?;

        let file_name = derive_file_name(candidate, &self.fields.extension_filter);
        let path = storage::save_download(&self.download_dir, &file_name, &content).await?;

        let file = self
            .files
            .save(&DownloadedFile::new(link.to_string(), path))
            .await?;
        Ok(file)
    }
}

/// Resource URL with the page name appended verbatim when it is not blank.
fn page_url(resource_url: &str, page_name: Option<&str>) -> String {
    match page_name {
        Some(name) if !name.trim().is_empty() => format!("{}{}", resource_url, name),
        _ => resource_url.to_string(),
    }
}

/// Absolute form of `link`, joined onto `base` when it has no scheme.
fn resolve_link(base: &str, link: &str) -> Result<Url, FetchError> {
    let invalid = |source| FetchError::InvalidUrl {
        url: link.to_string(),
        source,
    };
    match Url::parse(link) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|base| base.join(link))
            .map_err(invalid),
        Err(e) => Err(invalid(e)),
    }
}

//! API endpoint handlers.

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;

use super::super::AppState;

/// Acknowledgement returned by the download trigger, whatever the outcome.
const DOWNLOAD_ACK: &str = "Download process initiated";

/// Optional body of the download trigger.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_name: Option<String>,
}

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Start one fetch-and-download pass for the requested page and acknowledge
/// immediately.
///
/// The run is detached from the request, so a client that disconnects does
/// not cancel it. Runs queue on the state's run lock. A missing or unparseable
/// body means no page name. Failures are only visible in the logs and the
/// download history.
pub async fn download_files(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let request: PageRequest = serde_json::from_slice(&body).unwrap_or_default();

    let downloader = state.downloader.clone();
    let run_lock = state.run_lock.clone();
    tokio::spawn(async move {
        let _guard = run_lock.lock().await;
        let outcome = downloader
            .fetch_and_download(request.page_name.as_deref())
            .await;
        tracing::info!("Download run finished: {}", outcome);
    });

    (StatusCode::OK, DOWNLOAD_ACK)
}

/// List every downloaded file record.
pub async fn downloaded_files(State(state): State<AppState>) -> impl IntoResponse {
    match state.files.get_all().await {
        Ok(files) => Json(files).into_response(),
        Err(e) => {
            tracing::error!("Failed to load downloaded files: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load downloaded files: {}", e),
            )
                .into_response()
        }
    }
}

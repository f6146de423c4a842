//! Web server exposing the download trigger and the download history.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Settings;
use crate::repository::{DbContext, DownloadedFileRepository};
use crate::services::FileDownloadService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub files: DownloadedFileRepository,
    pub downloader: Arc<FileDownloadService>,
    /// Held for the duration of a run so triggers never overlap.
    pub run_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(files: DownloadedFileRepository, downloader: FileDownloadService) -> Self {
        Self {
            files,
            downloader: Arc::new(downloader),
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_settings(settings: &Settings, ctx: &DbContext) -> anyhow::Result<Self> {
        let downloader = FileDownloadService::from_settings(settings, ctx)?;
        Ok(Self::new(ctx.downloaded_files(), downloader))
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    let state = AppState::from_settings(settings, &ctx)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use tempfile::tempdir;
    use tokio::sync::Notify;
    use tower::ServiceExt;

    use crate::config::PortalConfig;
    use crate::extract::FieldMap;
    use crate::http_client::HttpClient;
    use crate::models::DownloadedFile;
    use crate::services::PortalAuthService;

    async fn setup_test_app() -> (axum::Router, DbContext, tempfile::TempDir) {
        // Nothing listens on the discard port, so every run stops at login
        setup_test_app_with_portal("http://127.0.0.1:9").await
    }

    async fn setup_test_app_with_portal(
        portal_base: &str,
    ) -> (axum::Router, DbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();

        let portal = PortalConfig {
            login_url: format!("{}/login", portal_base),
            resource_url: format!("{}/pages/", portal_base),
            ..Default::default()
        };
        let client = HttpClient::new(Duration::from_secs(2), Duration::ZERO).unwrap();
        let downloader = FileDownloadService::new(
            client.clone(),
            PortalAuthService::new(client, &portal),
            ctx.downloaded_files(),
            portal.resource_url.clone(),
            FieldMap::default(),
            dir.path().join("downloads"),
        );

        let app = create_router(AppState::new(ctx.downloaded_files(), downloader));
        (app, ctx, dir)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_download_files_acknowledges_with_page_name() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/download-files")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"pageName":"reports"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Download process initiated");
    }

    #[tokio::test]
    async fn test_download_files_acknowledges_without_body() {
        let (app, _ctx, _dir) = setup_test_app().await;

        for body in ["", "not json", "{}", r#"{"pageName":null}"#] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/download-files")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "body {:?}", body);
            assert_eq!(body_string(response).await, "Download process initiated");
        }
    }

    #[tokio::test]
    async fn test_download_files_acknowledges_before_run_finishes() {
        let login_reached = Arc::new(Notify::new());
        let notify = login_reached.clone();
        let portal = Router::new().route(
            "/login",
            post(move || {
                let notify = notify.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(400)).await;
                    notify.notify_one();
                    StatusCode::UNAUTHORIZED
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, portal).await.unwrap();
        });

        let (app, _ctx, _dir) = setup_test_app_with_portal(&format!("http://{}", addr)).await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/download-files")
            .body(Body::from(r#"{"pageName":"reports"}"#))
            .unwrap();

        // The response must not wait for the slow login
        let response = tokio::time::timeout(Duration::from_millis(150), app.oneshot(request))
            .await
            .expect("acknowledged while the run was still logging in")
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        drop(response);

        // The run outlives the request that started it
        tokio::time::timeout(Duration::from_secs(5), login_reached.notified())
            .await
            .expect("run continued after the response was dropped");
    }

    #[tokio::test]
    async fn test_downloaded_files_empty() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/downloaded-files")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_downloaded_files_lists_records() {
        let (app, ctx, _dir) = setup_test_app().await;
        ctx.downloaded_files()
            .save(&DownloadedFile::new(
                "https://portal.example/d/42".to_string(),
                PathBuf::from("/srv/downloads/Finance - Q1 - 2024-03-01 - 7"),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/downloaded-files")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        let files = json.as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["fileUrl"], "https://portal.example/d/42");
        assert_eq!(
            files[0]["localPath"],
            "/srv/downloads/Finance - Q1 - 2024-03-01 - 7"
        );
        assert!(files[0]["downloadedAt"].is_string());
    }
}

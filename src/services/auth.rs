//! Portal form login.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::PortalConfig;
use crate::http_client::HttpClient;

#[derive(Debug, Error)]
enum LoginError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("login answered HTTP {0}")]
    Status(StatusCode),

    #[error("no session cookie returned")]
    NoSession,
}

/// Logs in to the portal and yields a `Cookie` header value for the session.
#[derive(Clone)]
pub struct PortalAuthService {
    client: HttpClient,
    login_url: String,
    username: String,
    password: String,
}

impl PortalAuthService {
    pub fn new(client: HttpClient, portal: &PortalConfig) -> Self {
        Self {
            client,
            login_url: portal.login_url.clone(),
            username: portal.username.clone(),
            password: portal.password.clone(),
        }
    }

    /// POST the configured credentials and return the session cookies.
    ///
    /// Every `Set-Cookie` header's `name=value` pair is joined with `"; "`.
    /// Failures are logged and yield `None`.
    pub async fn login(&self) -> Option<String> {
        match self.try_login().await {
            Ok(cookie) => Some(cookie),
            Err(e) => {
                tracing::error!("Login to {} failed: {}", self.login_url, e);
                None
            }
        }
    }

    async fn try_login(&self) -> Result<String, LoginError> {
        let form = [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];
        let response = self.client.post_form(&self.login_url, &form).await?;

        if response.status.is_client_error() || response.status.is_server_error() {
            return Err(LoginError::Status(response.status));
        }

        let pairs = response.cookie_pairs();
        if pairs.is_empty() {
            return Err(LoginError::NoSession);
        }
        tracing::debug!("Portal login returned {} cookies", pairs.len());
        Ok(pairs.join("; "))
    }
}

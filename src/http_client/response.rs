//! HTTP response wrapper.

use reqwest::header::SET_COOKIE;
use reqwest::{Response, StatusCode};

/// HTTP response wrapper.
///
/// Every `Set-Cookie` value is kept in arrival order; the body is read on
/// demand.
pub struct HttpResponse {
    pub status: StatusCode,
    pub set_cookies: Vec<String>,
    pub(crate) response: Response,
}

impl From<Response> for HttpResponse {
    fn from(response: Response) -> Self {
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();

        Self {
            status: response.status(),
            set_cookies,
            response,
        }
    }
}

impl HttpResponse {
    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `name=value` pairs of every `Set-Cookie` header, attributes dropped.
    pub fn cookie_pairs(&self) -> Vec<&str> {
        self.set_cookies
            .iter()
            .filter_map(|c| c.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect()
    }

    /// Get response body as bytes.
    pub async fn bytes(self) -> Result<Vec<u8>, reqwest::Error> {
        self.response.bytes().await.map(|b| b.to_vec())
    }

    /// Get response body as text.
    pub async fn text(self) -> Result<String, reqwest::Error> {
        self.response.text().await
    }
}

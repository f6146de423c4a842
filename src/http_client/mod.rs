//! HTTP client carrying a portal session cookie between requests.

mod response;
mod user_agent;

pub use response::HttpResponse;
pub use user_agent::resolve_user_agent;

use std::time::{Duration, Instant};

use reqwest::header::COOKIE;
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder};

/// HTTP client with request logging and a politeness delay.
///
/// Two reqwest clients share the same settings. The second never follows
/// redirects so that a login redirect's `Set-Cookie` headers stay visible.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    no_redirect: Client,
    request_delay: Duration,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(timeout: Duration, request_delay: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(timeout, request_delay, None)
    }

    /// Create a new HTTP client with custom user agent configuration.
    /// - None: Use default portalgrab user agent
    /// - Some("impersonate"): Use a real browser user agent
    /// - Some(custom): Use custom user agent string
    pub fn with_user_agent(
        timeout: Duration,
        request_delay: Duration,
        user_agent_config: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let user_agent = resolve_user_agent(user_agent_config);
        let builder = || {
            Client::builder()
                .user_agent(&user_agent)
                .timeout(timeout)
                .gzip(true)
                .brotli(true)
        };

        Ok(Self {
            client: builder().build()?,
            no_redirect: builder().redirect(Policy::none()).build()?,
            request_delay,
        })
    }

    /// GET `url`, sending `cookie` as the `Cookie` header when present.
    pub async fn get(&self, url: &str, cookie: Option<&str>) -> Result<HttpResponse, reqwest::Error> {
        let mut request = self.client.get(url);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        self.send("GET", url, request).await
    }

    /// POST a URL-encoded form without following redirects.
    pub async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpResponse, reqwest::Error> {
        let request = self.no_redirect.post(url).form(fields);
        self.send("POST", url, request).await
    }

    async fn send(
        &self,
        method: &str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<HttpResponse, reqwest::Error> {
        let start = Instant::now();
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("{} {} failed after {:?}: {}", method, url, start.elapsed(), e);
                return Err(e);
            }
        };
        tracing::debug!(
            "{} {} -> {} in {:?}",
            method,
            url,
            response.status(),
            start.elapsed()
        );

        // Apply base delay between requests
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        Ok(HttpResponse::from(response))
    }
}

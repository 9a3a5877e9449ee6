//! Design document fetched from the design tool's REST API.
//!
//! Exactly one blocking `GET /files/{key}` per run. Rate limiting (HTTP 429)
//! is reported, not retried.

use std::fmt;

use reqwest::blocking::Client;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;

use crate::{LoadError, SourceProvider};

/// Header carrying the personal access token.
const TOKEN_HEADER: &str = "X-Figma-Token";

/// Fetches a design file by key with a personal access token.
#[derive(Clone)]
pub struct RemoteSource {
    token: String,
    file_key: String,
    base_url: String,
    client: Option<Client>,
}

impl RemoteSource {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.figma.com/v1";

    pub fn new(token: impl Into<String>, file_key: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            file_key: file_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            client: None,
        }
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Point at a different API root (no trailing slash needed).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn url(&self) -> String {
        format!("{}/files/{}", self.base_url, self.file_key)
    }
}

// The token never appears in logs.
impl fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSource")
            .field("token", &"<redacted>")
            .field("file_key", &self.file_key)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SourceProvider for RemoteSource {
    fn describe(&self) -> String {
        format!("remote file {}", self.file_key)
    }

    fn fetch(&self) -> Result<String, LoadError> {
        let url = self.url();
        let unavailable = |reason: String| LoadError::unavailable(self.describe(), reason);

        let client = match &self.client {
            Some(client) => client.clone(),
            None => Client::builder()
                .user_agent(concat!("fhtml/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| unavailable(format!("cannot build HTTP client: {e}")))?,
        };

        tracing::debug!(%url, "requesting design file");
        let response = client
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .map_err(|e| unavailable(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            tracing::warn!(retry_after = ?retry_after, "rate limited by design API");
            // Retry-After is either delay-seconds or an HTTP-date.
            let reason = match retry_after {
                Some(secs) if secs.trim().parse::<u64>().is_ok() => {
                    format!("rate limited (HTTP 429), retry after {}s", secs.trim())
                }
                Some(date) => format!("rate limited (HTTP 429), retry after {date}"),
                None => "rate limited (HTTP 429)".to_string(),
            };
            return Err(unavailable(reason));
        }

        if !status.is_success() {
            return Err(unavailable(format!("HTTP {status} from {url}")));
        }

        response
            .text()
            .map_err(|e| unavailable(format!("reading response body failed: {e}")))
    }
}

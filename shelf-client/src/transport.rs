//! The seam between endpoint methods and the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::error::{ClientError, Result};

/// Default request timeout of [`HttpTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A request relative to the server's base URL.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Path (and query) relative to the base URL, without a leading slash.
    pub path: String,
    pub bearer: Option<Zeroizing<String>>,
    pub body: Option<JsonValue>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(Zeroizing::new(token.to_owned()));
        self
    }

    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response carrying `body` serialised as JSON.
    pub fn json(status: u16, body: &JsonValue) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the server.
///
/// Implementations only move bytes; status handling and decoding live in
/// [`ApiClient`](crate::ApiClient).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`Transport`] over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.base_url.join(&request.path).map_err(|err| {
            ClientError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, request.path),
                reason: err.to_string(),
            }
        })?;

        debug!(method = %request.method, %url, "sending request");

        let mut builder = self.client.request(request.method, url);
        if let Some(token) = request.bearer.as_ref() {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(HttpResponse::new(status.as_u16(), body.to_vec()))
    }
}

/// Normalise a user supplied server address.
///
/// A missing scheme becomes `http://` and the result always ends with
/// exactly one `/`, so relative endpoint paths resolve below it.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: "empty address".to_owned(),
        });
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        format!("{trimmed}/")
    } else {
        format!("http://{trimmed}/")
    };
    if with_scheme.trim_end_matches('/') != raw.trim().trim_end_matches('/') {
        debug!(from = raw, to = %with_scheme, "normalized base URL");
    }

    Url::parse(&with_scheme).map_err(|err| ClientError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: err.to_string(),
    })
}

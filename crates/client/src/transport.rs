//! HTTP transport.
//!
//! The transport executes one translated [`WireRequest`] and hands back raw
//! bytes plus a status code; decoding belongs to the normalizer. It is the
//! only part of the crate that performs I/O.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use satgate_config::{Config, Surface};
use tracing::debug;

use crate::error::ApiError;
use crate::request::{Method, WireRequest};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw result of one HTTP call.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as (lossy) UTF-8 for display and error messages.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes wire requests against a configured target.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the call. Connection and timeout failures map to
    /// [`ApiError::Transport`]; HTTP error statuses are returned as data,
    /// not errors — status interpretation is per operation.
    async fn execute(&self, request: &WireRequest) -> Result<RawResponse, ApiError>;

    /// The configured target URL, for error context.
    fn target(&self) -> &str;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    auth_header: (&'static str, String),
    tenant: Option<String>,
}

impl HttpTransport {
    /// Build a transport from resolved configuration.
    ///
    /// # Errors
    /// Returns an error when required configuration is missing for the
    /// selected surface, or the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|source| ApiError::Transport {
                target: config.gateway.clone(),
                source,
            })?;

        let tenant = (config.surface == Surface::Cloud && !config.tenant.is_empty())
            .then(|| config.tenant.clone());

        Ok(Self {
            client,
            base_url: config.gateway.trim_end_matches('/').to_string(),
            auth_header: config.auth_header(),
            tenant,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &WireRequest) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, url = %url, "API request");

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let (auth_key, auth_value) = &self.auth_header;
        let mut builder = self
            .client
            .request(method, &url)
            .header(*auth_key, auth_value);

        if let Some(tenant) = &self.tenant {
            builder = builder.header("X-SatGate-Tenant", tenant);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| ApiError::Transport {
            target: self.base_url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                target: self.base_url.clone(),
                source,
            })?
            .to_vec();

        debug!(status, bytes = body.len(), "API response");
        Ok(RawResponse { status, body })
    }

    fn target(&self) -> &str {
        &self.base_url
    }
}

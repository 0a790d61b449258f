//! HTTP transport for API requests.
//!
//! [`ApiClient`](crate::api::ApiClient) talks to the server through the
//! [`Transport`] trait so the same client code runs over reqwest
//! ([`HttpClient`]) or over canned replies ([`ScriptedTransport`]).

mod scripted;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::{ClientError, Result};

pub use scripted::{RecordedRequest, ScriptedReply, ScriptedTransport};

/// Something that can POST a JSON body and hand back the response text.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and return the response body.
    async fn post(&self, url: &str, body: &str) -> Result<String>;
}

/// HTTP client for making requests to the file server.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a new HTTP client with a proxy.
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| ClientError::Connection(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| ClientError::Connection(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Build a client from configuration (proxy and timeout).
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = match config.proxy.as_deref() {
            Some(proxy) => Self::with_proxy(proxy)?,
            None => Self::new(),
        };
        Ok(http.with_timeout(config.request_timeout()))
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn post(&self, url: &str, body: &str) -> Result<String> {
        let send = async {
            let response = self
                .client
                .post(url)
                .header("Content-Type", "application/json")
                .body(body.to_string())
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(ClientError::HttpError(response.status().as_u16()));
            }

            Ok(response.text().await?)
        };

        tokio::time::timeout(self.timeout, send)
            .await
            .map_err(|_| ClientError::Timeout)?
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

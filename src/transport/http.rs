//! reqwest-backed [`Transport`] talking to the execution service.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::transport::{Transport, TransportError};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// HTTP transport rooted at a fixed service base URL.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build configured HTTP client ({e}), falling back to defaults");
            reqwest::Client::new()
        });

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Shared tail of every call: status check, then JSON decode.
    async fn decode(response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        debug!("Service response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Service error: {} - {}", status.as_u16(), body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("Service returned non-JSON body ({} bytes): {}", text.len(), e);
            TransportError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        info!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        let url = self.url(path);
        info!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport = HttpTransport::new("http://localhost:5000/", None);
        assert_eq!(transport.base_url(), "http://localhost:5000");
        assert_eq!(transport.url("/execute"), "http://localhost:5000/execute");
        assert_eq!(transport.url("execute"), "http://localhost:5000/execute");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 9 (discard) is essentially never listening on loopback.
        let transport = HttpTransport::new("http://127.0.0.1:9", Some(Duration::from_secs(2)));
        let result = transport.get("/").await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}

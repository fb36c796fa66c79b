use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

/// Errors that can occur while talking to the execution service.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Request never produced a response (timeout, DNS, connection refused).
    Network(String),
    /// Service answered outside the 2xx range.
    Status { status: u16, body: String },
    /// Body was not JSON, or not the JSON shape the caller expected.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Status { status, body } => {
                write!(f, "HTTP error! status: {status} ({body})")
            }
            TransportError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// A request/response channel to the execution service.
///
/// Paths are relative to whatever base the implementation was built with.
/// Successful calls hand back the decoded body as an opaque JSON value; the
/// caller interprets its shape.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// POST `body` as JSON to `path`.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// GET `path`, expecting a JSON body back.
    async fn get(&self, path: &str) -> Result<Value, TransportError>;
}

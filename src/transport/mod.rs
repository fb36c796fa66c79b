//! # Transport
//!
//! JSON-over-HTTP request/response plumbing between the controller and the
//! remote execution service. Owns no document state.

pub mod client;
pub mod http;
pub mod types;

pub use client::{Transport, TransportError};
pub use http::HttpTransport;
pub use types::{ExecuteRequest, ExecuteResponse, HealthResponse};

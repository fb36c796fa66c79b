//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::core::controller::Controller;
use crate::core::export::{ExportFile, Exporter};
use crate::transport::{Transport, TransportError};

/// A transport that replays scripted responses in order and records calls.
/// Once the script runs out every call fails with a network error.
#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<Result<Value, TransportError>>>,
    posted: Mutex<Vec<(String, Value)>>,
    fetched: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    pub fn respond(self, response: Result<Value, TransportError>) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn posted(&self) -> Vec<(String, Value)> {
        self.posted.lock().unwrap().clone()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    fn next(&self) -> Result<Value, TransportError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

#[async_trait]
impl Transport for FakeTransport {
    fn name(&self) -> &str {
        "fake"
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.posted.lock().unwrap().push((path.to_string(), body.clone()));
        self.next()
    }

    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.fetched.lock().unwrap().push(path.to_string());
        self.next()
    }
}

/// An exporter that keeps every file in memory instead of touching disk.
#[derive(Default)]
pub struct RecordingExporter {
    exported: Mutex<Vec<ExportFile>>,
    fail: bool,
}

impl RecordingExporter {
    pub fn failing() -> Self {
        Self {
            exported: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn exported(&self) -> Vec<ExportFile> {
        self.exported.lock().unwrap().clone()
    }
}

impl Exporter for RecordingExporter {
    fn export(&self, file: &ExportFile) -> io::Result<PathBuf> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.exported.lock().unwrap().push(file.clone());
        Ok(PathBuf::from(&file.file_name))
    }
}

/// Creates a test Controller with a FakeTransport and a RecordingExporter.
pub fn test_controller() -> Controller {
    Controller::new(Arc::new(FakeTransport::new()), Arc::new(RecordingExporter::default()))
}

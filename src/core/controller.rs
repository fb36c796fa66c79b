//! # Document/Request Controller
//!
//! Owns the one [`Document`] and the one [`ExecutionResult`] of a session,
//! and moves content between local files, the editor and the execution
//! service.
//!
//! ```text
//! Controller
//! ├── document: Document              // authoritative name + content
//! ├── result: ExecutionResult         // last execution outcome
//! ├── status_message: String          // status bar text
//! ├── transport: Arc<dyn Transport>   // execution service
//! ├── exporter: Arc<dyn Exporter>     // local file export
//! ├── discard_stale_responses: bool   // request-id hardening switch
//! ├── next_request_id / latest_request_id
//! └── in_flight: usize                // executions not yet completed
//! ```
//!
//! Execution is split in three so the event loop never holds the controller
//! across an await: [`Controller::begin_execution`] hands out a ticket,
//! [`run_execution`] does the network call on any task, and
//! [`Controller::complete_execution`] applies the outcome. Overlapping
//! executions are neither cancelled nor queued, so by default whichever
//! response is applied last wins.

use std::sync::Arc;

use chrono::Local;
use log::{debug, info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::document::{Document, FormatError, check_extension};
use crate::core::execution::{
    EXECUTE_PATH, EXECUTION_FAILURE_MESSAGE, ExecuteTicket, ExecutionResult, PROBE_PATH,
};
use crate::core::export::{ExportFile, Exporter};
use crate::transport::{
    ExecuteRequest, ExecuteResponse, HealthResponse, Transport, TransportError,
};

pub struct Controller {
    document: Document,
    result: ExecutionResult,
    pub status_message: String,
    transport: Arc<dyn Transport>,
    exporter: Arc<dyn Exporter>,
    discard_stale_responses: bool,
    next_request_id: u64,
    latest_request_id: Option<u64>,
    in_flight: usize,
}

impl Controller {
    pub fn new(transport: Arc<dyn Transport>, exporter: Arc<dyn Exporter>) -> Self {
        Self {
            document: Document::new(),
            result: ExecutionResult::NotRun,
            status_message: String::from("Ctrl+O open | Ctrl+S save | Ctrl+R run"),
            transport,
            exporter,
            discard_stale_responses: false,
            next_request_id: 1,
            latest_request_id: None,
            in_flight: 0,
        }
    }

    pub fn from_config(
        transport: Arc<dyn Transport>,
        exporter: Arc<dyn Exporter>,
        config: &ResolvedConfig,
    ) -> Self {
        let mut controller = Self::new(transport, exporter);
        controller.discard_stale_responses = config.discard_stale_responses;
        controller
    }

    /// Drop responses older than the latest issued request instead of
    /// letting them overwrite newer results.
    pub fn with_stale_response_guard(mut self, enabled: bool) -> Self {
        self.discard_stale_responses = enabled;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn result(&self) -> &ExecutionResult {
        &self.result
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// Number of executions started but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Replace the document with a freshly loaded file.
    ///
    /// Rejects anything not ending in `.smia` without touching any state.
    /// Invalid UTF-8 is replaced with U+FFFD rather than refused.
    pub fn load_from_source(&mut self, raw_bytes: &[u8], source_name: &str) -> Result<(), FormatError> {
        if let Err(e) = check_extension(source_name) {
            warn!("Rejected load of {}: bad extension", source_name);
            return Err(e);
        }

        let content = String::from_utf8_lossy(raw_bytes).into_owned();
        info!("Loaded {} ({} bytes)", source_name, raw_bytes.len());
        self.document = Document {
            name: Some(source_name.to_string()),
            content,
        };
        self.result = ExecutionResult::NotRun;
        if self.discard_stale_responses {
            // Anything issued before this load belongs to the old document
            self.latest_request_id = Some(self.next_request_id);
        }
        self.status_message = format!("Opened {}", source_name);
        Ok(())
    }

    /// Replace the document content. Called on every edit.
    pub fn update_content(&mut self, new_text: String) {
        self.document.content = new_text;
    }

    /// Export the current content under the fixed export name.
    ///
    /// Export failures are reported in the status line and the log; they
    /// never surface as an error here.
    pub fn save_current(&mut self) -> ExportFile {
        let file = ExportFile::from_content(&self.document.content);
        match self.exporter.export(&file) {
            Ok(path) => {
                info!("Saved {} bytes to {}", file.bytes.len(), path.display());
                self.status_message = format!(
                    "Saved {} at {}",
                    path.display(),
                    Local::now().format("%H:%M:%S")
                );
            }
            Err(e) => {
                warn!("Export of {} failed: {}", file.file_name, e);
                self.status_message = format!("Save failed: {}", e);
            }
        }
        file
    }

    /// Mark a new execution as pending and hand out its ticket.
    pub fn begin_execution(&mut self) -> ExecuteTicket {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request_id = Some(request_id);
        self.in_flight += 1;
        self.result = ExecutionResult::Pending;
        self.status_message = String::from("Executing...");
        debug!(
            "Execution #{} started ({} bytes, {} in flight)",
            request_id,
            self.document.content.len(),
            self.in_flight
        );

        ExecuteTicket {
            request_id,
            content: self.document.content.clone(),
        }
    }

    /// Apply the outcome of a finished execution.
    pub fn complete_execution(
        &mut self,
        request_id: u64,
        response: Result<ExecuteResponse, TransportError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.discard_stale_responses
            && self.latest_request_id.is_some_and(|latest| request_id < latest)
        {
            debug!("Discarding stale response for execution #{}", request_id);
            return;
        }

        self.result = match response {
            Ok(body) => {
                info!("Execution #{} succeeded ({} bytes)", request_id, body.result.len());
                ExecutionResult::Success(body.result)
            }
            Err(e) => {
                warn!("Execution #{} failed: {}", request_id, e);
                ExecutionResult::Failure(EXECUTION_FAILURE_MESSAGE.to_string())
            }
        };
        self.status_message = if self.in_flight > 0 {
            String::from("Executing...")
        } else {
            format!("Executed at {}", Local::now().format("%H:%M:%S"))
        };
    }

    /// Send the current content to the execution service and wait for it.
    pub async fn execute_remote(&mut self) {
        let ticket = self.begin_execution();
        let request_id = ticket.request_id;
        let response = run_execution(self.transport.clone(), ticket).await;
        self.complete_execution(request_id, response);
    }

    /// Record the startup reachability probe in the status line.
    pub fn record_probe(&mut self, response: Result<HealthResponse, TransportError>) {
        self.status_message = match response {
            Ok(health) => {
                info!("Execution service reachable: {:?}", health.message);
                String::from("Execution service online")
            }
            Err(e) => {
                warn!("Execution service probe failed: {}", e);
                String::from("Execution service unreachable")
            }
        };
    }
}

/// The suspending half of an execution. Runs without borrowing the controller.
pub async fn run_execution(
    transport: Arc<dyn Transport>,
    ticket: ExecuteTicket,
) -> Result<ExecuteResponse, TransportError> {
    let body = serde_json::to_value(ExecuteRequest {
        content: ticket.content,
    })
    .map_err(|e| TransportError::Decode(e.to_string()))?;

    debug!(
        "Execution #{} posting via {} transport",
        ticket.request_id,
        transport.name()
    );
    let value = transport.post(EXECUTE_PATH, &body).await?;
    serde_json::from_value::<ExecuteResponse>(value)
        .map_err(|e| TransportError::Decode(format!("unexpected response shape: {e}")))
}

/// `GET /` against the service, interpreted as a greeting.
pub async fn probe_service(transport: Arc<dyn Transport>) -> Result<HealthResponse, TransportError> {
    debug!("Probing execution service via {} transport", transport.name());
    let value = transport.get(PROBE_PATH).await?;
    serde_json::from_value::<HealthResponse>(value).map_err(|e| TransportError::Decode(e.to_string()))
}

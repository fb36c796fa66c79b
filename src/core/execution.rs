//! # Execution Results
//!
//! Outcome of the most recent remote execution, and the ticket that carries
//! an in-flight request from the controller to the transport task and back.
//!
//! ```text
//! NotRun ──execute──▶ Pending ──ok──▶ Success(text)
//!   ▲                   ▲    └─err──▶ Failure(msg)
//!   │                   └──execute── Success / Failure
//!   └── every successful load
//! ```

/// Shown for every transport failure. The underlying cause only goes to the log.
pub const EXECUTION_FAILURE_MESSAGE: &str = "Error: Unable to process the request.";

/// Path of the execution endpoint, relative to the service base URL.
pub const EXECUTE_PATH: &str = "/execute";

/// Path of the service greeting used as a reachability probe.
pub const PROBE_PATH: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExecutionResult {
    #[default]
    NotRun,
    Pending,
    Success(String),
    Failure(String),
}

impl ExecutionResult {
    /// Text for the output pane. Blank until something has come back.
    pub fn display_text(&self) -> &str {
        match self {
            ExecutionResult::NotRun | ExecutionResult::Pending => "",
            ExecutionResult::Success(text) => text,
            ExecutionResult::Failure(message) => message,
        }
    }
}

/// Snapshot of one execute request. Ids increase monotonically per controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteTicket {
    pub request_id: u64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_blank_until_resolved() {
        assert_eq!(ExecutionResult::NotRun.display_text(), "");
        assert_eq!(ExecutionResult::Pending.display_text(), "");
        assert_eq!(ExecutionResult::Success("42".into()).display_text(), "42");
        assert_eq!(
            ExecutionResult::Failure(EXECUTION_FAILURE_MESSAGE.into()).display_text(),
            "Error: Unable to process the request."
        );
    }

    #[test]
    fn test_default_is_not_run() {
        assert_eq!(ExecutionResult::default(), ExecutionResult::NotRun);
    }
}

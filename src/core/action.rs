//! # Actions
//!
//! Everything that can happen to the document becomes an `Action`.
//! User picks a file? That's `Action::Load { .. }`.
//! Service answers? That's `Action::ExecutionFinished { .. }`.
//!
//! `update()` applies an action to the controller and returns an `Effect`
//! telling the adapter what I/O to start next. The network call itself
//! never happens in here.
//!
//! ```text
//! Controller + Action  →  update()  →  Effect
//! ```

use crate::core::controller::Controller;
use crate::core::execution::ExecuteTicket;
use crate::transport::{ExecuteResponse, HealthResponse, TransportError};

#[derive(Debug)]
pub enum Action {
    /// A file was selected and read.
    Load { bytes: Vec<u8>, name: String },
    /// The editor's text changed.
    Edit(String),
    Save,
    Execute,
    ExecutionFinished {
        request_id: u64,
        response: Result<ExecuteResponse, TransportError>,
    },
    ServiceProbed(Result<HealthResponse, TransportError>),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Start the network half of an execution.
    SpawnExecution(ExecuteTicket),
    /// Show a blocking notice to the user.
    Notify(String),
}

pub fn update(controller: &mut Controller, action: Action) -> Effect {
    match action {
        Action::Load { bytes, name } => match controller.load_from_source(&bytes, &name) {
            Ok(()) => Effect::None,
            Err(e) => Effect::Notify(e.to_string()),
        },
        Action::Edit(text) => {
            controller.update_content(text);
            Effect::None
        }
        Action::Save => {
            controller.save_current();
            Effect::None
        }
        Action::Execute => Effect::SpawnExecution(controller.begin_execution()),
        Action::ExecutionFinished {
            request_id,
            response,
        } => {
            controller.complete_execution(request_id, response);
            Effect::None
        }
        Action::ServiceProbed(response) => {
            controller.record_probe(response);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

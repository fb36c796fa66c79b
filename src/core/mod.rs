//! # Core Application Logic
//!
//! The document/request lifecycle. It knows nothing about any specific UI
//! technology and never performs network I/O itself.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Controller (state)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Transport  │      │  Exporter  │
//!     │  Adapter   │      │  (reqwest) │      │ (local fs) │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`controller`]: The `Controller` struct, owner of the document and the last result
//! - [`action`]: The `Action` enum and `update()`
//! - [`document`]: `Document` and the `.smia` extension rule
//! - [`execution`]: `ExecutionResult` and request tickets
//! - [`export`]: The local file export collaborator
//! - [`surface`]: The `TextSurface` capability the editor implements
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod controller;
pub mod document;
pub mod execution;
pub mod export;
pub mod surface;

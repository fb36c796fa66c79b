//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the editor and
//! output panes, and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Sync
//!
//! The controller owns the document text. After every batch of events the
//! loop pushes `Document.content` back into the editor through
//! `TextSurface::set_text`, which does nothing when the text is already
//! equal. User edits flow the other way as `Action::Edit`.
//!
//! ## Redraw Strategy
//!
//! - **Executing**: polls every ~80ms so the "Running..." state and the
//!   incoming result show up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background
//!   actions.

mod component;
mod components;
mod event;
pub mod selection;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller::{Controller, probe_service, run_execution};
use crate::core::execution::ExecuteTicket;
use crate::core::export::DirectoryExporter;
use crate::core::surface::TextSurface;
use crate::transport::{HttpTransport, Transport};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    Editor, EditorEvent, FilePrompt, Notice, OutputPaneState, PromptEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::selection::read_selection;

/// Modal layer drawn over the panes. While one is open it gets every event.
pub enum Overlay {
    Prompt(FilePrompt),
    Notice(Notice),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub editor: Editor,
    pub output: OutputPaneState,
    // Prompt or notice overlay (None = hidden)
    pub overlay: Option<Overlay>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            editor: Editor::new(),
            output: OutputPaneState::new(),
            overlay: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the HTTP transport from a resolved config.
pub fn build_transport(config: &ResolvedConfig) -> Arc<dyn Transport> {
    Arc::new(HttpTransport::new(
        config.service_url.clone(),
        config.request_timeout,
    ))
}

pub fn run(config: ResolvedConfig, initial_file: Option<PathBuf>) -> std::io::Result<()> {
    let transport = build_transport(&config);
    let exporter = Arc::new(DirectoryExporter::new(config.export_dir.clone()));
    info!(
        "Using {} transport, exporting into {}",
        transport.name(),
        exporter.dir().display()
    );
    let mut controller = Controller::from_config(transport, exporter, &config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_probe(controller.transport(), tx.clone());

    if let Some(path) = initial_file {
        open_selection(&mut controller, &mut tui, &path, &tx);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if sync_surface(&controller, &mut tui) {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &controller, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if controller.in_flight() > 0 {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if dispatch(&mut controller, &mut tui, event, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (execution results, probe)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            apply_action(&mut controller, &mut tui, action, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Push the document text into the editor. Returns `true` if the editor
/// actually changed.
pub(crate) fn sync_surface(controller: &Controller, tui: &mut TuiState) -> bool {
    let changed = tui.editor.set_text(&controller.document().content);
    if changed {
        debug!("Editor resynced from document");
    }
    changed
}

/// Route one terminal event. Returns `true` when the app should quit.
pub(crate) fn dispatch(
    controller: &mut Controller,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    // Resize just needs a redraw (already flagged by the caller)
    if matches!(event, TuiEvent::Resize) {
        return false;
    }

    // ForceQuit always quits, even with an overlay open
    if matches!(event, TuiEvent::ForceQuit) {
        return apply_action(controller, tui, Action::Quit, tx);
    }

    if let Some(mut overlay) = tui.overlay.take() {
        let keep = match &mut overlay {
            Overlay::Notice(notice) => notice.handle_event(&event).is_none(),
            Overlay::Prompt(prompt) => match prompt.handle_event(&event) {
                Some(PromptEvent::Confirm(path)) => {
                    open_selection(controller, tui, Path::new(&path), tx);
                    false
                }
                Some(PromptEvent::Cancel) => false,
                None => true,
            },
        };
        if keep {
            tui.overlay = Some(overlay);
        }
        return false;
    }

    match event {
        TuiEvent::OpenFile => {
            tui.overlay = Some(Overlay::Prompt(FilePrompt::new()));
            false
        }
        TuiEvent::Save => apply_action(controller, tui, Action::Save, tx),
        TuiEvent::Execute => apply_action(controller, tui, Action::Execute, tx),
        TuiEvent::ScrollOutputUp | TuiEvent::ScrollOutputDown => {
            tui.output.handle_event(&event);
            false
        }
        _ => match tui.editor.handle_event(&event) {
            Some(EditorEvent::Changed(text)) => {
                apply_action(controller, tui, Action::Edit(text), tx)
            }
            None => false,
        },
    }
}

/// Run an action through `update` and carry out the effect. Returns `true`
/// on quit.
pub(crate) fn apply_action(
    controller: &mut Controller,
    tui: &mut TuiState,
    action: Action,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let finished = matches!(action, Action::ExecutionFinished { .. });
    let effect = update(controller, action);
    if finished {
        tui.output.reset();
    }

    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnExecution(ticket) => {
            spawn_execution(controller.transport(), ticket, tx.clone());
            false
        }
        Effect::Notify(message) => {
            tui.overlay = Some(Overlay::Notice(Notice::new(message)));
            false
        }
    }
}

/// Validate and read `path`, then hand it to the controller. Rejections show
/// a notice and leave the document untouched.
fn open_selection(
    controller: &mut Controller,
    tui: &mut TuiState,
    path: &Path,
    tx: &mpsc::Sender<Action>,
) {
    match read_selection(path) {
        Ok(selection) => {
            info!("Opening {} ({} bytes)", path.display(), selection.bytes.len());
            apply_action(
                controller,
                tui,
                Action::Load {
                    bytes: selection.bytes,
                    name: selection.name,
                },
                tx,
            );
        }
        Err(e) => {
            warn!("Rejected selection {}: {}", path.display(), e);
            tui.overlay = Some(Overlay::Notice(Notice::new(e.to_string())));
        }
    }
}

fn spawn_execution(transport: Arc<dyn Transport>, ticket: ExecuteTicket, tx: mpsc::Sender<Action>) {
    let request_id = ticket.request_id;
    info!("Spawning execution request (request_id={})", request_id);
    tokio::spawn(async move {
        let response = run_execution(transport, ticket).await;
        if tx
            .send(Action::ExecutionFinished {
                request_id,
                response,
            })
            .is_err()
        {
            warn!(
                "Failed to send execution result for request_id={}: receiver dropped",
                request_id
            );
        }
    });
}

fn spawn_probe(transport: Arc<dyn Transport>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let response = probe_service(transport).await;
        if tx.send(Action::ServiceProbed(response)).is_err() {
            warn!("Failed to send probe result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::execution::ExecutionResult;
    use crate::test_support::{FakeTransport, RecordingExporter, test_controller};
    use serde_json::json;
    use std::fs;

    fn typed(controller: &mut Controller, tui: &mut TuiState, text: &str, tx: &mpsc::Sender<Action>) {
        for c in text.chars() {
            dispatch(controller, tui, TuiEvent::InputChar(c), tx);
        }
    }

    #[test]
    fn test_typing_updates_document() {
        let mut controller = test_controller();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        typed(&mut controller, &mut tui, "mkdisk", &tx);

        assert_eq!(controller.document().content, "mkdisk");
        // Already equal, so syncing back is a no-op
        assert!(!sync_surface(&controller, &mut tui));
    }

    #[test]
    fn test_open_valid_file_replaces_editor_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.smia");
        fs::write(&path, "mount -path=/home").unwrap();

        let mut controller = test_controller();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        typed(&mut controller, &mut tui, "old", &tx);

        dispatch(&mut controller, &mut tui, TuiEvent::OpenFile, &tx);
        assert!(matches!(tui.overlay, Some(Overlay::Prompt(_))));
        dispatch(
            &mut controller,
            &mut tui,
            TuiEvent::Paste(path.display().to_string()),
            &tx,
        );
        dispatch(&mut controller, &mut tui, TuiEvent::Submit, &tx);

        assert!(tui.overlay.is_none());
        assert_eq!(controller.document().name.as_deref(), Some("disk.smia"));
        assert!(sync_surface(&controller, &mut tui));
        assert_eq!(tui.editor.text(), "mount -path=/home");
    }

    #[test]
    fn test_open_wrong_extension_shows_notice_and_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let mut controller = test_controller();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        typed(&mut controller, &mut tui, "keep me", &tx);

        open_selection(&mut controller, &mut tui, &path, &tx);

        assert!(matches!(tui.overlay, Some(Overlay::Notice(_))));
        assert_eq!(controller.document().content, "keep me");
        assert_eq!(controller.document().name, None);

        // Typing goes to the notice, not the editor
        dispatch(&mut controller, &mut tui, TuiEvent::InputChar('x'), &tx);
        assert_eq!(controller.document().content, "keep me");

        dispatch(&mut controller, &mut tui, TuiEvent::Escape, &tx);
        assert!(tui.overlay.is_none());
    }

    #[test]
    fn test_cancel_prompt_leaves_everything() {
        let mut controller = test_controller();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        dispatch(&mut controller, &mut tui, TuiEvent::OpenFile, &tx);
        dispatch(&mut controller, &mut tui, TuiEvent::Escape, &tx);

        assert!(tui.overlay.is_none());
        assert_eq!(controller.document().content, "");
    }

    #[test]
    fn test_save_exports_current_text() {
        let exporter = Arc::new(RecordingExporter::default());
        let mut controller = Controller::new(Arc::new(FakeTransport::new()), exporter.clone());
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        typed(&mut controller, &mut tui, "rep", &tx);
        dispatch(&mut controller, &mut tui, TuiEvent::Save, &tx);

        let exported = exporter.exported();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].file_name, "file.smia");
        assert_eq!(exported[0].bytes, b"rep");
    }

    #[test]
    fn test_force_quit_wins_over_overlay() {
        let mut controller = test_controller();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        dispatch(&mut controller, &mut tui, TuiEvent::OpenFile, &tx);
        assert!(dispatch(&mut controller, &mut tui, TuiEvent::ForceQuit, &tx));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_execute_round_trip_through_channel() {
        let transport = Arc::new(FakeTransport::new().respond(Ok(json!({"result": "42"}))));
        let mut controller =
            Controller::new(transport.clone(), Arc::new(RecordingExporter::default()));
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();

        typed(&mut controller, &mut tui, "mkdisk", &tx);
        dispatch(&mut controller, &mut tui, TuiEvent::Execute, &tx);
        assert_eq!(controller.result(), &ExecutionResult::Pending);

        let action = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        apply_action(&mut controller, &mut tui, action, &tx);

        assert_eq!(controller.result(), &ExecutionResult::Success("42".into()));
        assert_eq!(transport.posted()[0].1, json!({"content": "mkdisk"}));
    }
}

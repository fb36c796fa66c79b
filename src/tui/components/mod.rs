//! # TUI Components
//!
//! Every piece of the screen, one file (or directory) each.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: application name, document name, status message
//! - `OutputPane`: last execution result (transient wrapper over `OutputPaneState`)
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Editor`: the document's text surface
//! - `FilePrompt`: path entry overlay for opening a file
//! - `Notice`: blocking message overlay
//!
//! Components receive external data as props (struct fields or constructor
//! arguments), never by reaching into the controller, so each one can be
//! rendered into a `TestBackend` on its own.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── editor/          (Text surface with wrapping + cursor)
//! ├── output_pane.rs   (Scrollable execution output)
//! ├── file_prompt.rs   (Open-file overlay)
//! └── notice.rs        (Blocking notice overlay)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

pub mod editor;
pub mod file_prompt;
pub mod notice;
pub mod output_pane;
mod title_bar;

pub use editor::{Editor, EditorEvent};
pub use file_prompt::{FilePrompt, PromptEvent};
pub use notice::Notice;
pub use output_pane::{OutputPane, OutputPaneState};
pub use title_bar::TitleBar;

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

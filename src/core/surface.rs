//! # Text Surface
//!
//! Capability contract for whatever widget displays and edits the document.
//! The surface only mirrors `Document.content`; the controller stays the
//! owner of the real value.
//!
//! User edits come out of the surface as an emitted value (for the TUI
//! editor, `EditorEvent::Changed(text)`), which the event loop forwards to
//! the controller as `Action::Edit`. Programmatic writes go the other way
//! through [`TextSurface::set_text`] and never produce a notification.

pub trait TextSurface {
    /// Current text shown by the surface.
    fn text(&self) -> &str;

    /// Replace the shown text without emitting a change notification.
    ///
    /// Returns `false` and leaves the surface untouched when `text` equals
    /// what is already shown.
    fn set_text(&mut self, text: &str) -> bool;
}

//! # Editor Component
//!
//! The text surface for the loaded document: a word-wrapping, scrolling,
//! multi-line editor.
//!
//! ## State Management
//!
//! The buffer here is a mirror. The controller's `Document.content` is the
//! real value, and the event loop keeps the two equal:
//!
//! - user edits come out as `EditorEvent::Changed(text)` and are forwarded to
//!   the controller;
//! - controller changes (a file load) come back in through
//!   [`TextSurface::set_text`], which is silent and a no-op for equal text,
//!   so syncing after every event cannot feed back into another edit.
//!
//! The title (document name) and focus flag are props set by the parent.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::surface::TextSurface;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary, wrap_line_count,
    wrap_options,
};

/// High-level events emitted by the Editor
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The user changed the text; carries the full new text.
    Changed(String),
}

pub struct Editor {
    buffer: String,
    /// Document name shown in the border (Prop)
    pub title: String,
    /// Whether keystrokes currently go here (Prop)
    pub focused: bool,
    cursor: CursorState,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            title: String::new(),
            focused: true,
            cursor: CursorState::new(),
        }
    }

    /// Cursor byte offset into the text.
    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }

    fn insert(&mut self, text: &str) -> Option<EditorEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(self.changed())
    }

    fn changed(&self) -> EditorEvent {
        EditorEvent::Changed(self.buffer.clone())
    }

    fn visible_text(&self, content_width: u16, viewport_lines: u16) -> String {
        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + viewport_lines as usize).min(lines.len());

        lines[start..end].join("\n")
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, viewport_lines: u16) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let total_lines = wrap_line_count(&self.buffer, inner_width(area.width));
        if total_lines <= viewport_lines {
            return;
        }

        // ScrollbarState content_length is max scrollable position, not total items
        let max_scroll = total_lines.saturating_sub(viewport_lines);
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for Editor {
    fn text(&self) -> &str {
        &self.buffer
    }

    fn set_text(&mut self, text: &str) -> bool {
        if self.buffer == text {
            return false;
        }
        self.buffer = text.to_string();
        self.cursor.reset();
        true
    }
}

impl Component for Editor {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let viewport_lines = area.height.saturating_sub(VERTICAL_OVERHEAD);
        self.cursor.last_content_width = area.width;
        self.cursor
            .update_scroll_offset(&self.buffer, area.width, viewport_lines);

        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let text = Paragraph::new(self.visible_text(area.width, viewport_lines))
            .block(block)
            .style(Style::default().fg(Color::White));

        frame.render_widget(text, area);
        self.render_scrollbar(frame, area, viewport_lines);

        if self.focused {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for Editor {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert(c.encode_utf8(&mut encoded))
            }
            TuiEvent::Submit => self.insert("\n"),
            TuiEvent::Paste(text) => {
                // Terminals deliver pasted line breaks as \r or \r\n
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&normalized)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(self.changed())
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(self.changed())
            }
            TuiEvent::CursorLeft => {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos < self.buffer.len() {
                    self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor.pos = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor.pos = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::CursorUp => {
                let width = self.cursor.last_content_width;
                self.cursor.move_vertically(&self.buffer, -1, width);
                None
            }
            TuiEvent::CursorDown => {
                let width = self.cursor.last_content_width;
                self.cursor.move_vertically(&self.buffer, 1, width);
                None
            }
            _ => None,
        }
    }
}

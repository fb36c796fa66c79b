//! # File Prompt Overlay
//!
//! Asks for the path of a `.smia` file to open. Opened with Ctrl+O,
//! dismissed with Esc. Only collects the path; validating and reading it is
//! the shell's job.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

/// Events emitted by the file prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    Confirm(String),
    Cancel,
}

#[derive(Default)]
pub struct FilePrompt {
    pub input: String,
}

impl FilePrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for FilePrompt {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Cancel),
            TuiEvent::Submit => {
                let path = self.input.trim();
                (!path.is_empty()).then(|| PromptEvent::Confirm(path.to_string()))
            }
            TuiEvent::InputChar(c) => {
                self.input.push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                // A path is one line; drop anything after a line break
                self.input.push_str(text.lines().next().unwrap_or(""));
                None
            }
            TuiEvent::Backspace => {
                self.input.pop();
                None
            }
            _ => None,
        }
    }
}

impl Component for FilePrompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 20, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Open .smia file ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Open  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);

        let input = Paragraph::new(self.input.as_str())
            .style(Style::default().fg(Color::White))
            .block(block);
        frame.render_widget(input, overlay);

        // Clamp the cursor inside the box
        let width = inner.width.saturating_sub(1);
        let col = (unicode_width::UnicodeWidthStr::width(self.input.as_str()) as u16).min(width);
        frame.set_cursor_position((inner.x + col, inner.y));
    }
}

//! # TitleBar Component
//!
//! Top status bar: application name, loaded document, status message.
//!
//! Stateless: every field is a prop copied in by the parent each frame.
//! The title text degrades in this order as state empties:
//!
//! 1. `"FruitPunchFS | disk.smia | Saved ./file.smia at 10:02:11"`
//! 2. `"FruitPunchFS | disk.smia"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_TITLE: &str = "FruitPunchFS";

pub struct TitleBar {
    /// Loaded document name, or the "No file selected" label
    pub document_name: String,
    /// Status message (e.g. "Executing...", "Saved ...")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(document_name: String, status_message: String) -> Self {
        Self {
            document_name,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                APP_TITLE,
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::raw(self.document_name.as_str()),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("disk.smia".to_string(), "Executing...".to_string());
        let text = rendered(&mut title_bar);
        assert!(text.contains("FruitPunchFS"));
        assert!(text.contains("disk.smia"));
        assert!(text.contains("Executing..."));
    }

    #[test]
    fn test_title_bar_without_status() {
        let mut title_bar = TitleBar::new("No file selected".to_string(), String::new());
        let text = rendered(&mut title_bar);
        assert!(text.contains("No file selected"));
        assert_eq!(text.matches('|').count(), 1);
    }
}

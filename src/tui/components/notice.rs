//! # Notice Overlay
//!
//! Blocking message box. While shown it swallows every key except the ones
//! that dismiss it (Enter, Esc).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

pub struct Notice {
    pub message: String,
}

/// The user acknowledged the notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Dismissed;

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl EventHandler for Notice {
    type Event = Dismissed;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        matches!(event, TuiEvent::Submit | TuiEvent::Escape).then_some(Dismissed)
    }
}

impl Component for Notice {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Red))
            .title(" Notice ")
            .title_bottom(Line::from(" Enter OK ").centered())
            .padding(Padding::uniform(1));

        let paragraph = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_only_enter_or_escape_dismiss() {
        let mut notice = Notice::new("Invalid file format. Please upload a .smia file.");
        assert_eq!(notice.handle_event(&TuiEvent::InputChar('y')), None);
        assert_eq!(notice.handle_event(&TuiEvent::Execute), None);
        assert_eq!(notice.handle_event(&TuiEvent::Submit), Some(Dismissed));
        assert_eq!(notice.handle_event(&TuiEvent::Escape), Some(Dismissed));
    }

    #[test]
    fn test_render_shows_message() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut notice = Notice::new("Bad file");
        terminal.draw(|f| notice.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Notice"));
        assert!(text.contains("Bad file"));
    }
}

//! # Output Pane
//!
//! Read-only view of the last execution result, scrollable for long output.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `OutputPaneState` lives in `TuiState` (scroll position survives frames)
//! - `OutputPane` is created each frame with the borrowed result as a prop

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::execution::ExecutionResult;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const OUTPUT_PLACEHOLDER: &str = "Output will appear here...";

#[derive(Default)]
pub struct OutputPaneState {
    pub scroll_state: ScrollViewState,
}

impl OutputPaneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump back to the top, e.g. when a new result replaces the old one.
    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }
}

impl EventHandler for OutputPaneState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollOutputUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollOutputDown => self.scroll_state.scroll_down(),
            _ => {}
        }
        None
    }
}

pub struct OutputPane<'a> {
    state: &'a mut OutputPaneState,
    result: &'a ExecutionResult,
    /// Whether any execution is still in flight (Prop)
    running: bool,
}

impl<'a> OutputPane<'a> {
    pub fn new(state: &'a mut OutputPaneState, result: &'a ExecutionResult, running: bool) -> Self {
        Self {
            state,
            result,
            running,
        }
    }
}

impl Component for OutputPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.running {
            " Output (running...) "
        } else {
            " Output "
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = self.result.display_text();
        let (body, style) = match self.result {
            _ if text.is_empty() => (
                OUTPUT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
            ExecutionResult::Failure(_) => (text, Style::default().fg(Color::Red)),
            _ => (text, Style::default().fg(Color::Green)),
        };

        // Leave a column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        if content_width == 0 || inner.height == 0 {
            return;
        }

        let paragraph = Paragraph::new(body).style(style).wrap(Wrap { trim: false });
        let height = (paragraph.line_count(content_width) as u16).max(1);

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(result: &ExecutionResult, running: bool) -> String {
        let backend = TestBackend::new(50, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = OutputPaneState::new();
        terminal
            .draw(|f| OutputPane::new(&mut state, result, running).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_not_run_shows_placeholder() {
        let text = rendered_text(&ExecutionResult::NotRun, false);
        assert!(text.contains("Output will appear here..."));
    }

    #[test]
    fn test_pending_is_blank_with_running_title() {
        let text = rendered_text(&ExecutionResult::Pending, true);
        assert!(text.contains("running"));
        assert!(text.contains("Output will appear here..."));
    }

    #[test]
    fn test_success_text_rendered() {
        let text = rendered_text(&ExecutionResult::Success("Disk created".into()), false);
        assert!(text.contains("Disk created"));
        assert!(!text.contains("Output will appear"));
    }

    #[test]
    fn test_failure_message_rendered() {
        let text = rendered_text(
            &ExecutionResult::Failure("Error: Unable to process the request.".into()),
            false,
        );
        assert!(text.contains("Error: Unable to process the request."));
    }

    #[test]
    fn test_scroll_events_are_consumed_silently() {
        let mut state = OutputPaneState::new();
        assert_eq!(state.handle_event(&TuiEvent::ScrollOutputDown), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }
}

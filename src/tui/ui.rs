use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::controller::Controller;
use crate::tui::component::Component;
use crate::tui::components::{OutputPane, TitleBar};
use crate::tui::{Overlay, TuiState};

const HELP_TEXT: &str =
    " Ctrl+O Open  Ctrl+S Save  Ctrl+R/F5 Execute  Alt+↑/↓ Scroll output  Ctrl+Q Quit ";

pub fn draw_ui(frame: &mut Frame, controller: &Controller, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());
    let [editor_area, output_area] =
        Layout::horizontal([Percentage(55), Percentage(45)]).areas(main_area);

    let document = controller.document();
    let mut title_bar = TitleBar::new(
        document.display_name().to_string(),
        controller.status_message.clone(),
    );
    title_bar.render(frame, title_area);

    tui.editor.title = document.display_name().to_string();
    tui.editor.focused = tui.overlay.is_none();
    tui.editor.render(frame, editor_area);

    OutputPane::new(&mut tui.output, controller.result(), controller.in_flight() > 0)
        .render(frame, output_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlays last so they sit on top
    match tui.overlay.as_mut() {
        Some(Overlay::Prompt(prompt)) => prompt.render(frame, frame.area()),
        Some(Overlay::Notice(notice)) => notice.render(frame, frame.area()),
        None => {}
    }
}

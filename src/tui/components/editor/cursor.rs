//! Cursor position and viewport scrolling for the editor.
//!
//! `CursorState` owns the cursor byte offset, the first visible wrapped line,
//! and the width cached from the last render. The text itself belongs to
//! `Editor` and is passed in explicitly.

use super::text_wrap::{
    BORDER_OFFSET, display_width, inner_width, offset_at_column, wrap_line_count, wrap_options,
    wrapped_line_spans,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First wrapped line shown in the viewport
    pub scroll_offset: u16,
    /// Area width from the last render (used for vertical movement)
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Back to the top of the document (used when the text is replaced wholesale).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Move the cursor one wrapped line up (`direction < 0`) or down, keeping
    /// the display column where possible.
    ///
    /// Returns `true` if the cursor moved, `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let width = inner_width(content_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }

        let spans = wrapped_line_spans(buffer, width);
        let Some(current_line_idx) = spans.iter().rposition(|&(start, _)| start <= self.pos) else {
            return false;
        };

        let target_line_idx = if direction < 0 {
            if current_line_idx == 0 {
                return false;
            }
            current_line_idx - 1
        } else {
            if current_line_idx + 1 >= spans.len() {
                return false;
            }
            current_line_idx + 1
        };

        let line_start = spans[current_line_idx].0;
        let column = display_width(buffer.get(line_start..self.pos).unwrap_or(""));

        let (target_start, target_end) = spans[target_line_idx];
        self.pos = target_start + offset_at_column(&buffer[target_start..target_end], column);

        true
    }

    /// Which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }

        let text_before_cursor = &buffer[..self.pos];
        let lines = textwrap::wrap(text_before_cursor, wrap_options(width));
        let mut cursor_line = lines.len().saturating_sub(1) as u16;

        // Cursor right after a newline textwrap didn't represent
        if self.pos > 0
            && buffer.as_bytes()[self.pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            cursor_line += 1;
        }

        cursor_line
    }

    /// Scroll just enough to keep the cursor line inside the viewport.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16, viewport_lines: u16) {
        let width = inner_width(content_width);
        let total_lines = wrap_line_count(buffer, width);
        let viewport_lines = viewport_lines.max(1);

        if total_lines <= viewport_lines {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + viewport_lines {
            self.scroll_offset = cursor_line.saturating_sub(viewport_lines - 1);
        }
    }

    /// Screen position (column, row) of the cursor for the wrapped layout.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let cursor_line = self.calculate_line(buffer, area.width);

        // Column from the last newline, so spaces textwrap would trim still count.
        let text_before_cursor = &buffer[..self.pos];
        let last_newline = text_before_cursor
            .rfind('\n')
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let logical_line_to_cursor = &text_before_cursor[last_newline..];

        // Locate where the last wrapped segment starts. Segments drop the
        // spaces they were split on, so lengths alone can't be summed.
        let mut search_from = 0;
        let mut last_start = 0;
        for segment in textwrap::wrap(logical_line_to_cursor, wrap_options(width)) {
            last_start = logical_line_to_cursor
                .get(search_from..)
                .and_then(|rest| rest.find(segment.as_ref()))
                .map_or(search_from, |i| search_from + i);
            search_from = (last_start + segment.len()).min(logical_line_to_cursor.len());
        }
        let tail = logical_line_to_cursor.get(last_start..).unwrap_or("");
        let cursor_col = display_width(tail).min(width);

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);

        (
            area.x + BORDER_OFFSET + cursor_col,
            area.y + BORDER_OFFSET + visible_line,
        )
    }
}

//! Wrapping helpers and layout constants for the editor.
//!
//! Stateless; nothing in here knows about `Editor` or `CursorState`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Two borders plus one column reserved for the scrollbar.
pub(super) const HORIZONTAL_OVERHEAD: u16 = 3;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// Build textwrap options for the editor's inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after borders and scrollbar. 0 if the area is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Count wrapped lines for the given text, accounting for trailing newlines
/// that textwrap may not represent as empty lines.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = (lines.len() as u16).max(1);

    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count += 1;
    }

    count
}

/// Byte range `(start, end)` of every wrapped line within `text`.
///
/// textwrap drops the spaces it breaks on, so each line is located in the
/// original text instead of being derived from summed segment lengths.
pub(super) fn wrapped_line_spans(text: &str, width: u16) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut search_from = 0;

    for segment in textwrap::wrap(text, wrap_options(width)) {
        let start = if segment.is_empty() {
            search_from
        } else {
            text[search_from..]
                .find(segment.as_ref())
                .map_or(search_from, |i| search_from + i)
        };
        let mut end = (start + segment.len()).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        spans.push((start, end));

        // Step over the spaces a soft break consumed, then one hard newline
        search_from = end + text[end..].bytes().take_while(|b| *b == b' ').count();
        if text[search_from..].starts_with('\n') {
            search_from += 1;
        }
    }

    spans
}

/// Byte offset into `line` of the last character boundary that fits within
/// `column` terminal columns.
pub(super) fn offset_at_column(line: &str, column: u16) -> usize {
    let mut used = 0u16;
    let mut offset = 0;
    for (i, c) in line.char_indices() {
        used = used.saturating_add(UnicodeWidthChar::width(c).unwrap_or(0) as u16);
        if used > column {
            break;
        }
        offset = i + c.len_utf8();
    }
    offset
}

/// Terminal columns taken by `text`.
pub(super) fn display_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text) as u16
}

/// Byte offset of the previous character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the next character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_line_count_empty_string() {
        assert_eq!(wrap_line_count("", 80), 1);
    }

    #[test]
    fn wrap_line_count_counts_hard_newlines() {
        assert_eq!(wrap_line_count("mkdisk\nfdisk\nmount", 80), 3);
    }

    #[test]
    fn wrap_line_count_wraps_long_text() {
        assert_eq!(wrap_line_count("aaaaaaaaaa", 5), 2);
    }

    #[test]
    fn wrap_line_count_trailing_newline_adds_line() {
        assert_eq!(wrap_line_count("rep\n", 80), 2);
    }

    #[test]
    fn wrapped_line_spans_skip_break_spaces() {
        // Soft break drops the space between the two words
        assert_eq!(wrapped_line_spans("aaaa bbbb", 5), vec![(0, 4), (5, 9)]);
        assert_eq!(wrapped_line_spans("aaaa ééé", 5), vec![(0, 4), (5, 11)]);
    }

    #[test]
    fn wrapped_line_spans_handle_blank_lines() {
        assert_eq!(wrapped_line_spans("a\n\nb", 80), vec![(0, 1), (2, 2), (3, 4)]);
        assert_eq!(wrapped_line_spans("ab  \ncd", 80)[1], (5, 7));
    }

    #[test]
    fn offset_at_column_stops_on_char_boundary() {
        assert_eq!(offset_at_column("ééé", 1), 2);
        assert_eq!(offset_at_column("ééé", 9), 6);
        assert_eq!(offset_at_column("日本", 1), 0);
        assert_eq!(offset_at_column("日本", 2), 3);
    }

    #[test]
    fn inner_width_saturates() {
        assert_eq!(inner_width(2), 0);
        assert_eq!(inner_width(40), 37);
    }

    #[test]
    fn display_width_counts_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn char_boundaries_respect_multibyte() {
        let text = "aé🍉";
        assert_eq!(next_char_boundary(text, 0), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(next_char_boundary(text, 3), 7);
        assert_eq!(prev_char_boundary(text, 7), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
        assert_eq!(prev_char_boundary(text, 0), 0);
    }
}

//! # Selector Field Component
//!
//! Renders a `core::selector::Selector` as a bordered input box plus, while
//! the selector is open, a dropdown overlay listing the filtered candidates.
//!
//! ```text
//! ┌ Origin ──────────────────┐
//! │ par█                     │
//! └──────────────────────────┘
//! ┌──────────────────────────┐
//! │ Paraná   Entre Ríos      │   ← highlighted row is reversed
//! └──────────────────────────┘
//! ```
//!
//! The geometry helpers (`dropdown_area`, `row_at`) are shared with the
//! event loop so mouse clicks resolve against exactly what was drawn.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::form::ValidationError;
use crate::core::selector::Selector;
use crate::tui::component::Component;
use crate::tui::components::{field_border_style, truncate_str};

/// Most rows the dropdown shows before scrolling.
pub const DROPDOWN_MAX_ROWS: u16 = 8;

const NO_RESULTS: &str = "No results";
const PLACEHOLDER: &str = "Type to search...";

/// Where the dropdown for a field at `field_area` goes, clipped to `bounds`.
pub fn dropdown_area(field_area: Rect, row_count: usize, bounds: Rect) -> Rect {
    let rows = u16::try_from(row_count.max(1))
        .unwrap_or(u16::MAX)
        .min(DROPDOWN_MAX_ROWS);
    let y = field_area.y + field_area.height;
    let available = bounds.bottom().saturating_sub(y);
    Rect {
        x: field_area.x,
        y,
        width: field_area.width,
        height: (rows + 2).min(available),
    }
}

/// First visible row so that the highlight stays on screen.
pub fn scroll_offset(highlighted: Option<usize>, visible_rows: usize) -> usize {
    highlighted.map_or(0, |h| (h + 1).saturating_sub(visible_rows))
}

/// The filtered-list row under (`col`, `row`), if any.
pub fn row_at(
    area: Rect,
    highlighted: Option<usize>,
    row_count: usize,
    col: u16,
    row: u16,
) -> Option<usize> {
    let inner = area.inner(ratatui::layout::Margin::new(1, 1));
    if !inner.contains(Position::new(col, row)) {
        return None;
    }
    let visible = inner.height as usize;
    let index = scroll_offset(highlighted, visible) + (row - inner.y) as usize;
    (index < row_count).then_some(index)
}

/// The input box for one selector.
pub struct SelectorField<'a, T> {
    label: &'a str,
    selector: &'a Selector<T>,
    focused: bool,
    error: Option<ValidationError>,
}

impl<'a, T> SelectorField<'a, T> {
    pub fn new(
        label: &'a str,
        selector: &'a Selector<T>,
        focused: bool,
        error: Option<ValidationError>,
    ) -> Self {
        Self {
            label,
            selector,
            focused,
            error,
        }
    }
}

impl<T> Component for SelectorField<'_, T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(field_border_style(self.focused, self.error.is_some()))
            .title(format!(" {} ", self.label));
        if let Some(error) = self.error {
            block = block.title_bottom(
                Line::from(format!(" {error} ")).style(Style::default().fg(Color::Red)),
            );
        }
        let inner = block.inner(area);

        let text = self.selector.text();
        let line = if text.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(truncate_str(&text, inner.width.saturating_sub(1) as usize))
        };
        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused && self.selector.is_open() {
            let x = inner.x + u16::try_from(self.selector.query().width())
                .unwrap_or(u16::MAX)
                .min(inner.width);
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}

/// Candidate list overlay for an open selector.
pub struct Dropdown<'a, T> {
    selector: &'a Selector<T>,
}

impl<'a, T> Dropdown<'a, T> {
    pub fn new(selector: &'a Selector<T>) -> Self {
        Self { selector }
    }
}

impl<T> Component for Dropdown<'_, T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.selector.filtered_len() == 0 {
            let empty = Paragraph::new(NO_RESULTS)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(empty, inner);
            return;
        }

        let visible = inner.height as usize;
        let width = inner.width as usize;
        let highlighted = self.selector.highlighted();
        let offset = scroll_offset(highlighted, visible);

        let lines: Vec<Line> = self
            .selector
            .filtered()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, item)| {
                let name = self.selector.display_of(item);
                let subtitle = self.selector.subtitle_of(item);
                let name = truncate_str(&name, width);
                let rest = width.saturating_sub(name.width() + 2);
                let subtitle = truncate_str(&subtitle, rest);

                let is_highlighted = highlighted == Some(i);
                let (name_style, sub_style) = if is_highlighted {
                    let s = Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    (s, s)
                } else {
                    (Style::default(), Style::default().fg(Color::DarkGray))
                };
                let pad = width.saturating_sub(name.width() + 2 + subtitle.width());

                Line::from(vec![
                    Span::styled(name, name_style),
                    Span::styled("  ", name_style),
                    Span::styled(subtitle, sub_style),
                    Span::styled(" ".repeat(pad), name_style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selector::SelectorInput;
    use crate::tui::components::test_helpers::{buffer_lines, buffer_text};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn selector(names: &[&str]) -> Selector<String> {
        let items: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        Selector::new(
            Arc::from(items),
            Box::new(|s: &String| s.clone()),
            Box::new(|s: &String| format!("near {s}")),
        )
    }

    #[test]
    fn test_dropdown_area_sits_below_field_and_clips() {
        let field = Rect::new(2, 3, 30, 3);
        let bounds = Rect::new(0, 0, 80, 24);
        assert_eq!(dropdown_area(field, 3, bounds), Rect::new(2, 6, 30, 5));
        assert_eq!(dropdown_area(field, 0, bounds).height, 3);
        assert_eq!(dropdown_area(field, 50, bounds).height, DROPDOWN_MAX_ROWS + 2);

        let short = Rect::new(0, 0, 80, 9);
        assert_eq!(dropdown_area(field, 50, short).height, 3);
    }

    #[test]
    fn test_dropdown_area_handles_lists_beyond_u16() {
        let field = Rect::new(0, 0, 30, 3);
        let bounds = Rect::new(0, 0, 80, 24);
        assert_eq!(dropdown_area(field, 65_536, bounds).height, DROPDOWN_MAX_ROWS + 2);
        assert_eq!(dropdown_area(field, 70_000, bounds).height, DROPDOWN_MAX_ROWS + 2);
    }

    #[test]
    fn test_scroll_offset_keeps_highlight_visible() {
        assert_eq!(scroll_offset(None, 4), 0);
        assert_eq!(scroll_offset(Some(3), 4), 0);
        assert_eq!(scroll_offset(Some(4), 4), 1);
        assert_eq!(scroll_offset(Some(9), 4), 6);
    }

    #[test]
    fn test_row_at_maps_clicks_to_rows() {
        let area = Rect::new(0, 5, 20, 5); // rows 6..9 inside the border
        assert_eq!(row_at(area, None, 3, 4, 6), Some(0));
        assert_eq!(row_at(area, None, 3, 4, 8), Some(2));
        // Border and rows past the list are not rows
        assert_eq!(row_at(area, None, 3, 4, 5), None);
        assert_eq!(row_at(area, None, 2, 4, 8), None);
        assert_eq!(row_at(area, None, 3, 0, 6), None);
        // Scrolled list
        assert_eq!(row_at(area, Some(5), 10, 4, 6), Some(3));
    }

    #[test]
    fn test_field_shows_placeholder_then_selection() {
        let mut s = selector(&["Palomar", "Paraná"]);
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| SelectorField::new("Origin", &s, false, None).render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Origin"));
        assert!(text.contains(PLACEHOLDER));

        s.handle(SelectorInput::Focus);
        s.handle(SelectorInput::Click(1));
        terminal
            .draw(|f| SelectorField::new("Origin", &s, false, None).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Paraná"));
    }

    #[test]
    fn test_field_shows_inline_error() {
        let s = selector(&["Palomar"]);
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                SelectorField::new("Origin", &s, false, Some(ValidationError::OriginRequired))
                    .render(f, f.area())
            })
            .unwrap();
        let lines = buffer_lines(&terminal);
        assert!(lines[2].contains("Select an origin"));
    }

    #[test]
    fn test_dropdown_lists_filtered_rows_with_subtitles() {
        let mut s = selector(&["Palomar", "Paraná"]);
        s.handle(SelectorInput::Focus);
        s.handle(SelectorInput::Type("para".into()));

        let backend = TestBackend::new(30, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Dropdown::new(&s).render(f, f.area()))
            .unwrap();
        let lines = buffer_lines(&terminal);
        assert!(lines[1].contains("Paraná"));
        assert!(lines[1].contains("near Paraná"));
        assert!(!buffer_text(&terminal).contains("Palomar"));
    }

    #[test]
    fn test_dropdown_shows_no_results() {
        let mut s = selector(&["Palomar", "Paraná"]);
        s.handle(SelectorInput::Focus);
        s.handle(SelectorInput::Type("zzz".into()));

        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Dropdown::new(&s).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(&terminal).contains(NO_RESULTS));
    }
}

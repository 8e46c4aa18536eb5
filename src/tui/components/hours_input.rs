//! # Hours Input Component
//!
//! Text box for the hours of use. Only laid out when the selected vehicle
//! consumes per hour.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::form::ValidationError;
use crate::tui::component::Component;
use crate::tui::components::field_border_style;

pub struct HoursInput<'a> {
    text: &'a str,
    focused: bool,
    error: Option<ValidationError>,
}

impl<'a> HoursInput<'a> {
    pub fn new(text: &'a str, focused: bool, error: Option<ValidationError>) -> Self {
        Self {
            text,
            focused,
            error,
        }
    }
}

impl Component for HoursInput<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(field_border_style(self.focused, self.error.is_some()))
            .title(" Hours of use ");
        if let Some(error) = self.error {
            block = block.title_bottom(
                Line::from(format!(" {error} ")).style(Style::default().fg(Color::Red)),
            );
        }
        let inner = block.inner(area);

        let line = if self.text.is_empty() && !self.focused {
            Line::from(Span::styled("e.g. 2,5", Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(format!("{} h", self.text))
        };
        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused {
            let x = inner.x + u16::try_from(self.text.width()).unwrap_or(u16::MAX).min(inner.width);
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}

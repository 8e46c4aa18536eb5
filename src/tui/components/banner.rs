//! # Banner Component
//!
//! Dismissible message for calculation failures.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::component::Component;

pub struct Banner<'a> {
    message: &'a str,
}

impl<'a> Banner<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Component for Banner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(Line::from(" Error ").style(Style::default().add_modifier(Modifier::BOLD)))
            .title_bottom(Line::from(" Esc dismiss ").right_aligned());
        let paragraph = Paragraph::new(self.message)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

//! # Trip Toggle Component
//!
//! Radio pair for the trip type. Exactly one option is marked.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::calculator::TripType;
use crate::tui::component::Component;
use crate::tui::components::field_border_style;

pub struct TripToggle {
    pub trip_type: TripType,
    pub focused: bool,
}

impl TripToggle {
    pub fn new(trip_type: TripType, focused: bool) -> Self {
        Self { trip_type, focused }
    }

    fn option(&self, option: TripType) -> Vec<Span<'static>> {
        let active = self.trip_type == option;
        let marker = if active { "(•) " } else { "( ) " };
        let style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        vec![Span::styled(marker, style), Span::styled(option.label(), style)]
    }
}

impl Component for TripToggle {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(field_border_style(self.focused, false))
            .title(" Trip ");

        let mut spans = self.option(TripType::OneWay);
        spans.push(Span::raw("   "));
        spans.extend(self.option(TripType::RoundTrip));

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::test_helpers::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_exactly_one_option_marked() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| TripToggle::new(TripType::RoundTrip, true).render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("( ) One way"));
        assert!(text.contains("(•) Round trip"));
        assert_eq!(text.matches('•').count(), 1);
    }
}

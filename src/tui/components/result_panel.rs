//! # Result Panel Component
//!
//! Lays out a `ResultView` as label/value rows with the total emphasized.
//! Before the first calculation it shows a short hint instead.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::present::ResultView;
use crate::tui::component::Component;

const LABEL_WIDTH: usize = 30;

pub struct ResultPanel<'a> {
    view: Option<&'a ResultView>,
}

impl<'a> ResultPanel<'a> {
    pub fn new(view: Option<&'a ResultView>) -> Self {
        Self { view }
    }
}

fn row<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{label:<width$}", width = LABEL_WIDTH),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value),
    ])
}

impl Component for ResultPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Result ")
            .padding(Padding::horizontal(1));

        let Some(view) = self.view else {
            let hint = Paragraph::new("Pick origin, destination and vehicle, then Calculate.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(hint, area);
            return;
        };

        let lines = vec![
            row("Route", &view.route),
            row("Trip", &view.trip),
            row("Vehicle", &view.vehicle),
            row("Distance", &view.distance),
            row(&view.duration_label, &view.duration),
            row("Consumption", &view.consumption),
            row("Fuel needed", &view.liters),
            row("Fuel price", &view.unit_price),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", "Total cost", width = LABEL_WIDTH),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    view.total.as_str(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

//! # Prices Panel Component
//!
//! Lists every priced fuel with its human label, followed by when and where
//! the prices were collected. Metadata keys never appear as price rows.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::format::{format_currency, format_date};
use crate::data::FuelPrices;
use crate::tui::component::Component;

pub struct PricesPanel<'a> {
    prices: &'a FuelPrices,
}

impl<'a> PricesPanel<'a> {
    pub fn new(prices: &'a FuelPrices) -> Self {
        Self { prices }
    }

    /// Rows needed inside the border: one per price plus the footer.
    pub fn content_height(prices: &FuelPrices) -> u16 {
        let footer = u16::from(prices.last_updated.is_some() || prices.source.is_some());
        u16::try_from(prices.len().max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(footer)
    }
}

impl Component for PricesPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Fuel prices ")
            .padding(Padding::horizontal(1));

        let mut lines: Vec<Line> = self
            .prices
            .iter()
            .map(|(fuel, price)| {
                Line::from(vec![
                    Span::raw(format!("{:<24}", self.prices.label(fuel))),
                    Span::raw(format!("{} / L", format_currency(price))),
                ])
            })
            .collect();
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No prices available",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let mut footer = Vec::new();
        if let Some(date) = &self.prices.last_updated {
            footer.push(format!("Updated {}", format_date(date)));
        }
        if let Some(source) = &self.prices.source {
            footer.push(format!("Source: {source}"));
        }
        if !footer.is_empty() {
            lines.push(Line::from(Span::styled(
                footer.join(" · "),
                Style::default().fg(Color::DarkGray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

//! # TitleBar Component
//!
//! Top status line showing where the reference data came from and the
//! current status message.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.source.clone(), app.status_message.clone());
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Nafta (data: ./data) | Cost calculated"`
//! 2. **Default**: `"Nafta (data: ./data)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status line.
pub struct TitleBar {
    /// Human-readable data source (directory or base URL)
    pub source: String,
    /// Status message (e.g., "Loading data...", "Cost calculated")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(source: String, status_message: String) -> Self {
        Self {
            source,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Nafta", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" (data: {})", self.source)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

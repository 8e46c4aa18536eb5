//! # Load Screen Component
//!
//! Full-screen view shown until the reference data is ready: a spinner while
//! loading, or the load error with reload/quit keys once it has failed.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::core::state::LoadStatus;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Events emitted by the load screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadScreenEvent {
    Reload,
    Quit,
}

pub struct LoadScreen<'a> {
    status: &'a LoadStatus,
    source: &'a str,
    spinner_frame: usize,
}

impl<'a> LoadScreen<'a> {
    pub fn new(status: &'a LoadStatus, source: &'a str, spinner_frame: usize) -> Self {
        Self {
            status,
            source,
            spinner_frame,
        }
    }
}

impl EventHandler for LoadScreen<'_> {
    type Event = LoadScreenEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<LoadScreenEvent> {
        if !matches!(self.status, LoadStatus::Failed(_)) {
            return None;
        }
        match event {
            TuiEvent::InputChar('r' | 'R') | TuiEvent::Submit => Some(LoadScreenEvent::Reload),
            TuiEvent::InputChar('q' | 'Q') | TuiEvent::Escape => Some(LoadScreenEvent::Quit),
            _ => None,
        }
    }
}

impl Component for LoadScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 40, area);

        let (title, border, lines) = match self.status {
            LoadStatus::Failed(error) => (
                " Could not load data ",
                Color::Red,
                vec![
                    Line::from(Span::styled(
                        error.to_string(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from(format!("Source: {}", self.source)),
                    Line::default(),
                    Line::from(Span::styled(
                        "r reload   q quit",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
            ),
            _ => {
                let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
                (
                    " Nafta ",
                    Color::DarkGray,
                    vec![
                        Line::from(format!("{spinner} Loading reference data...")),
                        Line::default(),
                        Line::from(Span::styled(
                            self.source.to_string(),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ],
                )
            }
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{LoadError, Resource};
    use crate::tui::components::test_helpers::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn failed() -> LoadStatus {
        LoadStatus::Failed(LoadError::MissingRequiredData {
            resource: Resource::Locations,
            reason: "not found: locations.json".to_string(),
        })
    }

    #[test]
    fn test_keys_only_act_after_failure() {
        let loading = LoadStatus::Loading;
        let mut screen = LoadScreen::new(&loading, "data", 0);
        assert_eq!(screen.handle_event(&TuiEvent::InputChar('r')), None);

        let failed = failed();
        let mut screen = LoadScreen::new(&failed, "data", 0);
        assert_eq!(
            screen.handle_event(&TuiEvent::InputChar('r')),
            Some(LoadScreenEvent::Reload)
        );
        assert_eq!(
            screen.handle_event(&TuiEvent::InputChar('q')),
            Some(LoadScreenEvent::Quit)
        );
        assert_eq!(screen.handle_event(&TuiEvent::CursorDown), None);
    }

    #[test]
    fn test_failure_view_names_the_resource() {
        let failed = failed();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| LoadScreen::new(&failed, "data", 0).render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("could not load locations"));
        assert!(text.contains("r reload"));
    }

    #[test]
    fn test_loading_view_shows_spinner() {
        let loading = LoadStatus::Loading;
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| LoadScreen::new(&loading, "data", 3).render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Loading reference data"));
        assert!(text.contains(SPINNER[3]));
    }
}

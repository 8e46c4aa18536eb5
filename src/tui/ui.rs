//! Screen layout and the per-frame draw.
//!
//! ```text
//! ┌ title bar ─────────────────────────────────────────────┐
//! │ Origin            │ Result                             │
//! │ Destination       │                                    │
//! │ Vehicle           │                                    │
//! │ Trip              │                                    │
//! │ Hours (per hour)  ├────────────────────────────────────┤
//! │ [ Calculate ]     │ Fuel prices                        │
//! ├ banner (when set) ─────────────────────────────────────┤
//! └ key help ──────────────────────────────────────────────┘
//! ```
//!
//! `form_layout` is pure so the event loop can recompute the same geometry
//! for mouse hit testing.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::form::{Field, TripForm};
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::selector_field::{dropdown_area, row_at};
use crate::tui::components::{
    Banner, Dropdown, HoursInput, LoadScreen, PricesPanel, ResultPanel, SelectorField, TitleBar,
    TripToggle, field_border_style,
};

const FIELD_HEIGHT: u16 = 3;
const BANNER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub title: Rect,
    /// Everything between the title bar and the banner/help lines.
    pub body: Rect,
    pub fields: Vec<(Field, Rect)>,
    pub form_error: Rect,
    pub result: Rect,
    pub prices: Rect,
    pub banner: Option<Rect>,
    pub help: Rect,
}

impl FormLayout {
    pub fn field(&self, field: Field) -> Option<Rect> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, rect)| *rect)
    }
}

pub fn form_layout(area: Rect, hours_visible: bool, has_banner: bool, price_rows: u16) -> FormLayout {
    use Constraint::{Length, Min, Percentage};

    let banner_height = if has_banner { BANNER_HEIGHT } else { 0 };
    let [title, body, banner, help] =
        Layout::vertical([Length(1), Min(0), Length(banner_height), Length(1)]).areas(area);
    let [form_column, side_column] =
        Layout::horizontal([Percentage(45), Percentage(55)]).areas(body);

    let mut order = vec![Field::Origin, Field::Destination, Field::Vehicle, Field::TripType];
    if hours_visible {
        order.push(Field::Hours);
    }
    order.push(Field::Calculate);

    let mut constraints: Vec<Constraint> = order.iter().map(|_| Length(FIELD_HEIGHT)).collect();
    constraints.push(Length(1));
    constraints.push(Min(0));
    let rows = Layout::vertical(constraints).split(form_column);

    let fields = order
        .iter()
        .enumerate()
        .map(|(i, field)| (*field, rows[i]))
        .collect();
    let form_error = rows[order.len()];

    let [result, prices] =
        Layout::vertical([Min(0), Length(price_rows + 2)]).areas(side_column);

    FormLayout {
        title,
        body,
        fields,
        form_error,
        result,
        prices,
        banner: has_banner.then_some(banner),
        help,
    }
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A row of the open dropdown (index into the filtered list).
    DropdownRow(Field, usize),
    /// Inside the open dropdown but not on a row (border, "No results").
    DropdownChrome,
    Field(Field),
    Elsewhere,
}

pub fn hit_test(form: &TripForm, layout: &FormLayout, col: u16, row: u16) -> Hit {
    let pos = Position::new(col, row);

    if let Some(open) = form.open_selector()
        && let Some(field_rect) = layout.field(open)
    {
        let (count, highlighted) = selector_rows(form, open);
        let area = dropdown_area(field_rect, count, layout.body);
        if area.contains(pos) {
            return match row_at(area, highlighted, count, col, row) {
                Some(index) => Hit::DropdownRow(open, index),
                None => Hit::DropdownChrome,
            };
        }
    }

    layout
        .fields
        .iter()
        .find(|(_, rect)| rect.contains(pos))
        .map_or(Hit::Elsewhere, |(field, _)| Hit::Field(*field))
}

fn selector_rows(form: &TripForm, field: Field) -> (usize, Option<usize>) {
    match field {
        Field::Origin => (form.origin.filtered_len(), form.origin.highlighted()),
        Field::Destination => (
            form.destination.filtered_len(),
            form.destination.highlighted(),
        ),
        Field::Vehicle => (form.vehicle.filtered_len(), form.vehicle.highlighted()),
        _ => (0, None),
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, spinner_frame: usize) {
    let (Some(form), Some(data)) = (app.form.as_ref(), app.data.as_ref()) else {
        let [title_area, main_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());
        TitleBar::new(app.source.clone(), app.status_message.clone()).render(frame, title_area);
        LoadScreen::new(&app.load, &app.source, spinner_frame).render(frame, main_area);
        return;
    };

    let layout = form_layout(
        frame.area(),
        form.hours_visible(),
        app.banner.is_some(),
        PricesPanel::content_height(&data.prices),
    );

    TitleBar::new(app.source.clone(), app.status_message.clone()).render(frame, layout.title);

    for (field, area) in &layout.fields {
        draw_field(frame, form, *field, *area);
    }

    if let Some(error) = form.form_error() {
        let line = Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, layout.form_error);
    }

    ResultPanel::new(app.result.as_ref()).render(frame, layout.result);
    PricesPanel::new(&data.prices).render(frame, layout.prices);

    if let (Some(message), Some(area)) = (app.banner.as_deref(), layout.banner) {
        Banner::new(message).render(frame, area);
    }

    let help = if form.open_selector().is_some() {
        " ↑↓ move  Enter select  Esc close  type to filter"
    } else {
        " Tab next field  Enter/F5 calculate  ←→ trip type  Ctrl+Q quit"
    };
    frame.render_widget(
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
        layout.help,
    );

    // Drawn last so it overlays the fields below it
    if let Some(open) = form.open_selector()
        && let Some(field_rect) = layout.field(open)
    {
        let (count, _) = selector_rows(form, open);
        let area = dropdown_area(field_rect, count, layout.body);
        match open {
            Field::Origin => Dropdown::new(&form.origin).render(frame, area),
            Field::Destination => Dropdown::new(&form.destination).render(frame, area),
            Field::Vehicle => Dropdown::new(&form.vehicle).render(frame, area),
            _ => {}
        }
    }
}

fn draw_field(frame: &mut Frame, form: &TripForm, field: Field, area: Rect) {
    let focused = form.focus() == field;
    let error = form.field_error(field);
    match field {
        Field::Origin => {
            SelectorField::new(field.label(), &form.origin, focused, error).render(frame, area)
        }
        Field::Destination => {
            SelectorField::new(field.label(), &form.destination, focused, error)
                .render(frame, area)
        }
        Field::Vehicle => {
            SelectorField::new(field.label(), &form.vehicle, focused, error).render(frame, area)
        }
        Field::TripType => TripToggle::new(form.trip_type(), focused).render(frame, area),
        Field::Hours => HoursInput::new(form.hours_text(), focused, error).render(frame, area),
        Field::Calculate => {
            let style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let button = Paragraph::new(Line::from(Span::styled(" Calculate ", style)))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(field_border_style(focused, false)),
                );
            frame.render_widget(button, area);
        }
    }
}

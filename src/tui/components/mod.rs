//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Every component here is a transient render wrapper: it is built each
//! frame from borrowed core state and props, rendered, then dropped. The
//! persistent state (selector query, highlight, committed item, errors) lives
//! in `core::form::TripForm`, so nothing on screen can drift from the model.
//!
//! - `TitleBar`: Top status line with data source and status message
//! - `SelectorField` / `Dropdown`: Type-ahead input box and its candidate list
//! - `TripToggle`: One way / round trip radio pair
//! - `HoursInput`: Hours of use, shown only for per-hour vehicles
//! - `ResultPanel`: The formatted calculation result
//! - `PricesPanel`: Current fuel prices and their provenance
//! - `Banner`: Dismissible calculation error
//! - `LoadScreen`: Loading spinner and fatal load error
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! ResultPanel::new(app.result.as_ref()).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! ResultPanel::default().render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file, shared helpers)
//! ├── title_bar.rs       (Top status line)
//! ├── selector_field.rs  (Input box + dropdown overlay)
//! ├── trip_toggle.rs     (Trip type radio pair)
//! ├── hours_input.rs     (Hours text box)
//! ├── result_panel.rs    (Calculation result)
//! ├── prices_panel.rs    (Fuel price listing)
//! ├── banner.rs          (Dismissible error)
//! └── load_screen.rs     (Loading / load failure)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod banner;
mod hours_input;
pub mod load_screen;
mod prices_panel;
mod result_panel;
pub mod selector_field;
mod title_bar;
mod trip_toggle;

pub use banner::Banner;
pub use hours_input::HoursInput;
pub use load_screen::{LoadScreen, LoadScreenEvent};
pub use prices_panel::PricesPanel;
pub use result_panel::ResultPanel;
pub use selector_field::{Dropdown, SelectorField};
pub use title_bar::TitleBar;
pub use trip_toggle::TripToggle;

/// Border style for a form control given its focus and validity.
pub(crate) fn field_border_style(focused: bool, invalid: bool) -> Style {
    if invalid {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Truncate a string to fit within `max_width` terminal columns, adding "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

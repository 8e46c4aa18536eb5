//! # Actions
//!
//! Everything that can happen in Nafta becomes an `Action`.
//! User presses Tab? That's `Action::FocusNext`.
//! Data arrives? That's `Action::DataLoaded(result)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` telling the adapter what I/O to
//! run next. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::calculator::{CalcError, calculate};
use crate::core::form::Field;
use crate::core::present::present;
use crate::core::selector::SelectorInput;
use crate::core::state::{App, LoadStatus};
use crate::data::{DataSet, LoadError};

#[derive(Debug)]
pub enum Action {
    /// The background load finished.
    DataLoaded(Result<DataSet, LoadError>),
    /// Retry after a failed load.
    Reload,

    FocusNext,
    FocusPrev,
    Focus(Field),
    /// Direct input to one of the three selectors.
    Selector(Field, SelectorInput),
    TypeChar(char),
    Backspace,
    ToggleTripType,

    Submit,
    DismissBanner,
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    LoadData,
}

/// User-facing text for a calculation failure.
fn banner_for(error: &CalcError) -> String {
    match error {
        CalcError::RouteNotFound { .. } => {
            format!("No route available ({error}). Choose a different origin or destination.")
        }
        CalcError::MissingPrice(_) | CalcError::HoursRequired => {
            "Could not calculate the cost. The reference data looks inconsistent.".to_string()
        }
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => return Effect::Quit,

        Action::DataLoaded(Ok(data)) => {
            info!("Data loaded from {}", app.source);
            app.install(data);
        }
        Action::DataLoaded(Err(e)) => {
            warn!("Data load failed: {}", e);
            app.status_message = format!("Failed to load data: {e}");
            app.load = LoadStatus::Failed(e);
            app.data = None;
            app.form = None;
        }
        Action::Reload => {
            if app.is_loading() {
                return Effect::None;
            }
            app.load = LoadStatus::Loading;
            app.status_message = format!("Loading data from {}...", app.source);
            return Effect::LoadData;
        }

        Action::DismissBanner => {
            app.banner = None;
        }

        Action::Submit => submit(app),

        // Everything else edits the form, which only exists once data is ready
        action => {
            let Some(form) = app.form.as_mut() else {
                debug!("Ignoring {:?}: no form yet", action);
                return Effect::None;
            };
            match action {
                Action::FocusNext => form.focus_next(),
                Action::FocusPrev => form.focus_prev(),
                Action::Focus(field) => form.set_focus(field),
                Action::Selector(field, input) => {
                    if let Some(event) = form.selector_input(field, input) {
                        debug!("{:?} selector: {:?}", field, event);
                    }
                }
                Action::TypeChar(c) => form.type_char(c),
                Action::Backspace => form.backspace(),
                Action::ToggleTripType => form.toggle_trip_type(),
                _ => {}
            }
        }
    }
    Effect::None
}

fn submit(app: &mut App) {
    let (Some(form), Some(data)) = (app.form.as_mut(), app.data.as_ref()) else {
        return;
    };

    form.blur();
    app.result = None;

    let Some(request) = form.validate() else {
        debug!("Validation failed: {:?}", form.errors());
        app.status_message = "Fix the highlighted fields".to_string();
        return;
    };

    match calculate(data, &request) {
        Ok(result) => {
            info!(
                "Calculated {} → {} with {}: {:.2} L, total {:.2}",
                request.origin.name,
                request.destination.name,
                request.vehicle.name,
                result.liters,
                result.total_cost
            );
            app.result = Some(present(&result));
            app.banner = None;
            app.status_message = "Cost calculated".to_string();
        }
        Err(e) => {
            warn!("Calculation failed: {}", e);
            app.banner = Some(banner_for(&e));
            app.status_message = "Calculation failed".to_string();
        }
    }
}

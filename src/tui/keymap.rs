//! Translates `TuiEvent`s into core `Action`s for the trip form.
//!
//! Which action a key means depends on where focus is and whether a dropdown
//! is open, so the mapping reads the form but never mutates it.

use crate::core::action::Action;
use crate::core::form::{Field, TripForm};
use crate::core::selector::SelectorInput;
use crate::tui::event::TuiEvent;
use crate::tui::ui::Hit;

/// Actions for a keyboard event while the form is showing.
pub fn key_actions(form: &TripForm, has_banner: bool, event: &TuiEvent) -> Vec<Action> {
    let open = form.open_selector();
    let focus = form.focus();

    let action = match event {
        TuiEvent::ForceQuit => Action::Quit,
        TuiEvent::NextField => Action::FocusNext,
        TuiEvent::PrevField => Action::FocusPrev,
        TuiEvent::Calculate => Action::Submit,
        TuiEvent::InputChar(c) => Action::TypeChar(*c),
        TuiEvent::Backspace => Action::Backspace,

        TuiEvent::Escape => match open {
            Some(field) => Action::Selector(field, SelectorInput::Escape),
            None if has_banner => Action::DismissBanner,
            None => return Vec::new(),
        },

        TuiEvent::CursorUp => match open {
            Some(field) => Action::Selector(field, SelectorInput::ArrowUp),
            None => return Vec::new(),
        },
        TuiEvent::CursorDown => match open {
            Some(field) => Action::Selector(field, SelectorInput::ArrowDown),
            // Down on a closed selector reopens it
            None if focus.is_selector() => Action::Focus(focus),
            None => return Vec::new(),
        },

        TuiEvent::Submit => match open {
            Some(field) => Action::Selector(field, SelectorInput::Enter),
            None => match focus {
                Field::TripType => Action::ToggleTripType,
                field if field.is_selector() => Action::Focus(field),
                _ => Action::Submit,
            },
        },

        TuiEvent::CursorLeft | TuiEvent::CursorRight if focus == Field::TripType => {
            Action::ToggleTripType
        }

        _ => return Vec::new(),
    };
    vec![action]
}

/// Actions for a mouse click that landed on `hit`.
pub fn click_actions(form: &TripForm, hit: Hit) -> Vec<Action> {
    let open = form.open_selector();
    match hit {
        Hit::DropdownRow(field, row) => vec![Action::Selector(field, SelectorInput::Click(row))],
        Hit::DropdownChrome => Vec::new(),
        Hit::Field(field) if Some(field) == open => Vec::new(),
        Hit::Field(Field::TripType) => vec![Action::Focus(Field::TripType), Action::ToggleTripType],
        Hit::Field(Field::Calculate) => vec![Action::Focus(Field::Calculate), Action::Submit],
        Hit::Field(field) => vec![Action::Focus(field)],
        Hit::Elsewhere => match open {
            Some(field) => vec![Action::Selector(field, SelectorInput::ClickOutside)],
            None => Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::update;
    use crate::core::calculator::TripType;
    use crate::core::state::App;
    use crate::test_support::sample_dataset;

    fn ready_app() -> App {
        let mut app = App::new("memory".to_string(), TripType::OneWay);
        update(&mut app, Action::DataLoaded(Ok(sample_dataset())));
        app
    }

    fn press(app: &mut App, event: TuiEvent) {
        let form = app.form.as_ref().unwrap();
        for action in key_actions(form, app.banner.is_some(), &event) {
            update(app, action);
        }
    }

    fn click(app: &mut App, hit: Hit) {
        for action in click_actions(app.form.as_ref().unwrap(), hit) {
            update(app, action);
        }
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_keyboard_only_round_trip_calculation() {
        let mut app = ready_app();
        type_str(&mut app, "base a");
        press(&mut app, TuiEvent::CursorDown);
        press(&mut app, TuiEvent::Submit);
        press(&mut app, TuiEvent::NextField);
        type_str(&mut app, "base b");
        press(&mut app, TuiEvent::CursorDown);
        press(&mut app, TuiEvent::Submit);
        press(&mut app, TuiEvent::NextField);
        type_str(&mut app, "hilux");
        press(&mut app, TuiEvent::CursorDown);
        press(&mut app, TuiEvent::Submit);
        press(&mut app, TuiEvent::NextField);
        press(&mut app, TuiEvent::CursorRight);
        press(&mut app, TuiEvent::Calculate);

        assert_eq!(app.result.as_ref().unwrap().total, "$ 135.000,00");
    }

    #[test]
    fn test_enter_without_highlight_does_not_commit() {
        let mut app = ready_app();
        type_str(&mut app, "base");
        press(&mut app, TuiEvent::Submit);
        let form = app.form.as_ref().unwrap();
        assert!(form.origin.is_open());
        assert!(form.origin.selected().is_none());
    }

    #[test]
    fn test_escape_closes_dropdown_before_dismissing_banner() {
        let mut app = ready_app();
        app.banner = Some("boom".to_string());
        type_str(&mut app, "b");

        press(&mut app, TuiEvent::Escape);
        assert!(app.form.as_ref().unwrap().open_selector().is_none());
        assert!(app.banner.is_some());

        press(&mut app, TuiEvent::Escape);
        assert!(app.banner.is_none());
    }

    #[test]
    fn test_down_reopens_closed_selector() {
        let mut app = ready_app();
        press(&mut app, TuiEvent::CursorDown);
        assert!(app.form.as_ref().unwrap().origin.is_open());
    }

    #[test]
    fn test_click_row_commits_and_click_outside_discards() {
        let mut app = ready_app();
        click(&mut app, Hit::Field(Field::Destination));
        assert_eq!(app.form.as_ref().unwrap().open_selector(), Some(Field::Destination));

        click(&mut app, Hit::DropdownRow(Field::Destination, 2));
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.destination.selected().unwrap().name, "Paraná");
        assert!(form.open_selector().is_none());

        click(&mut app, Hit::Field(Field::Origin));
        type_str(&mut app, "base");
        click(&mut app, Hit::Elsewhere);
        let form = app.form.as_ref().unwrap();
        assert!(form.open_selector().is_none());
        assert!(form.origin.selected().is_none());
    }

    #[test]
    fn test_click_on_open_field_keeps_it_open() {
        let mut app = ready_app();
        click(&mut app, Hit::Field(Field::Origin));
        type_str(&mut app, "pa");
        click(&mut app, Hit::Field(Field::Origin));
        let form = app.form.as_ref().unwrap();
        assert!(form.origin.is_open());
        assert_eq!(form.origin.query(), "pa");
    }

    #[test]
    fn test_click_trip_toggle_and_calculate() {
        let mut app = ready_app();
        click(&mut app, Hit::Field(Field::TripType));
        assert_eq!(app.form.as_ref().unwrap().trip_type(), TripType::RoundTrip);

        click(&mut app, Hit::Field(Field::Calculate));
        // Nothing selected yet, so every selector is flagged
        assert_eq!(app.form.as_ref().unwrap().errors().len(), 3);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let app = ready_app();
        let actions = key_actions(app.form.as_ref().unwrap(), false, &TuiEvent::ForceQuit);
        assert!(matches!(actions.as_slice(), [Action::Quit]));
    }
}

//! # Trip Form
//!
//! Owns the three selectors (origin, destination, vehicle), the trip-type
//! toggle and the hours field, tracks which field has focus, and validates a
//! submission.
//!
//! Validation collects every failure instead of stopping at the first one,
//! so all offending fields are flagged together. Each field error is cleared
//! on its own as soon as that field is corrected.

use std::fmt;
use std::sync::Arc;

use crate::core::calculator::{TripRequest, TripType};
use crate::core::format::{format_number, parse_decimal};
use crate::core::selector::{Selector, SelectorEvent, SelectorInput};
use crate::data::{FuelPrices, Location, Vehicle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Origin,
    Destination,
    Vehicle,
    TripType,
    Hours,
    Calculate,
}

impl Field {
    const ORDER: [Field; 6] = [
        Field::Origin,
        Field::Destination,
        Field::Vehicle,
        Field::TripType,
        Field::Hours,
        Field::Calculate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Origin => "Origin",
            Field::Destination => "Destination",
            Field::Vehicle => "Vehicle",
            Field::TripType => "Trip",
            Field::Hours => "Hours of use",
            Field::Calculate => "Calculate",
        }
    }

    pub fn is_selector(self) -> bool {
        matches!(self, Field::Origin | Field::Destination | Field::Vehicle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    OriginRequired,
    DestinationRequired,
    /// Form-level: not tied to a single field.
    SameOriginDestination,
    VehicleRequired,
    InvalidHours,
}

impl ValidationError {
    /// The field to mark invalid, or `None` for form-level errors.
    pub fn field(self) -> Option<Field> {
        match self {
            ValidationError::OriginRequired => Some(Field::Origin),
            ValidationError::DestinationRequired => Some(Field::Destination),
            ValidationError::SameOriginDestination => None,
            ValidationError::VehicleRequired => Some(Field::Vehicle),
            ValidationError::InvalidHours => Some(Field::Hours),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::OriginRequired => "Select an origin",
            ValidationError::DestinationRequired => "Select a destination",
            ValidationError::SameOriginDestination => {
                "Origin and destination cannot be the same"
            }
            ValidationError::VehicleRequired => "Select a vehicle",
            ValidationError::InvalidHours => "Enter a number of hours greater than zero",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}

fn location_selector(locations: Arc<[Location]>) -> Selector<Location> {
    Selector::new(
        locations,
        Box::new(|l: &Location| l.name.clone()),
        Box::new(|l: &Location| l.place.clone()),
    )
}

fn vehicle_selector(vehicles: Arc<[Vehicle]>, prices: &FuelPrices) -> Selector<Vehicle> {
    let prices = prices.clone();
    Selector::new(
        vehicles,
        Box::new(|v: &Vehicle| v.name.clone()),
        Box::new(move |v: &Vehicle| {
            format!(
                "{} {} · {}",
                format_number(v.consumption, 1),
                v.consumption_type.unit(),
                prices.label(v.fuel_type)
            )
        }),
    )
}

pub struct TripForm {
    pub origin: Selector<Location>,
    pub destination: Selector<Location>,
    pub vehicle: Selector<Vehicle>,
    trip_type: TripType,
    hours: String,
    focus: Field,
    errors: Vec<ValidationError>,
}

impl TripForm {
    pub fn new(
        locations: Arc<[Location]>,
        vehicles: Arc<[Vehicle]>,
        prices: &FuelPrices,
        trip_type: TripType,
    ) -> Self {
        Self {
            origin: location_selector(locations.clone()),
            destination: location_selector(locations),
            vehicle: vehicle_selector(vehicles, prices),
            trip_type,
            hours: String::new(),
            focus: Field::Origin,
            errors: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------------

    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Move focus to `field`. The previously focused selector is closed
    /// without committing; a newly focused selector opens.
    pub fn set_focus(&mut self, field: Field) {
        if field == Field::Hours && !self.hours_visible() {
            return;
        }
        if field != self.focus && self.focus.is_selector() {
            self.selector_input(self.focus, SelectorInput::ClickOutside);
        }
        self.focus = field;
        if field.is_selector() {
            self.selector_input(field, SelectorInput::Focus);
        }
    }

    fn visible_fields(&self) -> Vec<Field> {
        let hours_visible = self.hours_visible();
        Field::ORDER
            .into_iter()
            .filter(|f| *f != Field::Hours || hours_visible)
            .collect()
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: isize) {
        let fields = self.visible_fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let len = fields.len() as isize;
        let next = fields[((current + delta).rem_euclid(len)) as usize];
        self.set_focus(next);
    }

    /// Close whichever selector is open, without committing.
    pub fn blur(&mut self) {
        if self.focus.is_selector() {
            self.selector_input(self.focus, SelectorInput::ClickOutside);
        }
    }

    /// The field whose dropdown is currently open, if any.
    pub fn open_selector(&self) -> Option<Field> {
        [Field::Origin, Field::Destination, Field::Vehicle]
            .into_iter()
            .find(|f| self.selector_is_open(*f))
    }

    pub fn selector_is_open(&self, field: Field) -> bool {
        match field {
            Field::Origin => self.origin.is_open(),
            Field::Destination => self.destination.is_open(),
            Field::Vehicle => self.vehicle.is_open(),
            _ => false,
        }
    }

    // ------------------------------------------------------------------------
    // Selectors
    // ------------------------------------------------------------------------

    /// Route an input to one of the three selectors and react to commits.
    pub fn selector_input(&mut self, field: Field, input: SelectorInput) -> Option<SelectorEvent> {
        let event = match field {
            Field::Origin => self.origin.handle(input),
            Field::Destination => self.destination.handle(input),
            Field::Vehicle => self.vehicle.handle(input),
            _ => None,
        };
        if let Some(SelectorEvent::Committed(_)) = event {
            self.on_committed(field);
        }
        event
    }

    fn on_committed(&mut self, field: Field) {
        self.errors.retain(|e| e.field() != Some(field));
        match field {
            Field::Origin | Field::Destination => {
                self.errors
                    .retain(|e| *e != ValidationError::SameOriginDestination);
            }
            Field::Vehicle => {
                if !self.hours_visible() {
                    self.hours.clear();
                    self.errors.retain(|e| *e != ValidationError::InvalidHours);
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Text entry on the focused field
    // ------------------------------------------------------------------------

    /// A printable character typed while `field` has focus.
    pub fn type_char(&mut self, c: char) {
        match self.focus {
            field if field.is_selector() => {
                if !self.selector_is_open(field) {
                    self.selector_input(field, SelectorInput::Focus);
                }
                let mut query = self.query_of(field).to_string();
                query.push(c);
                self.selector_input(field, SelectorInput::Type(query));
            }
            Field::Hours => self.push_hours_char(c),
            Field::TripType if c == ' ' => self.toggle_trip_type(),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            field if field.is_selector() => {
                if self.selector_is_open(field) {
                    let mut query = self.query_of(field).to_string();
                    query.pop();
                    self.selector_input(field, SelectorInput::Type(query));
                }
            }
            Field::Hours => {
                let mut hours = self.hours.clone();
                hours.pop();
                self.set_hours(hours);
            }
            _ => {}
        }
    }

    fn query_of(&self, field: Field) -> &str {
        match field {
            Field::Origin => self.origin.query(),
            Field::Destination => self.destination.query(),
            Field::Vehicle => self.vehicle.query(),
            _ => "",
        }
    }

    // ------------------------------------------------------------------------
    // Trip type
    // ------------------------------------------------------------------------

    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub fn set_trip_type(&mut self, trip_type: TripType) {
        self.trip_type = trip_type;
    }

    pub fn toggle_trip_type(&mut self) {
        self.trip_type = self.trip_type.toggled();
    }

    // ------------------------------------------------------------------------
    // Hours
    // ------------------------------------------------------------------------

    /// Hours only apply to vehicles that burn fuel per hour of use.
    pub fn hours_visible(&self) -> bool {
        self.vehicle.selected().is_some_and(Vehicle::is_per_hour)
    }

    pub fn hours_text(&self) -> &str {
        &self.hours
    }

    /// Replace the hours text. Ignored while the field is hidden.
    pub fn set_hours(&mut self, text: String) {
        if !self.hours_visible() {
            return;
        }
        self.hours = text;
        self.errors.retain(|e| *e != ValidationError::InvalidHours);
    }

    fn push_hours_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            let mut hours = self.hours.clone();
            hours.push(c);
            self.set_hours(hours);
        }
    }

    fn parsed_hours(&self) -> Option<f64> {
        parse_decimal(&self.hours).filter(|h| *h > 0.0)
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn field_error(&self, field: Field) -> Option<ValidationError> {
        self.errors.iter().copied().find(|e| e.field() == Some(field))
    }

    pub fn form_error(&self) -> Option<ValidationError> {
        self.errors.iter().copied().find(|e| e.field().is_none())
    }

    /// Check every rule and record every failure.
    ///
    /// Returns the request to calculate only when nothing failed.
    pub fn validate(&mut self) -> Option<TripRequest> {
        let mut errors = Vec::new();

        let origin = self.origin.selected();
        let destination = self.destination.selected();
        let vehicle = self.vehicle.selected();

        if origin.is_none() {
            errors.push(ValidationError::OriginRequired);
        }
        if destination.is_none() {
            errors.push(ValidationError::DestinationRequired);
        }
        if let (Some(o), Some(d)) = (origin, destination)
            && o.id == d.id
        {
            errors.push(ValidationError::SameOriginDestination);
        }
        if vehicle.is_none() {
            errors.push(ValidationError::VehicleRequired);
        }

        let hours = match vehicle {
            Some(v) if v.is_per_hour() => {
                let parsed = self.parsed_hours();
                if parsed.is_none() {
                    errors.push(ValidationError::InvalidHours);
                }
                parsed
            }
            _ => None,
        };

        let request = match (origin, destination, vehicle) {
            (Some(o), Some(d), Some(v)) if errors.is_empty() => Some(TripRequest {
                origin: o.clone(),
                destination: d.clone(),
                vehicle: v.clone(),
                trip_type: self.trip_type,
                hours,
            }),
            _ => None,
        };

        self.errors = errors;
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_dataset;

    fn form() -> TripForm {
        let data = sample_dataset();
        TripForm::new(
            data.locations.clone(),
            data.vehicles.clone(),
            &data.prices,
            TripType::default(),
        )
    }

    /// Commit the candidate whose label matches `name` in the given selector.
    fn pick(form: &mut TripForm, field: Field, name: &str) {
        form.set_focus(field);
        form.selector_input(field, SelectorInput::Type(name.to_string()));
        form.selector_input(field, SelectorInput::ArrowDown);
        let event = form.selector_input(field, SelectorInput::Enter);
        assert!(
            matches!(event, Some(SelectorEvent::Committed(_))),
            "could not pick {name}"
        );
    }

    #[test]
    fn test_empty_submission_flags_all_three_fields() {
        let mut f = form();
        assert!(f.validate().is_none());
        assert_eq!(
            f.errors(),
            &[
                ValidationError::OriginRequired,
                ValidationError::DestinationRequired,
                ValidationError::VehicleRequired,
            ]
        );
        assert!(f.field_error(Field::Origin).is_some());
        assert!(f.field_error(Field::Destination).is_some());
        assert!(f.field_error(Field::Vehicle).is_some());
        assert!(f.form_error().is_none());
    }

    #[test]
    fn test_same_origin_destination_is_form_level() {
        let mut f = form();
        pick(&mut f, Field::Origin, "Base A");
        pick(&mut f, Field::Destination, "Base A");

        assert!(f.validate().is_none());
        assert_eq!(
            f.form_error(),
            Some(ValidationError::SameOriginDestination)
        );
        // Vehicle is still reported alongside the form-level error
        assert_eq!(f.field_error(Field::Vehicle), Some(ValidationError::VehicleRequired));
        assert!(f.field_error(Field::Origin).is_none());
    }

    #[test]
    fn test_valid_submission_builds_request() {
        let mut f = form();
        pick(&mut f, Field::Origin, "Base A");
        pick(&mut f, Field::Destination, "Base B");
        pick(&mut f, Field::Vehicle, "Hilux");
        f.set_trip_type(TripType::RoundTrip);

        let request = f.validate().unwrap();
        assert_eq!(request.origin.id, "1");
        assert_eq!(request.destination.id, "2");
        assert_eq!(request.vehicle.id, "pickup");
        assert_eq!(request.trip_type, TripType::RoundTrip);
        assert_eq!(request.hours, None);
        assert!(f.errors().is_empty());
    }

    #[test]
    fn test_hours_visible_only_for_per_hour_vehicle() {
        let mut f = form();
        assert!(!f.hours_visible());

        pick(&mut f, Field::Vehicle, "electrógeno");
        assert!(f.hours_visible());

        f.set_focus(Field::Hours);
        f.type_char('3');
        assert_eq!(f.hours_text(), "3");

        // Switching to a distance-based vehicle hides and clears the hours
        pick(&mut f, Field::Vehicle, "Hilux");
        assert!(!f.hours_visible());
        assert_eq!(f.hours_text(), "");

        f.set_hours("5".into());
        assert_eq!(f.hours_text(), "");
    }

    #[test]
    fn test_per_hour_vehicle_requires_positive_hours() {
        let mut f = form();
        pick(&mut f, Field::Origin, "Base A");
        pick(&mut f, Field::Destination, "Base B");
        pick(&mut f, Field::Vehicle, "electrógeno");

        assert!(f.validate().is_none());
        assert_eq!(f.errors(), &[ValidationError::InvalidHours]);

        f.set_hours("0".into());
        assert!(f.validate().is_none());

        f.set_hours("abc".into());
        assert!(f.validate().is_none());

        f.set_hours("2,5".into());
        let request = f.validate().unwrap();
        assert_eq!(request.hours, Some(2.5));
    }

    #[test]
    fn test_errors_clear_individually() {
        let mut f = form();
        f.validate();
        assert_eq!(f.errors().len(), 3);

        pick(&mut f, Field::Origin, "Base A");
        assert!(f.field_error(Field::Origin).is_none());
        assert!(f.field_error(Field::Destination).is_some());
        assert!(f.field_error(Field::Vehicle).is_some());
    }

    #[test]
    fn test_focus_cycle_skips_hidden_hours() {
        let mut f = form();
        assert_eq!(f.focus(), Field::Origin);
        f.focus_next();
        f.focus_next();
        f.focus_next();
        assert_eq!(f.focus(), Field::TripType);
        f.focus_next();
        assert_eq!(f.focus(), Field::Calculate);
        f.focus_next();
        assert_eq!(f.focus(), Field::Origin);
        f.focus_prev();
        assert_eq!(f.focus(), Field::Calculate);
    }

    #[test]
    fn test_focus_change_discards_open_selector() {
        let mut f = form();
        f.set_focus(Field::Origin);
        assert_eq!(f.open_selector(), Some(Field::Origin));
        f.type_char('p');

        f.focus_next();
        assert!(!f.origin.is_open());
        assert!(f.origin.selected().is_none());
        assert_eq!(f.open_selector(), Some(Field::Destination));
    }

    #[test]
    fn test_typing_reopens_closed_selector() {
        let mut f = form();
        f.set_focus(Field::Origin);
        f.selector_input(Field::Origin, SelectorInput::Escape);
        assert!(!f.origin.is_open());

        f.type_char('b');
        assert!(f.origin.is_open());
        assert_eq!(f.origin.query(), "b");
        f.backspace();
        assert_eq!(f.origin.query(), "");
    }

    #[test]
    fn test_trip_type_toggle_with_space() {
        let mut f = form();
        f.set_focus(Field::TripType);
        f.type_char(' ');
        assert_eq!(f.trip_type(), TripType::RoundTrip);
        f.type_char(' ');
        assert_eq!(f.trip_type(), TripType::OneWay);
    }

    #[test]
    fn test_vehicle_subtitle_describes_consumption() {
        let f = form();
        let pickup = &f.vehicle.candidates()[0];
        assert_eq!(f.vehicle.subtitle_of(pickup), "15,0 L/100km · Gasoil");
    }
}

//! # Result Presenter
//!
//! Turns a `CostResult` into display strings. Nothing here touches the
//! terminal; the TUI result panel just lays these strings out.
//!
//! For `per_hour` vehicles the route and distance are not meaningful, so they
//! show a placeholder and the duration row is replaced by the hours the user
//! entered (doubled on round trips).

use crate::core::calculator::CostResult;
use crate::core::format::{
    format_currency, format_distance, format_duration, format_hours, format_liters, format_number,
};
use crate::data::ConsumptionType;

pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub route: String,
    pub trip: String,
    pub vehicle: String,
    pub distance: String,
    pub duration_label: String,
    pub duration: String,
    pub consumption: String,
    pub liters: String,
    pub unit_price: String,
    pub total: String,
}

pub fn present(result: &CostResult) -> ResultView {
    let request = &result.request;
    let vehicle = &request.vehicle;

    let (route, distance, duration_label, duration) = match vehicle.consumption_type {
        ConsumptionType::Per100Km => (
            format!("{} → {}", request.origin.name, request.destination.name),
            format_distance(result.distance_km),
            "Estimated time".to_string(),
            format_duration(result.duration_seconds),
        ),
        ConsumptionType::PerHour => {
            let hours = request.hours.unwrap_or(0.0) * f64::from(request.trip_type.legs());
            (
                PLACEHOLDER.to_string(),
                PLACEHOLDER.to_string(),
                "Hours (entered, not measured)".to_string(),
                format_hours(hours),
            )
        }
    };

    ResultView {
        route,
        trip: request.trip_type.label().to_string(),
        vehicle: vehicle.name.clone(),
        distance,
        duration_label,
        duration,
        consumption: format!(
            "{} {}",
            format_number(vehicle.consumption, 1),
            vehicle.consumption_type.unit()
        ),
        liters: format_liters(result.liters),
        unit_price: format!("{} / L", format_currency(result.unit_price)),
        total: format_currency(result.total_cost),
    }
}

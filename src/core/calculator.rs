//! # Cost Calculator
//!
//! Pure function from a validated trip request to a cost breakdown.
//!
//! ```text
//! per_100km:  liters = distance_km / 100 × consumption   (distance doubled on round trips)
//! per_hour:   liters = hours × consumption               (liters doubled on round trips)
//! total       = liters × price[fuel_type]
//! ```
//!
//! The result keeps every intermediate value so the presenter never has to
//! recompute anything.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{ConsumptionType, DataSet, FuelType, Location, Vehicle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn toggled(self) -> Self {
        match self {
            TripType::OneWay => TripType::RoundTrip,
            TripType::RoundTrip => TripType::OneWay,
        }
    }

    /// How many times the route is driven.
    pub fn legs(self) -> u32 {
        match self {
            TripType::OneWay => 1,
            TripType::RoundTrip => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TripType::OneWay => "One way",
            TripType::RoundTrip => "Round trip",
        }
    }
}

/// Everything the calculator needs, already validated by the form.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub origin: Location,
    pub destination: Location,
    pub vehicle: Vehicle,
    pub trip_type: TripType,
    /// Hours of operation. Only meaningful for `per_hour` vehicles.
    pub hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostResult {
    pub request: TripRequest,
    /// Already multiplied by the number of legs.
    pub distance_km: f64,
    /// Already multiplied by the number of legs.
    pub duration_seconds: u64,
    pub liters: f64,
    pub unit_price: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    RouteNotFound { origin: String, destination: String },
    MissingPrice(FuelType),
    /// A `per_hour` vehicle reached the calculator without an hour count.
    HoursRequired,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::RouteNotFound {
                origin,
                destination,
            } => write!(f, "no route found from {origin} to {destination}"),
            CalcError::MissingPrice(fuel) => write!(f, "no price available for fuel type {fuel}"),
            CalcError::HoursRequired => write!(f, "hours of use are required for this vehicle"),
        }
    }
}

impl std::error::Error for CalcError {}

pub fn calculate(data: &DataSet, request: &TripRequest) -> Result<CostResult, CalcError> {
    let route = data
        .route(&request.origin.id, &request.destination.id)
        .ok_or_else(|| CalcError::RouteNotFound {
            origin: request.origin.name.clone(),
            destination: request.destination.name.clone(),
        })?;

    let legs = request.trip_type.legs();
    let distance_km = route.distance_km * f64::from(legs);
    let duration_seconds = route.duration_seconds * u64::from(legs);

    let vehicle = &request.vehicle;
    let liters = match vehicle.consumption_type {
        ConsumptionType::Per100Km => distance_km / 100.0 * vehicle.consumption,
        ConsumptionType::PerHour => {
            let hours = request.hours.ok_or(CalcError::HoursRequired)?;
            hours * vehicle.consumption * f64::from(legs)
        }
    };

    let unit_price = data
        .prices
        .price(vehicle.fuel_type)
        .ok_or(CalcError::MissingPrice(vehicle.fuel_type))?;

    Ok(CostResult {
        request: request.clone(),
        distance_km,
        duration_seconds,
        liters,
        unit_price,
        total_cost: liters * unit_price,
    })
}

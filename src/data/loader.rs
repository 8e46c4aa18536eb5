//! Startup load of the four reference resources.
//!
//! All four fetches run concurrently and each is bounded by the same timeout.
//! Vehicles, locations and fuel prices are mandatory: any failure fails the
//! whole load. The route cache is optional: if it is missing, unreachable,
//! malformed or slow, the store starts with an empty cache.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use serde::de::DeserializeOwned;

use super::source::DataSource;
use super::{DataSet, FuelPrices, Location, RouteCache, RoutePolicy, Vehicle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Vehicles,
    Locations,
    FuelPrices,
    Routes,
}

impl Resource {
    pub fn file_name(self) -> &'static str {
        match self {
            Resource::Vehicles => "vehicles.json",
            Resource::Locations => "locations.json",
            Resource::FuelPrices => "fuel_prices.json",
            Resource::Routes => "routes_cache.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Vehicles => "vehicles",
            Resource::Locations => "locations",
            Resource::FuelPrices => "fuel prices",
            Resource::Routes => "route cache",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// A mandatory resource was unreachable or malformed.
    MissingRequiredData { resource: Resource, reason: String },
    /// A mandatory resource did not arrive within the fetch timeout.
    Timeout { resource: Resource, after: Duration },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingRequiredData { resource, reason } => {
                write!(f, "could not load {resource}: {reason}")
            }
            LoadError::Timeout { resource, after } => {
                write!(f, "timed out loading {resource} after {}s", after.as_secs_f32())
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Outcome of one bounded fetch + parse, before deciding whether it is fatal.
enum FetchOutcome<T> {
    Loaded(T),
    Failed(String),
    TimedOut,
}

async fn fetch_json<T: DeserializeOwned>(
    source: &dyn DataSource,
    resource: Resource,
    timeout: Duration,
) -> FetchOutcome<T> {
    let body = match tokio::time::timeout(timeout, source.fetch(resource)).await {
        Err(_) => return FetchOutcome::TimedOut,
        Ok(Err(e)) => return FetchOutcome::Failed(e.to_string()),
        Ok(Ok(body)) => body,
    };
    info!("Fetched {} ({} bytes)", resource, body.len());

    match serde_json::from_str(&body) {
        Ok(value) => FetchOutcome::Loaded(value),
        Err(e) => FetchOutcome::Failed(format!("malformed JSON: {e}")),
    }
}

fn required<T>(
    outcome: FetchOutcome<T>,
    resource: Resource,
    timeout: Duration,
) -> Result<T, LoadError> {
    match outcome {
        FetchOutcome::Loaded(value) => Ok(value),
        FetchOutcome::Failed(reason) => Err(LoadError::MissingRequiredData { resource, reason }),
        FetchOutcome::TimedOut => Err(LoadError::Timeout {
            resource,
            after: timeout,
        }),
    }
}

fn optional_routes(outcome: FetchOutcome<RouteCache>, timeout: Duration) -> RouteCache {
    match outcome {
        FetchOutcome::Loaded(routes) => routes,
        FetchOutcome::Failed(reason) => {
            warn!("Route cache unavailable, continuing without it: {}", reason);
            RouteCache::default()
        }
        FetchOutcome::TimedOut => {
            warn!(
                "Route cache timed out after {}s, continuing without it",
                timeout.as_secs_f32()
            );
            RouteCache::default()
        }
    }
}

fn check_vehicles(vehicles: &[Vehicle]) -> Result<(), LoadError> {
    match vehicles
        .iter()
        .find(|v| !v.consumption.is_finite() || v.consumption <= 0.0)
    {
        Some(bad) => Err(LoadError::MissingRequiredData {
            resource: Resource::Vehicles,
            reason: format!(
                "vehicle {} has invalid consumption {}",
                bad.id, bad.consumption
            ),
        }),
        None => Ok(()),
    }
}

/// Load every resource from `source`.
///
/// Waits for all four fetches to settle before returning, even when a
/// mandatory one has already failed.
pub async fn load(
    source: &dyn DataSource,
    timeout: Duration,
    route_policy: RoutePolicy,
) -> Result<DataSet, LoadError> {
    info!("Loading reference data from {}", source.describe());

    let (vehicles, locations, prices, routes) = tokio::join!(
        fetch_json::<Vec<Vehicle>>(source, Resource::Vehicles, timeout),
        fetch_json::<Vec<Location>>(source, Resource::Locations, timeout),
        fetch_json::<FuelPrices>(source, Resource::FuelPrices, timeout),
        fetch_json::<RouteCache>(source, Resource::Routes, timeout),
    );

    let vehicles = required(vehicles, Resource::Vehicles, timeout)?;
    let locations = required(locations, Resource::Locations, timeout)?;
    let prices = required(prices, Resource::FuelPrices, timeout)?;
    let routes = optional_routes(routes, timeout);

    check_vehicles(&vehicles)?;

    let data = DataSet {
        vehicles: Arc::from(vehicles),
        locations: Arc::from(locations),
        prices,
        routes,
        route_policy,
    };

    for vehicle in data.unpriced_vehicles() {
        warn!(
            "Vehicle {} ({}) uses {} which has no price; calculations for it will fail",
            vehicle.id, vehicle.name, vehicle.fuel_type
        );
    }

    info!(
        "Loaded {} vehicles, {} locations, {} fuel prices, {} cached routes",
        data.vehicles.len(),
        data.locations.len(),
        data.prices.len(),
        data.routes.len()
    );
    Ok(data)
}

//! # Data Store
//!
//! Reference tables loaded once at startup and never mutated afterwards:
//! vehicles, locations, fuel prices and the pre-computed route cache.
//!
//! ```text
//! DataSet
//! ├── vehicles: Arc<[Vehicle]>
//! ├── locations: Arc<[Location]>
//! ├── prices: FuelPrices        // fuel type → price per liter + metadata
//! └── routes: RouteCache        // "<originId>_<destinationId>" → RouteInfo
//! ```
//!
//! Fetching and parsing lives in [`loader`]; where the bytes come from lives
//! in [`source`].

pub mod loader;
pub mod source;

pub use loader::{LoadError, Resource, load};
pub use source::{DataSource, DirSource, FetchError, HttpSource, source_from_str};

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Ids show up as JSON numbers in some tables and strings in others.
/// Both are kept as their string rendering so route keys stay `"1_2"`.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

// ============================================================================
// Locations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ubicacion", default)]
    pub place: String,
    #[serde(rename = "latitud", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

// ============================================================================
// Vehicles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Nafta,
    Ultra,
    InfiniaDiesel,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Nafta, FuelType::Ultra, FuelType::InfiniaDiesel];

    /// Code used as the key in the fuel price table.
    pub fn code(self) -> &'static str {
        match self {
            FuelType::Nafta => "NAFTA",
            FuelType::Ultra => "ULTRA",
            FuelType::InfiniaDiesel => "INFINIA_DIESEL",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    /// Label used when the price table doesn't ship one.
    pub fn default_label(self) -> &'static str {
        match self {
            FuelType::Nafta => "Nafta Super",
            FuelType::Ultra => "Gasoil",
            FuelType::InfiniaDiesel => "Infinia Diesel (Euro)",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionType {
    /// Liters per 100 km travelled.
    #[serde(rename = "per_100km")]
    Per100Km,
    /// Liters per hour of operation (machinery, generators).
    PerHour,
}

impl ConsumptionType {
    pub fn unit(self) -> &'static str {
        match self {
            ConsumptionType::Per100Km => "L/100km",
            ConsumptionType::PerHour => "L/h",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Vehicle {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub fuel_type: FuelType,
    pub consumption: f64,
    pub consumption_type: ConsumptionType,
}

impl Vehicle {
    pub fn is_per_hour(&self) -> bool {
        self.consumption_type == ConsumptionType::PerHour
    }
}

// ============================================================================
// Fuel prices
// ============================================================================

/// Price per liter for each fuel type, plus the metadata the price document carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelPrices {
    prices: BTreeMap<FuelType, f64>,
    labels: HashMap<FuelType, String>,
    pub last_updated: Option<String>,
    pub source: Option<String>,
}

/// On-disk shape: price entries sit next to metadata keys at the top level.
#[derive(Deserialize)]
struct RawFuelPrices {
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(flatten)]
    entries: HashMap<String, serde_json::Value>,
}

impl<'de> Deserialize<'de> for FuelPrices {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawFuelPrices::deserialize(deserializer)?;

        let mut prices = BTreeMap::new();
        for (key, value) in raw.entries {
            match (FuelType::from_code(&key), value.as_f64()) {
                (Some(fuel), Some(price)) => {
                    prices.insert(fuel, price);
                }
                (Some(_), None) => {
                    return Err(serde::de::Error::custom(format!(
                        "price for {key} is not a number"
                    )));
                }
                (None, _) => debug!("Ignoring unknown fuel price key: {}", key),
            }
        }

        let labels = raw
            .labels
            .into_iter()
            .filter_map(|(code, label)| FuelType::from_code(&code).map(|f| (f, label)))
            .collect();

        Ok(FuelPrices {
            prices,
            labels,
            last_updated: raw.last_updated,
            source: raw.source,
        })
    }
}

impl FuelPrices {
    pub fn new(prices: impl IntoIterator<Item = (FuelType, f64)>) -> Self {
        Self {
            prices: prices.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        self.prices.get(&fuel).copied()
    }

    pub fn label(&self, fuel: FuelType) -> &str {
        self.labels
            .get(&fuel)
            .map(String::as_str)
            .unwrap_or_else(|| fuel.default_label())
    }

    /// Price entries only; metadata keys never show up here.
    pub fn iter(&self) -> impl Iterator<Item = (FuelType, f64)> + '_ {
        self.prices.iter().map(|(fuel, price)| (*fuel, *price))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

// ============================================================================
// Route cache
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RouteInfo {
    pub distance_km: f64,
    pub duration_seconds: u64,
}

/// Whether a missing `A_B` entry may be answered with `B_A`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Only the exact `origin_destination` key counts.
    #[default]
    Directional,
    /// Fall back to the reverse key when the forward one is absent.
    Symmetric,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RouteCache {
    routes: HashMap<String, RouteInfo>,
}

impl RouteCache {
    pub fn new(routes: impl IntoIterator<Item = (String, RouteInfo)>) -> Self {
        Self {
            routes: routes.into_iter().collect(),
        }
    }

    pub fn key(origin_id: &str, destination_id: &str) -> String {
        format!("{origin_id}_{destination_id}")
    }

    pub fn lookup(
        &self,
        origin_id: &str,
        destination_id: &str,
        policy: RoutePolicy,
    ) -> Option<RouteInfo> {
        let forward = self.routes.get(&Self::key(origin_id, destination_id));
        match (forward, policy) {
            (Some(route), _) => Some(*route),
            (None, RoutePolicy::Directional) => None,
            (None, RoutePolicy::Symmetric) => self
                .routes
                .get(&Self::key(destination_id, origin_id))
                .copied(),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// ============================================================================
// DataSet
// ============================================================================

/// Everything the calculator needs, read-only after load.
///
/// Candidate lists are `Arc<[T]>` so several selectors can share them.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub vehicles: Arc<[Vehicle]>,
    pub locations: Arc<[Location]>,
    pub prices: FuelPrices,
    pub routes: RouteCache,
    pub route_policy: RoutePolicy,
}

impl DataSet {
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn route(&self, origin_id: &str, destination_id: &str) -> Option<RouteInfo> {
        self.routes.lookup(origin_id, destination_id, self.route_policy)
    }

    /// Vehicles whose fuel type has no price entry. Choosing one fails the calculation.
    pub fn unpriced_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| self.prices.price(v.fuel_type).is_none())
    }
}

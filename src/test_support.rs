//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::data::{
    ConsumptionType, DataSet, DataSource, FetchError, FuelPrices, FuelType, Location, Resource,
    RouteCache, RouteInfo, RoutePolicy, Vehicle,
};

/// An in-memory data source. Resources can be removed or slowed down per test.
pub struct MemorySource {
    files: HashMap<&'static str, String>,
    delays: HashMap<&'static str, Duration>,
}

impl MemorySource {
    pub fn new(files: HashMap<&'static str, String>) -> Self {
        Self {
            files,
            delays: HashMap::new(),
        }
    }

    pub fn without(mut self, resource: Resource) -> Self {
        self.files.remove(resource.file_name());
        self
    }

    pub fn with(mut self, resource: Resource, body: &str) -> Self {
        self.files.insert(resource.file_name(), body.to_string());
        self
    }

    pub fn delayed(mut self, resource: Resource, delay: Duration) -> Self {
        self.delays.insert(resource.file_name(), delay);
        self
    }
}

#[async_trait]
impl DataSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn fetch(&self, resource: Resource) -> Result<String, FetchError> {
        if let Some(delay) = self.delays.get(resource.file_name()) {
            tokio::time::sleep(*delay).await;
        }
        self.files
            .get(resource.file_name())
            .cloned()
            .ok_or_else(|| FetchError::NotFound(resource.file_name().to_string()))
    }
}

/// Raw JSON bodies in the shape the data scripts produce.
pub fn sample_files() -> HashMap<&'static str, String> {
    let mut files = HashMap::new();
    files.insert(
        "vehicles.json",
        r#"[
            {"id": "pickup", "name": "Toyota Hilux", "fuel_type": "ULTRA", "consumption": 15, "consumption_type": "per_100km"},
            {"id": "generator", "name": "Grupo electrógeno", "fuel_type": "ULTRA", "consumption": 8, "consumption_type": "per_hour"}
        ]"#
        .to_string(),
    );
    files.insert(
        "locations.json",
        r#"[
            {"id": 1, "nombre": "Base A", "ubicacion": "Neuquén"},
            {"id": 2, "nombre": "Base B", "ubicacion": "Añelo"},
            {"id": 3, "nombre": "Paraná", "ubicacion": "Entre Ríos"}
        ]"#
        .to_string(),
    );
    files.insert(
        "fuel_prices.json",
        r#"{
            "ULTRA": 900,
            "INFINIA_DIESEL": 1200,
            "last_updated": "2025-01-15",
            "source": "naftas.com.ar",
            "labels": {"ULTRA": "Gasoil", "INFINIA_DIESEL": "Infinia Diesel (Euro)"}
        }"#
        .to_string(),
    );
    files.insert(
        "routes_cache.json",
        r#"{"1_2": {"distance_km": 500, "duration_seconds": 18000}}"#.to_string(),
    );
    files
}

fn location(id: &str, name: &str, place: &str) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        place: place.to_string(),
        latitude: None,
        longitude: None,
    }
}

fn vehicle(
    id: &str,
    name: &str,
    fuel_type: FuelType,
    consumption: f64,
    consumption_type: ConsumptionType,
) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        name: name.to_string(),
        fuel_type,
        consumption,
        consumption_type,
    }
}

/// A small, fully built data set.
///
/// - locations 1 "Base A", 2 "Base B", 3 "Paraná"
/// - route 1 → 2: 500 km, 5 h (directional)
/// - vehicles: pickup (15 L/100km, ULTRA), generator (8 L/h, ULTRA),
///   orphan (NAFTA, which has no price)
/// - prices: ULTRA 900
pub fn sample_dataset() -> DataSet {
    DataSet {
        vehicles: Arc::from(vec![
            vehicle(
                "pickup",
                "Toyota Hilux",
                FuelType::Ultra,
                15.0,
                ConsumptionType::Per100Km,
            ),
            vehicle(
                "generator",
                "Grupo electrógeno",
                FuelType::Ultra,
                8.0,
                ConsumptionType::PerHour,
            ),
            vehicle(
                "orphan",
                "Moto",
                FuelType::Nafta,
                4.0,
                ConsumptionType::Per100Km,
            ),
        ]),
        locations: Arc::from(vec![
            location("1", "Base A", "Neuquén"),
            location("2", "Base B", "Añelo"),
            location("3", "Paraná", "Entre Ríos"),
        ]),
        prices: FuelPrices::new([(FuelType::Ultra, 900.0)]),
        routes: RouteCache::new([(
            RouteCache::key("1", "2"),
            RouteInfo {
                distance_km: 500.0,
                duration_seconds: 18000,
            },
        )]),
        route_policy: RoutePolicy::Directional,
    }
}

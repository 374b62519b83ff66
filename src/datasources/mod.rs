pub mod nominatim;
pub mod postgis;

pub use nominatim::NominatimClient;
pub use postgis::PostGisClient;

use crate::models::{ClimateReading, PlantProfile, UNKNOWN_LOCATION};
use std::future::Future;

/// Climate lookup for one coordinate.
///
/// `None` means "no data here" (ocean, polar gap or an unreachable source).
/// Implementations log infrastructure failures and answer `None`.
pub trait ClimateProvider: Send + Sync {
    fn fetch_climate(
        &self,
        lat: f64,
        lon: f64,
    ) -> impl Future<Output = Option<ClimateReading>> + Send;

    /// Whether the backing source answers at all.
    fn ping(&self) -> impl Future<Output = bool> + Send {
        async { true }
    }
}

pub trait PlantCatalog: Send + Sync {
    fn fetch_plant_profile(&self, name: &str)
        -> impl Future<Output = Option<PlantProfile>> + Send;

    /// Known plant names, sorted.
    fn list_plant_names(&self) -> impl Future<Output = Vec<String>> + Send;

    fn ping(&self) -> impl Future<Output = bool> + Send {
        async { true }
    }
}

pub trait Geocoder: Send + Sync {
    /// Human-readable label for a coordinate, `"Unknown"` when it cannot be
    /// resolved.
    fn reverse_geocode(&self, lat: f64, lon: f64) -> impl Future<Output = String> + Send;

    fn ping(&self) -> impl Future<Output = bool> + Send {
        async { true }
    }
}

/// A disabled geocoder labels everything "Unknown".
impl<G: Geocoder> Geocoder for Option<G> {
    async fn reverse_geocode(&self, lat: f64, lon: f64) -> String {
        match self {
            Some(geocoder) => geocoder.reverse_geocode(lat, lon).await,
            None => UNKNOWN_LOCATION.to_string(),
        }
    }

    async fn ping(&self) -> bool {
        match self {
            Some(geocoder) => geocoder.ping().await,
            None => false,
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory collaborators for service and scanner tests.

    use super::*;
    use std::collections::HashMap;

    /// Climate keyed by rounded coordinate; everything else is ocean.
    #[derive(Default)]
    pub struct MemoryClimate {
        readings: HashMap<(i64, i64), ClimateReading>,
        fallback: Option<ClimateReading>,
    }

    fn key(lat: f64, lon: f64) -> (i64, i64) {
        ((lat * 1000.0).round() as i64, (lon * 1000.0).round() as i64)
    }

    impl MemoryClimate {
        pub fn ocean() -> Self {
            Self::default()
        }

        /// Same reading at every coordinate.
        pub fn everywhere(reading: ClimateReading) -> Self {
            Self {
                readings: HashMap::new(),
                fallback: Some(reading),
            }
        }

        pub fn with(mut self, lat: f64, lon: f64, reading: ClimateReading) -> Self {
            self.readings.insert(key(lat, lon), reading);
            self
        }
    }

    impl ClimateProvider for MemoryClimate {
        async fn fetch_climate(&self, lat: f64, lon: f64) -> Option<ClimateReading> {
            self.readings
                .get(&key(lat, lon))
                .or(self.fallback.as_ref())
                .cloned()
        }
    }

    #[derive(Default)]
    pub struct MemoryCatalog {
        plants: Vec<PlantProfile>,
    }

    impl MemoryCatalog {
        pub fn new(plants: Vec<PlantProfile>) -> Self {
            Self { plants }
        }
    }

    impl PlantCatalog for MemoryCatalog {
        async fn fetch_plant_profile(&self, name: &str) -> Option<PlantProfile> {
            self.plants.iter().find(|p| p.name == name).cloned()
        }

        async fn list_plant_names(&self) -> Vec<String> {
            let mut names: Vec<String> = self.plants.iter().map(|p| p.name.clone()).collect();
            names.sort();
            names
        }
    }

    pub struct FixedLabel(pub &'static str);

    impl Geocoder for FixedLabel {
        async fn reverse_geocode(&self, _lat: f64, _lon: f64) -> String {
            self.0.to_string()
        }
    }
}

use crate::config::{Config, ScanConfig};
use crate::datasources::{ClimateProvider, Geocoder, PlantCatalog};
use crate::error::AnalysisError;
use crate::logic::rules::RulesEngine;
use crate::logic::scanner::{local_grid, Scanner};
use crate::logic::{locations, ranking, seasonal};
use crate::models::{
    AnalysisRequest, PlantProfile, RankedEntry, ScanReport, ScanSample, SuitabilityResult,
};
use serde::Serialize;
use std::sync::Arc;

/// Reachability of each collaborator, for `geoplant check`.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatus {
    pub climate: bool,
    pub plants: bool,
    pub geocoder: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.climate && self.plants && self.geocoder
    }
}

/// The suitability service: single-point analysis, scans and ranking.
///
/// Holds no mutable state; one instance can serve concurrent requests.
pub struct GeoPlant<C, P, G> {
    climate: Arc<C>,
    plants: P,
    geocoder: G,
    engine: Arc<RulesEngine>,
    scan: ScanConfig,
}

impl<C, P, G> GeoPlant<C, P, G>
where
    C: ClimateProvider + 'static,
    P: PlantCatalog,
    G: Geocoder,
{
    pub fn new(climate: Arc<C>, plants: P, geocoder: G, engine: RulesEngine) -> Self {
        Self {
            climate,
            plants,
            geocoder,
            engine: Arc::new(engine),
            scan: ScanConfig::default(),
        }
    }

    pub fn from_config(climate: Arc<C>, plants: P, geocoder: G, config: &Config) -> Self {
        Self::new(climate, plants, geocoder, RulesEngine::from_config(&config.scoring))
            .with_scan_config(config.scan.clone())
    }

    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    pub fn scan_config(&self) -> &ScanConfig {
        &self.scan
    }

    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    /// Score one plant at one coordinate.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<SuitabilityResult, AnalysisError> {
        validate_coordinate(request.lat, request.lon)?;

        let (climate, plant, label) = tokio::join!(
            self.climate.fetch_climate(request.lat, request.lon),
            self.plants.fetch_plant_profile(&request.plant_name),
            self.geocoder.reverse_geocode(request.lat, request.lon),
        );

        let climate = climate.ok_or(AnalysisError::NoClimateData {
            lat: request.lat,
            lon: request.lon,
        })?;
        let plant = plant.ok_or_else(|| AnalysisError::NoPlantData {
            name: request.plant_name.clone(),
        })?;

        let climate = seasonal::adjust(&climate, request.season);
        let result = self
            .engine
            .score(&plant, &climate, request.options())
            .with_location_label(label)
            .with_season(request.season);

        tracing::info!(
            plant = %plant.name,
            lat = request.lat,
            lon = request.lon,
            location = %result.location_label,
            score = result.score,
            status = %result.status,
            "Analysis complete"
        );

        Ok(result)
    }

    /// Scan the configured grid around a coordinate.
    pub async fn scan_region(
        &self,
        plant_name: &str,
        lat: f64,
        lon: f64,
    ) -> Result<ScanReport, AnalysisError> {
        validate_coordinate(lat, lon)?;
        let plant = self.plant(plant_name).await?;
        let points = local_grid(lat, lon, self.scan.grid_size, self.scan.grid_span_deg);
        Ok(self.scanner().scan(&plant, points).await)
    }

    /// Scan the fixed table of country locations.
    pub async fn scan_world(&self, plant_name: &str) -> Result<ScanReport, AnalysisError> {
        let plant = self.plant(plant_name).await?;
        Ok(self.scanner().scan(&plant, locations::world_points()).await)
    }

    /// Top-N view of scan samples, keeping an analyzed location visible.
    pub fn rank(
        &self,
        samples: &[ScanSample],
        anchor: Option<&SuitabilityResult>,
    ) -> Vec<RankedEntry> {
        let anchor = anchor.map(|r| RankedEntry::anchor(r.location_label.clone(), r.score));
        ranking::rank(samples, anchor, self.scan.top_n)
    }

    pub async fn plant_names(&self) -> Vec<String> {
        self.plants.list_plant_names().await
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let (climate, plants, geocoder) = tokio::join!(
            self.climate.ping(),
            self.plants.ping(),
            self.geocoder.ping(),
        );
        ConnectionStatus {
            climate,
            plants,
            geocoder,
        }
    }

    async fn plant(&self, name: &str) -> Result<PlantProfile, AnalysisError> {
        self.plants
            .fetch_plant_profile(name)
            .await
            .ok_or_else(|| AnalysisError::NoPlantData { name: name.into() })
    }

    fn scanner(&self) -> Scanner<C> {
        Scanner::new(
            Arc::clone(&self.climate),
            Arc::clone(&self.engine),
            self.scan.max_concurrency,
        )
    }
}

fn validate_coordinate(lat: f64, lon: f64) -> Result<(), AnalysisError> {
    let valid = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);
    if valid {
        Ok(())
    } else {
        Err(AnalysisError::InvalidCoordinate { lat, lon })
    }
}

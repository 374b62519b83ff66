use crate::config::DatabaseConfig;
use crate::datasources::{ClimateProvider, PlantCatalog};
use crate::error::{GeoPlantError, Result};
use crate::logic::normalize::UnitNormalizer;
use crate::models::{
    ClimateReading, OptimalRange, PlantProfile, RawClimateSample, SiteProperties,
    ToleranceBounds,
};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;

/// Samples all six rasters at one point. Each sub-select yields NULL when the
/// point falls outside that raster's tiles.
const CLIMATE_QUERY: &str = r#"
    WITH pt AS (SELECT ST_SetSRID(ST_Point($1, $2), 4326) AS geom)
    SELECT
        (SELECT ST_Value(r.rast, pt.geom) FROM climate_temp_mean r
            WHERE ST_Intersects(r.rast, pt.geom) LIMIT 1) AS raw_mean,
        (SELECT ST_Value(r.rast, pt.geom) FROM climate_temp_min r
            WHERE ST_Intersects(r.rast, pt.geom) LIMIT 1) AS raw_min,
        (SELECT ST_Value(r.rast, pt.geom) FROM climate_temp_max r
            WHERE ST_Intersects(r.rast, pt.geom) LIMIT 1) AS raw_max,
        (SELECT ST_Value(r.rast, pt.geom) FROM climate_rain r
            WHERE ST_Intersects(r.rast, pt.geom) LIMIT 1) AS raw_rain,
        (SELECT ST_Value(r.rast, pt.geom) FROM climate_rain_driest r
            WHERE ST_Intersects(r.rast, pt.geom) LIMIT 1) AS raw_dry,
        (SELECT ST_Value(r.rast, pt.geom) FROM climate_rain_seasonality r
            WHERE ST_Intersects(r.rast, pt.geom) LIMIT 1) AS raw_season
    FROM pt
"#;

/// Climate rasters and the plant table in one PostGIS database.
#[derive(Clone)]
pub struct PostGisClient {
    pool: PgPool,
    normalizer: UnitNormalizer,
    site: SiteProperties,
}

/// A `plants` row as JSON. The `opt_*` columns only exist in newer tables.
#[derive(Debug, Deserialize)]
struct PlantRow {
    name: String,
    min_temp_c: Option<f64>,
    max_temp_c: Option<f64>,
    min_rain_mm: Option<f64>,
    max_rain_mm: Option<f64>,
    min_ph: Option<f64>,
    max_ph: Option<f64>,
    #[serde(flatten)]
    optimal: OptimalRange,
}

impl PlantRow {
    fn into_profile(self) -> Result<PlantProfile> {
        let missing = |column: &str| {
            GeoPlantError::InvalidData(format!("plant '{}' has no {}", self.name, column))
        };

        let absolute = ToleranceBounds {
            min_temp_c: self.min_temp_c.ok_or_else(|| missing("min_temp_c"))?,
            max_temp_c: self.max_temp_c.ok_or_else(|| missing("max_temp_c"))?,
            min_rain_mm: self.min_rain_mm.ok_or_else(|| missing("min_rain_mm"))?,
            max_rain_mm: self.max_rain_mm.ok_or_else(|| missing("max_rain_mm"))?,
            min_ph: self.min_ph.ok_or_else(|| missing("min_ph"))?,
            max_ph: self.max_ph.ok_or_else(|| missing("max_ph"))?,
        };

        Ok(PlantProfile::new(self.name, absolute).with_optimal(self.optimal))
    }
}

impl PostGisClient {
    pub async fn connect(
        config: &DatabaseConfig,
        normalizer: UnitNormalizer,
        site: SiteProperties,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.connection_string())
            .await
            .map_err(|e| GeoPlantError::DataSourceUnavailable(format!("PostGIS: {}", e)))?;

        tracing::info!(
            host = %config.host,
            database = %config.database,
            "Connected to PostGIS"
        );

        Ok(Self {
            pool,
            normalizer,
            site,
        })
    }

    /// Raw raster values at a point. `None` when no row comes back at all.
    pub async fn fetch_raw(&self, lat: f64, lon: f64) -> Result<Option<RawClimateSample>> {
        let row = sqlx::query(CLIMATE_QUERY)
            .bind(lon)
            .bind(lat)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(RawClimateSample {
            mean: row.try_get::<Option<f64>, _>("raw_mean")?,
            min: row.try_get::<Option<f64>, _>("raw_min")?,
            max: row.try_get::<Option<f64>, _>("raw_max")?,
            rain: row.try_get::<Option<f64>, _>("raw_rain")?,
            driest_rain: row.try_get::<Option<f64>, _>("raw_dry")?,
            seasonality: row.try_get::<Option<f64>, _>("raw_season")?,
        }))
    }

    pub async fn fetch_plant(&self, name: &str) -> Result<Option<PlantProfile>> {
        let row = sqlx::query("SELECT to_jsonb(p)::text AS profile FROM plants p WHERE p.name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let json: String = row.try_get("profile")?;
        let plant: PlantRow = serde_json::from_str(&json)?;
        plant.into_profile().map(Some)
    }

    pub async fn fetch_plant_names(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT name FROM plants WHERE name IS NOT NULL ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(GeoPlantError::from))
            .collect()
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let result = sqlx::query("SELECT 1").fetch_one(&self.pool).await;

        Ok(result.is_ok())
    }
}

impl ClimateProvider for PostGisClient {
    async fn fetch_climate(&self, lat: f64, lon: f64) -> Option<ClimateReading> {
        match self.fetch_raw(lat, lon).await {
            Ok(Some(raw)) => self.normalizer.build_reading(&raw, &self.site),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(lat, lon, error = %e, "Climate lookup failed");
                None
            }
        }
    }

    async fn ping(&self) -> bool {
        self.test_connection().await.unwrap_or(false)
    }
}

impl PlantCatalog for PostGisClient {
    async fn fetch_plant_profile(&self, name: &str) -> Option<PlantProfile> {
        self.fetch_plant(name).await.unwrap_or_else(|e| {
            tracing::warn!(plant = name, error = %e, "Plant lookup failed");
            None
        })
    }

    async fn list_plant_names(&self) -> Vec<String> {
        self.fetch_plant_names().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Listing plants failed");
            Vec::new()
        })
    }

    async fn ping(&self) -> bool {
        self.test_connection().await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_row_without_optimal_columns() {
        let json = r#"{"name": "Tomato", "min_temp_c": 10, "max_temp_c": 25.0,
            "min_rain_mm": 600, "max_rain_mm": 1600, "min_ph": 6.0, "max_ph": 7.5}"#;
        let row: PlantRow = serde_json::from_str(json).unwrap();
        let plant = row.into_profile().unwrap();

        assert_eq!(plant.name, "Tomato");
        assert_eq!(plant.absolute.min_temp_c, 10.0);
        assert_eq!(plant.absolute.max_rain_mm, 1600.0);
        assert!(plant.optimal.is_empty());
    }

    #[test]
    fn plant_row_with_optimal_columns() {
        let json = r#"{"name": "Olive", "min_temp_c": -5, "max_temp_c": 40,
            "min_rain_mm": 300, "max_rain_mm": 1200, "min_ph": 5.5, "max_ph": 8.5,
            "opt_min_temp_c": 15, "opt_max_temp_c": null, "id": 7}"#;
        let row: PlantRow = serde_json::from_str(json).unwrap();
        let plant = row.into_profile().unwrap();

        assert_eq!(plant.optimal.opt_min_temp_c, Some(15.0));
        assert_eq!(plant.optimal.opt_max_temp_c, None);
    }

    #[test]
    fn plant_row_with_null_bound_is_invalid() {
        let json = r#"{"name": "Fern", "min_temp_c": null, "max_temp_c": 20,
            "min_rain_mm": 900, "max_rain_mm": 1900, "min_ph": 5.0, "max_ph": 6.5}"#;
        let row: PlantRow = serde_json::from_str(json).unwrap();
        let err = row.into_profile().unwrap_err();
        assert!(err.to_string().contains("min_temp_c"));
    }
}

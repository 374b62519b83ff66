use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoPlantError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, GeoPlantError>;

/// Expected, recoverable outcomes of querying real-world geography.
///
/// These are returned to callers instead of a result; none of them means the
/// system is broken.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("No climate data at ({lat:.4}, {lon:.4}). Location not found (ocean?) - try another point.")]
    NoClimateData { lat: f64, lon: f64 },

    #[error("Plant data missing for '{name}'. The selection may be stale.")]
    NoPlantData { name: String },

    #[error("Invalid coordinate ({lat}, {lon}): latitude must be within ±90 and longitude within ±180")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

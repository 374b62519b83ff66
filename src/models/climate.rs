use serde::{Deserialize, Serialize};

/// Where the non-climate site properties of a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteDataSource {
    /// Fixed configured values; no soil or sunshine layer is wired up yet.
    Placeholder,
    Measured,
}

impl SiteDataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteDataSource::Placeholder => "Placeholder",
            SiteDataSource::Measured => "Measured",
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        matches!(self, SiteDataSource::Placeholder)
    }
}

impl std::fmt::Display for SiteDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Site properties that do not come from the climate rasters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProperties {
    pub ph: f64,
    pub humidity: f64,
    pub sun_pct: f64,
    pub elevation_m: f64,
    pub source: SiteDataSource,
}

impl SiteProperties {
    pub fn placeholder(ph: f64, humidity: f64, sun_pct: f64, elevation_m: f64) -> Self {
        Self {
            ph,
            humidity,
            sun_pct,
            elevation_m,
            source: SiteDataSource::Placeholder,
        }
    }
}

impl Default for SiteProperties {
    fn default() -> Self {
        Self::placeholder(6.5, 60.0, 80.0, 500.0)
    }
}

/// Raw raster cell values at one coordinate, before unit decoding.
///
/// Each field is `None` when the raster has no pixel there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawClimateSample {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub rain: Option<f64>,
    pub driest_rain: Option<f64>,
    pub seasonality: Option<f64>,
}

/// Normalized climate at one location. Temperatures in °C, rain in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateReading {
    pub mean_temp: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    /// Annual precipitation
    pub rain: f64,
    /// Precipitation of the driest quarter
    pub driest_month_rain: f64,
    /// Precipitation seasonality (coefficient of variation)
    pub seasonality: f64,
    pub site: SiteProperties,
}

impl ClimateReading {
    pub fn is_consistent(&self) -> bool {
        self.min_temp <= self.mean_temp && self.mean_temp <= self.max_temp
    }

    /// Repair readings that break `min <= mean <= max`.
    ///
    /// Swaps an inverted min/max and clamps the mean into the resulting range.
    pub fn validated(mut self) -> Self {
        if self.is_consistent() {
            return self;
        }

        tracing::warn!(
            min = self.min_temp,
            mean = self.mean_temp,
            max = self.max_temp,
            "Inconsistent temperature statistics in climate reading, repairing"
        );

        if self.min_temp > self.max_temp {
            std::mem::swap(&mut self.min_temp, &mut self.max_temp);
        }
        self.mean_temp = self.mean_temp.clamp(self.min_temp, self.max_temp);
        self
    }
}

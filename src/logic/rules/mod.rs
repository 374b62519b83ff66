pub mod cold;
pub mod drought;
pub mod engine;
pub mod heat;
pub mod seasonal_drought;
pub mod soil_ph;
pub mod wet;

pub use engine::{Assessment, RulesEngine};

use crate::models::{ClimateReading, Penalty, ScoringMode, StressCategory, ToleranceBounds};

/// Trait for climate tolerance rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn category(&self) -> StressCategory;

    /// Check the climate against one set of bounds and return the penalty if
    /// the rule is triggered.
    fn evaluate(
        &self,
        climate: &ClimateReading,
        bounds: &ToleranceBounds,
        mode: ScoringMode,
    ) -> Option<Penalty>;
}

/// `amount / bound`, treating a non-positive bound as a full shortfall.
pub(crate) fn fraction_of(amount: f64, bound: f64) -> f64 {
    if bound > 0.0 {
        amount / bound
    } else {
        1.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{ClimateReading, PlantProfile, SiteProperties, ToleranceBounds};

    pub fn bounds() -> ToleranceBounds {
        ToleranceBounds {
            min_temp_c: 5.0,
            max_temp_c: 35.0,
            min_rain_mm: 500.0,
            max_rain_mm: 1500.0,
            min_ph: 5.5,
            max_ph: 7.5,
        }
    }

    pub fn plant() -> PlantProfile {
        PlantProfile::new("Test Crop", bounds())
    }

    /// Comfortable climate for `bounds()`
    pub fn climate() -> ClimateReading {
        ClimateReading {
            mean_temp: 18.0,
            min_temp: 8.0,
            max_temp: 30.0,
            rain: 900.0,
            driest_month_rain: 120.0,
            seasonality: 35.0,
            site: SiteProperties::default(),
        }
    }
}

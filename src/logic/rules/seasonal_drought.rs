use super::{fraction_of, Rule};
use crate::models::{ClimateReading, Penalty, ScoringMode, StressCategory, ToleranceBounds};

/// Plants needing more annual rain than this are sensitive to a dry season.
const THIRSTY_PLANT_MIN_RAIN_MM: f64 = 1000.0;
/// Driest-quarter rain below this is a dry season.
const DRY_SEASON_RAIN_MM: f64 = 40.0;
const STRICT_POINTS: f64 = 25.0;
const MAX_POINTS: f64 = 25.0;

/// Seasonal drought rule - a water-hungry plant faces a dry quarter even when
/// the annual total is adequate.
///
/// Conditions:
/// - Plant minimum rain > 1000mm/year
/// - Rain in the driest quarter < 40mm
///
/// Stays active under irrigation, which only covers the annual shortfall.
pub struct SeasonalDroughtRule;

impl Rule for SeasonalDroughtRule {
    fn id(&self) -> &'static str {
        "seasonal_drought"
    }

    fn name(&self) -> &'static str {
        "Seasonal Drought"
    }

    fn category(&self) -> StressCategory {
        StressCategory::SeasonalDrought
    }

    fn evaluate(
        &self,
        climate: &ClimateReading,
        bounds: &ToleranceBounds,
        mode: ScoringMode,
    ) -> Option<Penalty> {
        if bounds.min_rain_mm <= THIRSTY_PLANT_MIN_RAIN_MM {
            return None;
        }

        let shortfall = DRY_SEASON_RAIN_MM - climate.driest_month_rain.max(0.0);
        if shortfall <= 0.0 {
            return None;
        }

        let proportional =
            (fraction_of(shortfall, DRY_SEASON_RAIN_MM) * MAX_POINTS).min(MAX_POINTS);
        let points = mode.penalty(STRICT_POINTS, proportional);

        Some(Penalty::new(
            self.id(),
            self.category(),
            points,
            format!(
                "🏜️ SEASONAL DROUGHT: Dry season is too dry ({:.0}mm rain in the driest months). Irrigation needed.",
                climate.driest_month_rain
            ),
        ))
    }
}

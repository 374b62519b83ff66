use super::{fraction_of, Rule};
use crate::models::{ClimateReading, Penalty, ScoringMode, StressCategory, ToleranceBounds};

const STRICT_POINTS: f64 = 40.0;
const MAX_POINTS: f64 = 40.0;

/// Annual drought rule - yearly rainfall below the plant's minimum.
///
/// Graduated penalty is the missing share of the minimum, scaled to 40 points.
/// Suppressed when the crop is irrigated.
pub struct DroughtRule;

impl Rule for DroughtRule {
    fn id(&self) -> &'static str {
        "annual_drought"
    }

    fn name(&self) -> &'static str {
        "Annual Drought"
    }

    fn category(&self) -> StressCategory {
        StressCategory::Drought
    }

    fn evaluate(
        &self,
        climate: &ClimateReading,
        bounds: &ToleranceBounds,
        mode: ScoringMode,
    ) -> Option<Penalty> {
        let deficit = bounds.min_rain_mm - climate.rain;
        if deficit <= 0.0 {
            return None;
        }

        let proportional = (fraction_of(deficit, bounds.min_rain_mm) * MAX_POINTS).min(MAX_POINTS);
        let points = mode.penalty(STRICT_POINTS, proportional);

        Some(Penalty::new(
            self.id(),
            self.category(),
            points,
            format!(
                "🌵 ANNUAL DROUGHT: Only {:.0}mm rain/year (needs {:.0}mm).",
                climate.rain, bounds.min_rain_mm
            ),
        ))
    }
}

use super::Rule;
use crate::models::{ClimateReading, Penalty, ScoringMode, StressCategory, ToleranceBounds};

const STRICT_POINTS: f64 = 10.0;
const MAX_POINTS: f64 = 10.0;
const POINTS_PER_UNIT: f64 = 5.0;

/// Soil pH rule - site pH outside the plant's range.
///
/// Only registered when `scoring.include_ph` is set, since site pH is still a
/// placeholder value.
pub struct SoilPhRule;

impl Rule for SoilPhRule {
    fn id(&self) -> &'static str {
        "soil_ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH"
    }

    fn category(&self) -> StressCategory {
        StressCategory::Soil
    }

    fn evaluate(
        &self,
        climate: &ClimateReading,
        bounds: &ToleranceBounds,
        mode: ScoringMode,
    ) -> Option<Penalty> {
        let ph = climate.site.ph;
        let deviation = if ph < bounds.min_ph {
            bounds.min_ph - ph
        } else if ph > bounds.max_ph {
            ph - bounds.max_ph
        } else {
            return None;
        };

        let points = mode.penalty(STRICT_POINTS, (deviation * POINTS_PER_UNIT).min(MAX_POINTS));

        let mut reason = format!(
            "🧪 SOIL pH: {:.1} is outside the {:.1}-{:.1} range.",
            ph, bounds.min_ph, bounds.max_ph
        );
        if climate.site.source.is_low_confidence() {
            reason.push_str(" (placeholder soil data)");
        }

        Some(Penalty::new(self.id(), self.category(), points, reason))
    }
}

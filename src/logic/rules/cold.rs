use super::Rule;
use crate::models::{ClimateReading, Penalty, ScoringMode, StressCategory, ToleranceBounds};

/// Penalty at which cold alone kills the plant.
pub const LETHAL_COLD_PENALTY: f64 = 100.0;

const POINTS_PER_DEGREE: f64 = 10.0;

/// Winter kill rule - the coldest temperature drops below the plant's minimum.
///
/// Strict: any deficit is lethal (score 0, Dead).
/// Graduated: 10 points per degree of deficit, lethal once the penalty
/// reaches 100 (a 10 °C deficit).
pub struct ColdRule;

impl Rule for ColdRule {
    fn id(&self) -> &'static str {
        "cold"
    }

    fn name(&self) -> &'static str {
        "Winter Cold"
    }

    fn category(&self) -> StressCategory {
        StressCategory::Cold
    }

    fn evaluate(
        &self,
        climate: &ClimateReading,
        bounds: &ToleranceBounds,
        mode: ScoringMode,
    ) -> Option<Penalty> {
        let deficit = bounds.min_temp_c - climate.min_temp;
        if deficit <= 0.0 {
            return None;
        }

        let points = mode.penalty(
            LETHAL_COLD_PENALTY,
            (deficit * POINTS_PER_DEGREE).min(LETHAL_COLD_PENALTY),
        );
        let lethal = points >= LETHAL_COLD_PENALTY;

        let reason = if lethal {
            format!(
                "❄️ CRITICAL: Freezing winter ({:.1}°C). Plant dies below {:.1}°C.",
                climate.min_temp, bounds.min_temp_c
            )
        } else {
            format!(
                "❄️ COLD STRESS: Winter low of {:.1}°C is {:.1}°C below the {:.1}°C minimum.",
                climate.min_temp, deficit, bounds.min_temp_c
            )
        };

        Some(Penalty::new(self.id(), self.category(), points, reason).lethal(lethal))
    }
}

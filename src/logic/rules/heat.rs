use super::Rule;
use crate::models::{ClimateReading, Penalty, ScoringMode, StressCategory, ToleranceBounds};

const STRICT_POINTS: f64 = 20.0;
const MAX_POINTS: f64 = 30.0;
const POINTS_PER_DEGREE: f64 = 3.0;

/// Heat stress rule - summer maximum above the plant's limit.
pub struct HeatRule;

impl Rule for HeatRule {
    fn id(&self) -> &'static str {
        "heat_stress"
    }

    fn name(&self) -> &'static str {
        "Heat Stress"
    }

    fn category(&self) -> StressCategory {
        StressCategory::Heat
    }

    fn evaluate(
        &self,
        climate: &ClimateReading,
        bounds: &ToleranceBounds,
        mode: ScoringMode,
    ) -> Option<Penalty> {
        let excess = climate.max_temp - bounds.max_temp_c;
        if excess <= 0.0 {
            return None;
        }

        let points = mode.penalty(STRICT_POINTS, (excess * POINTS_PER_DEGREE).min(MAX_POINTS));

        Some(Penalty::new(
            self.id(),
            self.category(),
            points,
            format!(
                "🔥 HEAT STRESS: Summer hits {:.1}°C (limit {:.1}°C).",
                climate.max_temp, bounds.max_temp_c
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures;

    #[test]
    fn three_points_per_degree() {
        let mut climate = fixtures::climate();
        climate.max_temp = 39.0;
        let penalty = HeatRule
            .evaluate(&climate, &fixtures::bounds(), ScoringMode::Graduated)
            .unwrap();
        assert!((penalty.points - 12.0).abs() < 1e-9);
    }

    #[test]
    fn capped_at_thirty() {
        let mut climate = fixtures::climate();
        climate.max_temp = 60.0;
        let penalty = HeatRule
            .evaluate(&climate, &fixtures::bounds(), ScoringMode::Graduated)
            .unwrap();
        assert_eq!(penalty.points, 30.0);
    }

    #[test]
    fn strict_is_flat() {
        let mut climate = fixtures::climate();
        climate.max_temp = 60.0;
        let penalty = HeatRule
            .evaluate(&climate, &fixtures::bounds(), ScoringMode::Strict)
            .unwrap();
        assert_eq!(penalty.points, 20.0);
    }
}

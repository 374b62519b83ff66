use super::{fraction_of, Rule};
use crate::models::{ClimateReading, Penalty, ScoringMode, StressCategory, ToleranceBounds};

const STRICT_POINTS: f64 = 10.0;
const MAX_POINTS: f64 = 20.0;

/// Waterlogging rule - annual rain above what the plant tolerates.
pub struct WetRule;

impl Rule for WetRule {
    fn id(&self) -> &'static str {
        "waterlogging"
    }

    fn name(&self) -> &'static str {
        "Waterlogging"
    }

    fn category(&self) -> StressCategory {
        StressCategory::Wet
    }

    fn evaluate(
        &self,
        climate: &ClimateReading,
        bounds: &ToleranceBounds,
        mode: ScoringMode,
    ) -> Option<Penalty> {
        let excess = climate.rain - bounds.max_rain_mm;
        if excess <= 0.0 {
            return None;
        }

        let proportional = (fraction_of(excess, bounds.max_rain_mm) * MAX_POINTS).min(MAX_POINTS);
        let points = mode.penalty(STRICT_POINTS, proportional);

        Some(Penalty::new(
            self.id(),
            self.category(),
            points,
            format!(
                "💧 TOO WET: {:.0}mm rain (prefers < {:.0}mm).",
                climate.rain, bounds.max_rain_mm
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::fixtures;

    #[test]
    fn proportional_to_excess() {
        let mut climate = fixtures::climate();
        climate.rain = 2250.0;
        let penalty = WetRule
            .evaluate(&climate, &fixtures::bounds(), ScoringMode::Graduated)
            .unwrap();
        assert!((penalty.points - 10.0).abs() < 1e-9);
    }

    #[test]
    fn capped_at_twenty() {
        let mut climate = fixtures::climate();
        climate.rain = 9000.0;
        let penalty = WetRule
            .evaluate(&climate, &fixtures::bounds(), ScoringMode::Graduated)
            .unwrap();
        assert_eq!(penalty.points, 20.0);
    }

    #[test]
    fn strict_is_flat() {
        let mut climate = fixtures::climate();
        climate.rain = 1501.0;
        let penalty = WetRule
            .evaluate(&climate, &fixtures::bounds(), ScoringMode::Strict)
            .unwrap();
        assert_eq!(penalty.points, 10.0);
    }
}

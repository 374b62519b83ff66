use crate::models::SuitabilityResult;
use serde::Serialize;

const TEMP_RANGE: (f64, f64) = (-10.0, 40.0);
const RAIN_RANGE: (f64, f64) = (0.0, 3000.0);
const PH_RANGE: (f64, f64) = (4.0, 9.0);
const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);

/// One axis of the target-vs-actual view, both sides on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionComparison {
    pub condition: &'static str,
    pub plant_optimum: f64,
    pub local_value: f64,
    /// Positive when the site has more of the condition than the plant wants
    pub difference: f64,
    /// Local side comes from placeholder data
    pub low_confidence: bool,
}

impl ConditionComparison {
    fn new(
        condition: &'static str,
        plant_optimum: f64,
        local_value: f64,
        low_confidence: bool,
    ) -> Self {
        Self {
            condition,
            plant_optimum,
            local_value,
            difference: local_value - plant_optimum,
            low_confidence,
        }
    }
}

/// Scale `value` into 0-100 over `(min, max)`, clamping outliers.
pub fn normalize(value: f64, (min, max): (f64, f64)) -> f64 {
    if max <= min {
        return 50.0;
    }
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

pub fn compare(result: &SuitabilityResult) -> Vec<ConditionComparison> {
    let plant = &result.plant;
    let bounds = plant.bounds_for(result.yield_goal);
    let climate = &result.climate;
    let placeholder = climate.site.source.is_low_confidence();

    vec![
        ConditionComparison::new(
            "Temperature",
            normalize(bounds.temp_midpoint(), TEMP_RANGE),
            normalize(climate.mean_temp, TEMP_RANGE),
            false,
        ),
        ConditionComparison::new(
            "Rainfall",
            normalize(bounds.rain_midpoint(), RAIN_RANGE),
            normalize(climate.rain, RAIN_RANGE),
            false,
        ),
        ConditionComparison::new(
            "Sunlight",
            normalize(plant.sun_need, PERCENT_RANGE),
            normalize(climate.site.sun_pct, PERCENT_RANGE),
            placeholder,
        ),
        ConditionComparison::new(
            "pH",
            normalize(bounds.ph_midpoint(), PH_RANGE),
            normalize(climate.site.ph, PH_RANGE),
            placeholder,
        ),
        ConditionComparison::new(
            "Humidity",
            normalize(plant.ideal_humidity, PERCENT_RANGE),
            normalize(climate.site.humidity, PERCENT_RANGE),
            placeholder,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::{fixtures, RulesEngine};
    use crate::models::ScoringOptions;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn normalize_clamps() {
        assert!(approx(normalize(15.0, TEMP_RANGE), 50.0));
        assert_eq!(normalize(-30.0, TEMP_RANGE), 0.0);
        assert_eq!(normalize(5000.0, RAIN_RANGE), 100.0);
        assert_eq!(normalize(1.0, (5.0, 5.0)), 50.0);
    }

    #[test]
    fn compares_five_conditions() {
        let result = RulesEngine::default().score(
            &fixtures::plant(),
            &fixtures::climate(),
            ScoringOptions::default(),
        );
        let rows = compare(&result);
        let names: Vec<_> = rows.iter().map(|r| r.condition).collect();
        assert_eq!(names, vec!["Temperature", "Rainfall", "Sunlight", "pH", "Humidity"]);

        // Plant wants 20 °C on average, site mean is 18 °C
        let temp = &rows[0];
        assert!(approx(temp.plant_optimum, 60.0));
        assert!(approx(temp.local_value, 56.0));
        assert!(approx(temp.difference, -4.0));
        assert!(!temp.low_confidence);

        // Humidity: plant default 50, placeholder site 60
        let humidity = &rows[4];
        assert!(approx(humidity.difference, 10.0));
        assert!(humidity.low_confidence);
    }
}

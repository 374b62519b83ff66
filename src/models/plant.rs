use serde::{Deserialize, Serialize};

pub const DEFAULT_IDEAL_HUMIDITY: f64 = 50.0;
pub const DEFAULT_SUN_NEED: f64 = 80.0;
pub const DEFAULT_MAX_ELEVATION: f64 = 2000.0;

/// A set of temperature, rain and pH limits the scoring rules check against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBounds {
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub min_rain_mm: f64,
    pub max_rain_mm: f64,
    pub min_ph: f64,
    pub max_ph: f64,
}

impl ToleranceBounds {
    /// Swap any inverted min/max pair.
    fn ordered(mut self) -> Self {
        if self.min_temp_c > self.max_temp_c {
            std::mem::swap(&mut self.min_temp_c, &mut self.max_temp_c);
        }
        if self.min_rain_mm > self.max_rain_mm {
            std::mem::swap(&mut self.min_rain_mm, &mut self.max_rain_mm);
        }
        if self.min_ph > self.max_ph {
            std::mem::swap(&mut self.min_ph, &mut self.max_ph);
        }
        self
    }

    pub fn temp_midpoint(&self) -> f64 {
        (self.min_temp_c + self.max_temp_c) / 2.0
    }

    pub fn rain_midpoint(&self) -> f64 {
        (self.min_rain_mm + self.max_rain_mm) / 2.0
    }

    pub fn ph_midpoint(&self) -> f64 {
        (self.min_ph + self.max_ph) / 2.0
    }
}

/// Commercial-yield sub-range. Absent fields fall back to the absolute bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimalRange {
    pub opt_min_temp_c: Option<f64>,
    pub opt_max_temp_c: Option<f64>,
    pub opt_min_rain_mm: Option<f64>,
    pub opt_max_rain_mm: Option<f64>,
    pub opt_min_ph: Option<f64>,
    pub opt_max_ph: Option<f64>,
}

impl OptimalRange {
    pub fn is_empty(&self) -> bool {
        *self == OptimalRange::default()
    }

    fn narrow(&self, absolute: &ToleranceBounds) -> ToleranceBounds {
        ToleranceBounds {
            min_temp_c: self.opt_min_temp_c.unwrap_or(absolute.min_temp_c),
            max_temp_c: self.opt_max_temp_c.unwrap_or(absolute.max_temp_c),
            min_rain_mm: self.opt_min_rain_mm.unwrap_or(absolute.min_rain_mm),
            max_rain_mm: self.opt_max_rain_mm.unwrap_or(absolute.max_rain_mm),
            min_ph: self.opt_min_ph.unwrap_or(absolute.min_ph),
            max_ph: self.opt_max_ph.unwrap_or(absolute.max_ph),
        }
        .ordered()
    }
}

/// Which set of limits a plant is scored against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldGoal {
    /// Absolute survival limits
    #[default]
    Survival,
    /// Optimal sub-range for commercial yield
    MaxYield,
}

impl YieldGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            YieldGoal::Survival => "Survival",
            YieldGoal::MaxYield => "Max Yield",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "survival" => Some(YieldGoal::Survival),
            "maxyield" | "yield" | "strict" => Some(YieldGoal::MaxYield),
            _ => None,
        }
    }
}

impl std::fmt::Display for YieldGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantProfile {
    pub name: String,
    pub absolute: ToleranceBounds,
    #[serde(default)]
    pub optimal: OptimalRange,
    pub ideal_humidity: f64,
    pub sun_need: f64,
    pub max_elevation: f64,
}

impl PlantProfile {
    pub fn new(name: impl Into<String>, absolute: ToleranceBounds) -> Self {
        Self {
            name: name.into(),
            absolute: absolute.ordered(),
            optimal: OptimalRange::default(),
            ideal_humidity: DEFAULT_IDEAL_HUMIDITY,
            sun_need: DEFAULT_SUN_NEED,
            max_elevation: DEFAULT_MAX_ELEVATION,
        }
    }

    pub fn with_optimal(mut self, optimal: OptimalRange) -> Self {
        self.optimal = optimal;
        self
    }

    pub fn bounds_for(&self, goal: YieldGoal) -> ToleranceBounds {
        match goal {
            YieldGoal::Survival => self.absolute,
            YieldGoal::MaxYield => self.optimal.narrow(&self.absolute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> ToleranceBounds {
        ToleranceBounds {
            min_temp_c: 5.0,
            max_temp_c: 35.0,
            min_rain_mm: 500.0,
            max_rain_mm: 1500.0,
            min_ph: 5.5,
            max_ph: 7.5,
        }
    }

    #[test]
    fn survival_uses_absolute_bounds() {
        let plant = PlantProfile::new("Olive", bounds());
        assert_eq!(plant.bounds_for(YieldGoal::Survival), bounds());
    }

    #[test]
    fn max_yield_falls_back_per_field() {
        let plant = PlantProfile::new("Olive", bounds()).with_optimal(OptimalRange {
            opt_min_temp_c: Some(12.0),
            opt_max_rain_mm: Some(900.0),
            ..Default::default()
        });

        let b = plant.bounds_for(YieldGoal::MaxYield);
        assert_eq!(b.min_temp_c, 12.0);
        assert_eq!(b.max_temp_c, 35.0);
        assert_eq!(b.min_rain_mm, 500.0);
        assert_eq!(b.max_rain_mm, 900.0);
        assert_eq!(b.min_ph, 5.5);
    }

    #[test]
    fn max_yield_without_optimal_equals_survival() {
        let plant = PlantProfile::new("Olive", bounds());
        assert!(plant.optimal.is_empty());
        assert_eq!(
            plant.bounds_for(YieldGoal::MaxYield),
            plant.bounds_for(YieldGoal::Survival)
        );
    }

    #[test]
    fn inverted_bounds_are_reordered() {
        let plant = PlantProfile::new(
            "Odd",
            ToleranceBounds {
                min_temp_c: 30.0,
                max_temp_c: 10.0,
                ..bounds()
            },
        );
        assert_eq!(plant.absolute.min_temp_c, 10.0);
        assert_eq!(plant.absolute.max_temp_c, 30.0);
    }

    #[test]
    fn display_defaults() {
        let plant = PlantProfile::new("Olive", bounds());
        assert_eq!(plant.ideal_humidity, 50.0);
        assert_eq!(plant.sun_need, 80.0);
        assert_eq!(plant.max_elevation, 2000.0);
    }

    #[test]
    fn yield_goal_from_str() {
        assert_eq!(YieldGoal::from_str("survival"), Some(YieldGoal::Survival));
        assert_eq!(YieldGoal::from_str("max-yield"), Some(YieldGoal::MaxYield));
        assert_eq!(YieldGoal::from_str("Max Yield"), Some(YieldGoal::MaxYield));
        assert_eq!(YieldGoal::from_str("strict"), Some(YieldGoal::MaxYield));
        assert_eq!(YieldGoal::from_str("bumper"), None);
    }
}

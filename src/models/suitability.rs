use super::climate::ClimateReading;
use super::plant::{PlantProfile, YieldGoal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Qualitative outcome, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    Ideal,
    Tolerable,
    Stress,
    Risk,
    Dead,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ideal => "Ideal",
            Status::Tolerable => "Tolerable",
            Status::Stress => "Stress",
            Status::Risk => "Risk",
            Status::Dead => "Dead",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Ideal => "✔",
            Status::Tolerable => "~",
            Status::Stress => "⚠",
            Status::Risk => "!",
            Status::Dead => "✖",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of climate stress a rule detects. Variant order is the tie-break order
/// when two penalties are equally large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StressCategory {
    Cold,
    Drought,
    SeasonalDrought,
    Heat,
    Wet,
    Soil,
}

impl StressCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressCategory::Cold => "Cold",
            StressCategory::Drought => "Drought",
            StressCategory::SeasonalDrought => "Seasonal Drought",
            StressCategory::Heat => "Heat",
            StressCategory::Wet => "Waterlogging",
            StressCategory::Soil => "Soil pH",
        }
    }

    /// Annual rain shortfall, the one stress artificial watering removes.
    pub fn is_water_deficit(&self) -> bool {
        matches!(self, StressCategory::Drought)
    }
}

impl std::fmt::Display for StressCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One triggered rule and what it cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub rule_id: String,
    pub category: StressCategory,
    pub points: f64,
    /// Set when the penalty alone kills the plant.
    pub lethal: bool,
    pub reason: String,
}

impl Penalty {
    pub fn new(
        rule_id: &str,
        category: StressCategory,
        points: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            category,
            points,
            lethal: false,
            reason: reason.into(),
        }
    }

    pub fn lethal(mut self, lethal: bool) -> Self {
        self.lethal = lethal;
        self
    }

    pub fn status(&self) -> Status {
        match self.category {
            StressCategory::Cold if self.lethal => Status::Dead,
            StressCategory::Cold | StressCategory::Drought => Status::Risk,
            StressCategory::SeasonalDrought | StressCategory::Heat => Status::Stress,
            StressCategory::Wet | StressCategory::Soil => Status::Tolerable,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterSource {
    #[default]
    Rainfed,
    Irrigated,
}

impl WaterSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterSource::Rainfed => "Rainfed",
            WaterSource::Irrigated => "Irrigated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().trim() {
            "rainfed" | "rain" | "natural" => Some(WaterSource::Rainfed),
            "irrigated" | "irrigation" => Some(WaterSource::Irrigated),
            _ => None,
        }
    }
}

impl std::fmt::Display for WaterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    #[default]
    YearRound,
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::YearRound => "Year Round",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "yearround" | "annual" | "all" => Some(Season::YearRound),
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "autumn" | "fall" => Some(Season::Autumn),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }

    /// Month indices (0 = January) belonging to the season. Empty for `YearRound`.
    pub fn months(&self) -> &'static [usize] {
        match self {
            Season::YearRound => &[],
            Season::Spring => &[2, 3, 4],
            Season::Summer => &[5, 6, 7],
            Season::Autumn => &[8, 9, 10],
            Season::Winter => &[11, 0, 1],
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How triggered rules are combined into a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// First triggered rule wins with a flat penalty; cold kills outright.
    Strict,
    /// Every triggered rule contributes a penalty proportional to the shortfall.
    #[default]
    Graduated,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Strict => "Strict",
            ScoringMode::Graduated => "Graduated",
        }
    }

    /// Pick the strict flat penalty or the graduated proportional one.
    pub fn penalty(&self, flat: f64, proportional: f64) -> f64 {
        match self {
            ScoringMode::Strict => flat,
            ScoringMode::Graduated => proportional,
        }
    }
}

impl std::fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOptions {
    pub water_source: WaterSource,
    pub yield_goal: YieldGoal,
}

impl ScoringOptions {
    pub fn new(water_source: WaterSource, yield_goal: YieldGoal) -> Self {
        Self {
            water_source,
            yield_goal,
        }
    }
}

/// One analysis question from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub plant_name: String,
    pub lat: f64,
    pub lon: f64,
    pub water_source: WaterSource,
    pub yield_goal: YieldGoal,
    pub season: Season,
}

impl AnalysisRequest {
    pub fn new(plant_name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            plant_name: plant_name.into(),
            lat,
            lon,
            water_source: WaterSource::default(),
            yield_goal: YieldGoal::default(),
            season: Season::default(),
        }
    }

    pub fn water_source(mut self, water_source: WaterSource) -> Self {
        self.water_source = water_source;
        self
    }

    pub fn yield_goal(mut self, yield_goal: YieldGoal) -> Self {
        self.yield_goal = yield_goal;
        self
    }

    pub fn season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    pub fn options(&self) -> ScoringOptions {
        ScoringOptions::new(self.water_source, self.yield_goal)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuitabilityResult {
    pub score: u8,
    pub status: Status,
    pub reasons: Vec<String>,
    /// Points gained by irrigating instead of relying on rain
    pub bonus: u8,
    pub penalties: Vec<Penalty>,
    pub climate: ClimateReading,
    pub plant: PlantProfile,
    pub location_label: String,
    pub water_source: WaterSource,
    pub yield_goal: YieldGoal,
    pub season: Season,
    pub analyzed_at: DateTime<Utc>,
}

impl SuitabilityResult {
    pub fn with_location_label(mut self, label: impl Into<String>) -> Self {
        self.location_label = label.into();
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ordering_worst_last() {
        assert!(Status::Dead > Status::Risk);
        assert!(Status::Risk > Status::Stress);
        assert!(Status::Stress > Status::Tolerable);
        assert!(Status::Tolerable > Status::Ideal);
    }

    #[test]
    fn penalty_status_mapping() {
        let cold = Penalty::new("cold", StressCategory::Cold, 70.0, "");
        assert_eq!(cold.status(), Status::Risk);
        assert_eq!(cold.lethal(true).status(), Status::Dead);
        assert_eq!(
            Penalty::new("drought", StressCategory::Drought, 10.0, "").status(),
            Status::Risk
        );
        assert_eq!(
            Penalty::new("heat", StressCategory::Heat, 10.0, "").status(),
            Status::Stress
        );
        assert_eq!(
            Penalty::new("wet", StressCategory::Wet, 10.0, "").status(),
            Status::Tolerable
        );
    }

    #[test]
    fn season_from_str() {
        assert_eq!(Season::from_str("Year Round"), Some(Season::YearRound));
        assert_eq!(Season::from_str("year-round"), Some(Season::YearRound));
        assert_eq!(Season::from_str("fall"), Some(Season::Autumn));
        assert_eq!(Season::from_str("WINTER"), Some(Season::Winter));
        assert_eq!(Season::from_str("monsoon"), None);
    }

    #[test]
    fn winter_wraps_year_boundary() {
        assert_eq!(Season::Winter.months(), &[11, 0, 1]);
        assert!(Season::YearRound.months().is_empty());
    }

    #[test]
    fn water_source_from_str() {
        assert_eq!(WaterSource::from_str("Rainfed"), Some(WaterSource::Rainfed));
        assert_eq!(
            WaterSource::from_str("irrigated"),
            Some(WaterSource::Irrigated)
        );
        assert_eq!(WaterSource::from_str("hose"), None);
    }

    #[test]
    fn only_drought_categories_are_water_deficits() {
        assert!(StressCategory::Drought.is_water_deficit());
        assert!(!StressCategory::SeasonalDrought.is_water_deficit());
        assert!(!StressCategory::Cold.is_water_deficit());
        assert!(!StressCategory::Wet.is_water_deficit());
    }
}

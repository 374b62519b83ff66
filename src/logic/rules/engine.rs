use super::{
    cold::ColdRule, drought::DroughtRule, heat::HeatRule, seasonal_drought::SeasonalDroughtRule,
    soil_ph::SoilPhRule, wet::WetRule, Rule,
};
use crate::config::ScoringConfig;
use crate::models::{
    ClimateReading, Penalty, PlantProfile, ScoringMode, ScoringOptions, Season, Status,
    SuitabilityResult, ToleranceBounds, WaterSource, UNKNOWN_LOCATION,
};
use chrono::Utc;

/// Score and status produced by one pass of the rules over one bound set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub score: u8,
    pub status: Status,
    pub penalties: Vec<Penalty>,
}

impl Assessment {
    fn from_penalties(penalties: Vec<Penalty>) -> Self {
        let total: f64 = penalties.iter().map(|p| p.points).sum();
        let score = (100.0 - total).round().clamp(0.0, 100.0) as u8;

        // Largest penalty decides the status; the earlier rule wins a tie.
        let dominant = penalties.iter().fold(None::<&Penalty>, |best, p| match best {
            Some(b) if b.points >= p.points => Some(b),
            _ => Some(p),
        });

        let status = if penalties.iter().any(|p| p.lethal) {
            Status::Dead
        } else {
            dominant.map(Penalty::status).unwrap_or(Status::Ideal)
        };

        Self {
            score,
            status,
            penalties,
        }
    }
}

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
    mode: ScoringMode,
}

impl RulesEngine {
    /// Rules in evaluation order; strict mode stops at the first one that fires.
    pub fn new(mode: ScoringMode) -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(ColdRule),
            Box::new(DroughtRule),
            Box::new(SeasonalDroughtRule),
            Box::new(HeatRule),
            Box::new(WetRule),
        ];

        Self { rules, mode }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        let engine = Self::new(config.mode);
        if config.include_ph {
            engine.with_ph()
        } else {
            engine
        }
    }

    pub fn with_ph(mut self) -> Self {
        self.rules.push(Box::new(SoilPhRule));
        self
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Run the rules once. Irrigation removes the annual drought rule.
    pub fn evaluate(
        &self,
        climate: &ClimateReading,
        bounds: &ToleranceBounds,
        water_source: WaterSource,
    ) -> Assessment {
        let mut active = self.rules.iter().filter(|rule| {
            !(water_source == WaterSource::Irrigated && rule.category().is_water_deficit())
        });

        let penalties: Vec<Penalty> = match self.mode {
            ScoringMode::Strict => active
                .find_map(|rule| rule.evaluate(climate, bounds, self.mode))
                .into_iter()
                .collect(),
            ScoringMode::Graduated => active
                .filter_map(|rule| rule.evaluate(climate, bounds, self.mode))
                .collect(),
        };

        Assessment::from_penalties(penalties)
    }

    /// Score a plant against a climate for one water-source/yield-goal choice.
    ///
    /// The rainfed score is always computed; an irrigated request reports the
    /// irrigated score plus the points irrigation recovers.
    pub fn score(
        &self,
        plant: &PlantProfile,
        climate: &ClimateReading,
        options: ScoringOptions,
    ) -> SuitabilityResult {
        let bounds = plant.bounds_for(options.yield_goal);
        let rainfed = self.evaluate(climate, &bounds, WaterSource::Rainfed);

        let (assessment, bonus) = match options.water_source {
            WaterSource::Rainfed => (rainfed, 0),
            WaterSource::Irrigated => {
                let irrigated = self.evaluate(climate, &bounds, WaterSource::Irrigated);
                let bonus = irrigated.score.saturating_sub(rainfed.score);
                (irrigated, bonus)
            }
        };

        let mut reasons: Vec<String> = assessment
            .penalties
            .iter()
            .map(|p| p.reason.clone())
            .collect();

        if bonus > 0 {
            reasons.push(format!(
                "🚿 IRRIGATION: Artificial watering recovers {} points (rainfed score {}).",
                bonus,
                assessment.score - bonus
            ));
        }

        tracing::debug!(
            plant = %plant.name,
            score = assessment.score,
            status = %assessment.status,
            bonus,
            mode = %self.mode,
            "Scored plant"
        );

        SuitabilityResult {
            score: assessment.score,
            status: assessment.status,
            reasons,
            bonus,
            penalties: assessment.penalties,
            climate: climate.clone(),
            plant: plant.clone(),
            location_label: UNKNOWN_LOCATION.to_string(),
            water_source: options.water_source,
            yield_goal: options.yield_goal,
            season: Season::YearRound,
            analyzed_at: Utc::now(),
        }
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new(ScoringMode::default())
    }
}

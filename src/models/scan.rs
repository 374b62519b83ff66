use super::suitability::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A coordinate to sample, with the id it is reported under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub location_id: String,
    pub lat: f64,
    pub lon: f64,
}

impl SamplePoint {
    pub fn new(location_id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            location_id: location_id.into(),
            lat,
            lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSample {
    pub location_id: String,
    pub lat: f64,
    pub lon: f64,
    pub score: u8,
    pub status: Status,
}

/// Outcome of one scan. Locations without climate data are counted in
/// `skipped` rather than reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub samples: Vec<ScanSample>,
    pub skipped: usize,
    pub generated_at: DateTime<Utc>,
}

impl ScanReport {
    pub fn new(samples: Vec<ScanSample>, skipped: usize) -> Self {
        Self {
            samples,
            skipped,
            generated_at: Utc::now(),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.skipped > 0
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub score: u8,
    #[serde(default)]
    pub is_anchor: bool,
}

impl RankedEntry {
    pub fn new(label: impl Into<String>, score: u8) -> Self {
        Self {
            label: label.into(),
            score,
            is_anchor: false,
        }
    }

    pub fn anchor(label: impl Into<String>, score: u8) -> Self {
        Self {
            label: label.into(),
            score,
            is_anchor: true,
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

impl From<&ScanSample> for RankedEntry {
    fn from(sample: &ScanSample) -> Self {
        RankedEntry::new(sample.location_id.clone(), sample.score)
    }
}

/// Legend buckets used by the suitability map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Poor => "Poor",
            ScoreBand::Fair => "Fair",
            ScoreBand::Good => "Good",
            ScoreBand::Excellent => "Excellent",
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            ScoreBand::Poor => "0-39",
            ScoreBand::Fair => "40-59",
            ScoreBand::Good => "60-79",
            ScoreBand::Excellent => "80-100",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_band_edges() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(39), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Poor);
    }

    #[test]
    fn ranked_entry_from_sample() {
        let sample = ScanSample {
            location_id: "Spain".into(),
            lat: 40.4,
            lon: -3.7,
            score: 88,
            status: Status::Ideal,
        };
        let entry = RankedEntry::from(&sample);
        assert_eq!(entry.label, "Spain");
        assert_eq!(entry.score, 88);
        assert!(!entry.is_anchor);
    }

    #[test]
    fn report_partial_flag() {
        let report = ScanReport::new(Vec::new(), 3);
        assert!(report.is_empty());
        assert!(report.is_partial());
        assert!(!ScanReport::new(Vec::new(), 0).is_partial());
    }
}

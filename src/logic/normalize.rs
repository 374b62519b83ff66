//! Decoding of raw climate raster cells into physical units.
//!
//! Gridded climate products store scaled integers whose encoding depends on
//! the dataset (Kelvin ×10, °C ×10, tenths of a millimetre). The heuristics
//! below pick a decoding from the magnitude of the raw value; the cut-offs are
//! configurable so they can be matched to the documented encoding of the
//! rasters actually loaded.

use crate::error::{GeoPlantError, Result};
use crate::models::{ClimateReading, RawClimateSample, SiteProperties};
use serde::{Deserialize, Serialize};

const ABSOLUTE_ZERO_C: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DecodingThresholds {
    /// Raw temperatures above this are Kelvin ×10
    #[serde(default = "default_kelvin_tenths_above")]
    pub kelvin_tenths_above: f64,
    /// Raw temperatures above this (and not above the previous cut-off) are Kelvin
    #[serde(default = "default_kelvin_above")]
    pub kelvin_above: f64,
    /// Raw rain totals above this are tenths of a millimetre
    #[serde(default = "default_rain_tenths_above")]
    pub rain_tenths_above: f64,
}

fn default_kelvin_tenths_above() -> f64 {
    1000.0
}

fn default_kelvin_above() -> f64 {
    100.0
}

fn default_rain_tenths_above() -> f64 {
    5000.0
}

impl Default for DecodingThresholds {
    fn default() -> Self {
        Self {
            kelvin_tenths_above: default_kelvin_tenths_above(),
            kelvin_above: default_kelvin_above(),
            rain_tenths_above: default_rain_tenths_above(),
        }
    }
}

impl DecodingThresholds {
    pub fn validate(&self) -> Result<()> {
        if self.kelvin_above >= self.kelvin_tenths_above {
            return Err(GeoPlantError::Config(format!(
                "decoding.kelvin_above ({}) must be below decoding.kelvin_tenths_above ({})",
                self.kelvin_above, self.kelvin_tenths_above
            )));
        }
        if self.rain_tenths_above <= 0.0 {
            return Err(GeoPlantError::Config(
                "decoding.rain_tenths_above must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnitNormalizer {
    thresholds: DecodingThresholds,
}

impl UnitNormalizer {
    pub fn new(thresholds: DecodingThresholds) -> Self {
        Self { thresholds }
    }

    /// Raw temperature cell -> °C. Missing cells decode to 0.
    pub fn normalize_temperature(&self, raw: Option<f64>) -> f64 {
        let Some(raw) = raw else {
            return 0.0;
        };

        if raw > self.thresholds.kelvin_tenths_above {
            raw / 10.0 - ABSOLUTE_ZERO_C
        } else if raw > self.thresholds.kelvin_above {
            raw - ABSOLUTE_ZERO_C
        } else {
            raw / 10.0
        }
    }

    /// Raw precipitation cell -> mm. Missing cells decode to 0.
    pub fn normalize_rain(&self, raw: Option<f64>) -> f64 {
        match raw {
            Some(raw) if raw > self.thresholds.rain_tenths_above => raw / 10.0,
            Some(raw) => raw,
            None => 0.0,
        }
    }

    /// Build a reading from one raster sample.
    ///
    /// A missing mean-temperature cell means the coordinate is outside the
    /// rasters (ocean, polar gap) and yields `None`. Other missing cells decode
    /// to 0 like any other value.
    pub fn build_reading(
        &self,
        raw: &RawClimateSample,
        site: &SiteProperties,
    ) -> Option<ClimateReading> {
        raw.mean?;

        let reading = ClimateReading {
            mean_temp: round_tenth(self.normalize_temperature(raw.mean)),
            min_temp: round_tenth(self.normalize_temperature(raw.min)),
            max_temp: round_tenth(self.normalize_temperature(raw.max)),
            rain: self.normalize_rain(raw.rain).trunc(),
            driest_month_rain: self.normalize_rain(raw.driest_rain).trunc(),
            seasonality: raw.seasonality.unwrap_or(0.0).trunc(),
            site: site.clone(),
        };

        Some(reading.validated())
    }
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> UnitNormalizer {
        UnitNormalizer::default()
    }

    #[test]
    fn kelvin_tenths_are_decoded() {
        // 2931 = 293.1 K = 19.95 °C
        let c = normalizer().normalize_temperature(Some(2931.0));
        assert!((c - 19.95).abs() < 1e-9);
    }

    #[test]
    fn plain_kelvin_is_decoded() {
        let c = normalizer().normalize_temperature(Some(283.15));
        assert!((c - 10.0).abs() < 1e-9);
    }

    #[test]
    fn celsius_tenths_are_decoded() {
        assert!((normalizer().normalize_temperature(Some(85.0)) - 8.5).abs() < 1e-9);
        assert!((normalizer().normalize_temperature(Some(-152.0)) - -15.2).abs() < 1e-9);
    }

    #[test]
    fn missing_values_decode_to_zero() {
        assert_eq!(normalizer().normalize_temperature(None), 0.0);
        assert_eq!(normalizer().normalize_rain(None), 0.0);
    }

    #[test]
    fn rain_tenths_are_scaled() {
        assert_eq!(normalizer().normalize_rain(Some(12000.0)), 1200.0);
        assert_eq!(normalizer().normalize_rain(Some(5000.0)), 5000.0);
        assert_eq!(normalizer().normalize_rain(Some(640.0)), 640.0);
    }

    #[test]
    fn custom_thresholds_change_decoding() {
        let normalizer = UnitNormalizer::new(DecodingThresholds {
            kelvin_tenths_above: 2000.0,
            kelvin_above: 150.0,
            rain_tenths_above: 20000.0,
        });
        // 1200 is no longer Kelvin ×10 but plain Kelvin
        assert!((normalizer.normalize_temperature(Some(1200.0)) - 926.85).abs() < 1e-9);
        assert_eq!(normalizer.normalize_rain(Some(12000.0)), 12000.0);
    }

    #[test]
    fn thresholds_must_be_ordered() {
        let bad = DecodingThresholds {
            kelvin_tenths_above: 100.0,
            kelvin_above: 1000.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        assert!(DecodingThresholds::default().validate().is_ok());
    }

    #[test]
    fn missing_mean_is_no_data() {
        let raw = RawClimateSample {
            mean: None,
            min: Some(-20.0),
            ..Default::default()
        };
        assert!(normalizer()
            .build_reading(&raw, &SiteProperties::default())
            .is_none());
    }

    #[test]
    fn builds_rounded_reading() {
        let raw = RawClimateSample {
            mean: Some(2831.4),
            min: Some(2703.3),
            max: Some(2992.6),
            rain: Some(10456.0),
            driest_rain: Some(150.7),
            seasonality: Some(42.9),
        };
        let reading = normalizer()
            .build_reading(&raw, &SiteProperties::default())
            .unwrap();

        assert_eq!(reading.mean_temp, 10.0);
        assert_eq!(reading.min_temp, -2.8);
        assert_eq!(reading.max_temp, 26.1);
        assert_eq!(reading.rain, 1045.0);
        assert_eq!(reading.driest_month_rain, 150.0);
        assert_eq!(reading.seasonality, 42.0);
        assert!(reading.site.source.is_low_confidence());
    }

    #[test]
    fn zero_rain_is_a_reading_not_missing_data() {
        let raw = RawClimateSample {
            mean: Some(25.0),
            min: Some(10.0),
            max: Some(40.0),
            rain: Some(0.0),
            ..Default::default()
        };
        let reading = normalizer()
            .build_reading(&raw, &SiteProperties::default())
            .unwrap();
        assert_eq!(reading.rain, 0.0);
    }
}

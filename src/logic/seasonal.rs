//! Season windowing of annual climate readings.
//!
//! The rasters only carry annual statistics, so monthly temperatures are
//! modelled as a pure sinusoid between the annual minimum (January) and
//! maximum (July). This is an approximation, not measured monthly data: it
//! ignores hemisphere, continentality and lag, and should be replaced once
//! monthly rasters are loaded.

use crate::logic::normalize::round_tenth;
use crate::models::{ClimateReading, Season};
use std::f64::consts::PI;

/// Modelled mean temperature for each month, index 0 = January.
pub fn monthly_curve(climate: &ClimateReading) -> [f64; 12] {
    let mean = (climate.max_temp + climate.min_temp) / 2.0;
    let amplitude = (climate.max_temp - climate.min_temp) / 2.0;

    let mut months = [0.0; 12];
    for (month, temp) in months.iter_mut().enumerate() {
        *temp = mean - amplitude * (month as f64 * 2.0 * PI / 12.0).cos();
    }
    months
}

/// Narrow an annual reading to the temperature extremes of one season.
///
/// Only `min_temp` and `max_temp` change. The mean, rain, seasonality and site
/// properties are annual figures and pass through, so the annual mean may sit
/// outside the season's window.
pub fn adjust(climate: &ClimateReading, season: Season) -> ClimateReading {
    let months = season.months();
    if months.is_empty() {
        return climate.clone();
    }

    let curve = monthly_curve(climate);
    let temps = months.iter().map(|&m| curve[m]);

    let min = temps.clone().fold(f64::INFINITY, f64::min);
    let max = temps.fold(f64::NEG_INFINITY, f64::max);

    ClimateReading {
        min_temp: round_tenth(min),
        max_temp: round_tenth(max),
        ..climate.clone()
    }
}

use geoplant::logic::comparison::ConditionComparison;
use geoplant::logic::{ConnectionStatus, RulesEngine};
use geoplant::models::{RankedEntry, ScanReport, ScoreBand, SuitabilityResult};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

fn bar(score: u8) -> String {
    let filled = usize::from(score.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn ok(flag: bool) -> &'static str {
    if flag {
        "OK"
    } else {
        "OFFLINE"
    }
}

pub fn format_result(result: &SuitabilityResult) -> String {
    let mut out = String::new();
    let band = ScoreBand::from_score(result.score);
    let c = &result.climate;

    let _ = writeln!(out, "{} @ {}", result.plant.name, result.location_label);
    let _ = writeln!(
        out,
        "  Score   {:>3}/100 {} {} ({})",
        result.score,
        bar(result.score),
        band.as_str(),
        band.range()
    );
    let _ = writeln!(
        out,
        "  Status  {} {}",
        result.status.symbol(),
        result.status
    );
    let _ = writeln!(
        out,
        "  Policy  {} / {} / {}",
        result.water_source, result.yield_goal, result.season
    );
    if result.bonus > 0 {
        let _ = writeln!(out, "  Irrigation bonus  +{}", result.bonus);
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Climate  mean {:.1}°C  min {:.1}°C  max {:.1}°C",
        c.mean_temp, c.min_temp, c.max_temp
    );
    let _ = writeln!(
        out,
        "           rain {:.0} mm  driest quarter {:.0} mm  seasonality {:.0}",
        c.rain, c.driest_month_rain, c.seasonality
    );
    if c.site.source.is_low_confidence() {
        let _ = writeln!(
            out,
            "  Site     pH {:.1}, humidity {:.0}%, sun {:.0}% ({} values)",
            c.site.ph, c.site.humidity, c.site.sun_pct, c.site.source
        );
    }

    let _ = writeln!(out);
    if result.reasons.is_empty() {
        let _ = writeln!(out, "  ✅ No climate limits exceeded.");
    } else {
        for reason in &result.reasons {
            let _ = writeln!(out, "  {}", reason);
        }
    }
    out
}

pub fn format_comparison(rows: &[ConditionComparison]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<12} {:>8} {:>8} {:>8}",
        "Condition", "Plant", "Local", "Diff"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<12} {:>8.0} {:>8.0} {:>+8.0}{}",
            row.condition,
            row.plant_optimum,
            row.local_value,
            row.difference,
            if row.low_confidence { "  *" } else { "" }
        );
    }
    if rows.iter().any(|r| r.low_confidence) {
        let _ = writeln!(out, "  * placeholder site data");
    }
    out
}

pub fn format_ranking(report: &ScanReport, ranked: &[RankedEntry]) -> String {
    let mut out = String::new();

    if report.is_empty() {
        let _ = writeln!(
            out,
            "  No location in this scan has climate data ({} skipped).",
            report.skipped
        );
        return out;
    }

    for (i, entry) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<24} {:>3} {} {}{}",
            i + 1,
            entry.label,
            entry.score,
            bar(entry.score),
            entry.band().as_str(),
            if entry.is_anchor { "  ◀ selected" } else { "" }
        );
    }

    if report.is_partial() {
        let _ = writeln!(
            out,
            "  {} locations scored, {} skipped (no climate data)",
            report.samples.len(),
            report.skipped
        );
    } else {
        let _ = writeln!(out, "  {} locations scored", report.samples.len());
    }
    out
}

pub fn format_connections(status: &ConnectionStatus, geocoder_enabled: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Climate rasters  {}", ok(status.climate));
    let _ = writeln!(out, "  Plant table      {}", ok(status.plants));
    if geocoder_enabled {
        let _ = writeln!(out, "  Geocoder         {}", ok(status.geocoder));
    } else {
        let _ = writeln!(out, "  Geocoder         disabled");
    }
    out
}

pub fn format_rules(engine: &RulesEngine) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Scoring mode     {}", engine.mode());
    for (id, name) in engine.list_rules() {
        let _ = writeln!(out, "    {:<18} {}", id, name);
    }
    out
}

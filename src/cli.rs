use clap::{Args, Parser, Subcommand};
use geoplant::models::{Season, WaterSource, YieldGoal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "geoplant",
    version,
    about = "Plant/climate suitability scoring over PostGIS climate rasters"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one plant at one coordinate
    Analyze(AnalyzeArgs),
    /// Score a plant over a grid around a coordinate
    ScanRegion(ScanRegionArgs),
    /// Score a plant at a fixed set of countries
    ScanWorld(ScanWorldArgs),
    /// List known plants
    Plants,
    /// Validate config and test connections
    Check,
    /// Re-run interactive setup
    Init,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[arg(short, long)]
    pub plant: String,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// rainfed | irrigated
    #[arg(long, default_value = "rainfed", value_parser = parse_water)]
    pub water: WaterSource,

    /// survival | max-yield
    #[arg(long, default_value = "survival", value_parser = parse_goal)]
    pub goal: YieldGoal,

    /// year-round | spring | summer | autumn | winter
    #[arg(long, default_value = "year-round", value_parser = parse_season)]
    pub season: Season,

    /// Show the plant-vs-site comparison table
    #[arg(long)]
    pub compare: bool,

    /// Also scan the surrounding region and rank this point against it
    #[arg(long)]
    pub scan: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ScanRegionArgs {
    #[arg(short, long)]
    pub plant: String,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Number of ranked entries to show (defaults to scan.top_n)
    #[arg(long)]
    pub top: Option<usize>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ScanWorldArgs {
    #[arg(short, long)]
    pub plant: String,

    /// Latitude of a point to keep visible in the ranking
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude of a point to keep visible in the ranking
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Country from the world table to keep visible in the ranking
    #[arg(long, conflicts_with = "lat")]
    pub country: Option<String>,

    #[arg(long)]
    pub top: Option<usize>,

    #[arg(long)]
    pub json: bool,
}

fn parse_water(s: &str) -> Result<WaterSource, String> {
    WaterSource::from_str(s).ok_or_else(|| format!("unknown water source '{}'", s))
}

fn parse_goal(s: &str) -> Result<YieldGoal, String> {
    YieldGoal::from_str(s).ok_or_else(|| format!("unknown yield goal '{}'", s))
}

fn parse_season(s: &str) -> Result<Season, String> {
    Season::from_str(s).ok_or_else(|| format!("unknown season '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "geoplant", "analyze", "--plant", "Olive", "--lat", "37.4", "--lon", "-5.9",
            "--water", "irrigated", "--season", "summer",
        ])
        .unwrap();

        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.lon, -5.9);
        assert_eq!(args.water, WaterSource::Irrigated);
        assert_eq!(args.goal, YieldGoal::Survival);
        assert_eq!(args.season, Season::Summer);
    }

    #[test]
    fn rejects_unknown_season() {
        let result = Cli::try_parse_from([
            "geoplant", "analyze", "--plant", "Olive", "--lat", "1", "--lon", "2", "--season",
            "monsoon",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn world_anchor_needs_both_coordinates() {
        let result = Cli::try_parse_from(["geoplant", "scan-world", "--plant", "Olive", "--lat", "4"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "geoplant", "-v", "scan-world", "--plant", "Olive", "--country", "Spain",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
    }
}

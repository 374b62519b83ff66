mod cli;
mod output;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Commands, ScanRegionArgs, ScanWorldArgs};
use geoplant::datasources::{NominatimClient, PostGisClient};
use geoplant::logic::comparison::{compare, ConditionComparison};
use geoplant::logic::{locations, ranking, GeoPlant, UnitNormalizer};
use geoplant::models::{AnalysisRequest, RankedEntry, ScanReport, SuitabilityResult};
use geoplant::Config;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Service = GeoPlant<PostGisClient, PostGisClient, Option<NominatimClient>>;

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    result: &'a SuitabilityResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<&'a [ConditionComparison]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scan: Option<&'a ScanReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranking: Option<&'a [RankedEntry]>,
}

#[derive(Serialize)]
struct ScanOutput<'a> {
    report: &'a ScanReport,
    ranking: &'a [RankedEntry],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init = cli.command {
        let (_, path) = Config::setup_interactive()?;
        println!("Run `geoplant check` to verify {}", path.display());
        return Ok(());
    }

    if !Config::exists(cli.config.as_ref()) {
        eprintln!("No configuration found. Run `geoplant init`, or copy");
        eprintln!("config/config.yaml.example to config/config.yaml");
        std::process::exit(1);
    }

    let mut config = match Config::load(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(top) = requested_top(&cli.command) {
        config.scan.top_n = top;
    }

    let service = connect(&config).await?;

    match cli.command {
        Commands::Analyze(args) => analyze(&service, args).await,
        Commands::ScanRegion(args) => scan_region(&service, args).await,
        Commands::ScanWorld(args) => scan_world(&service, args).await,
        Commands::Plants => {
            let names = service.plant_names().await;
            if names.is_empty() {
                println!("No plants found.");
            }
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Check => {
            println!("Config OK");
            let status = service.check_connections().await;
            print!("{}", output::format_connections(&status, config.geocoder.enabled));
            print!("{}", output::format_rules(service.engine()));
            if !status.climate || !status.plants {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Init => Ok(()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn requested_top(command: &Commands) -> Option<usize> {
    match command {
        Commands::ScanRegion(args) => args.top,
        Commands::ScanWorld(args) => args.top,
        _ => None,
    }
}

async fn connect(config: &Config) -> anyhow::Result<Service> {
    let db = PostGisClient::connect(
        &config.database,
        UnitNormalizer::new(config.decoding),
        config.site_defaults.to_site(),
    )
    .await
    .context("Could not reach the climate database")?;

    let geocoder = if config.geocoder.enabled {
        Some(NominatimClient::new(&config.geocoder)?)
    } else {
        None
    };

    Ok(GeoPlant::from_config(Arc::new(db.clone()), db, geocoder, config))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn analyze(service: &Service, args: AnalyzeArgs) -> anyhow::Result<()> {
    let request = AnalysisRequest::new(args.plant, args.lat, args.lon)
        .water_source(args.water)
        .yield_goal(args.goal)
        .season(args.season);

    let result = service.analyze(&request).await?;
    let comparison = args.compare.then(|| compare(&result));

    let scan = if args.scan {
        let report = service
            .scan_region(&request.plant_name, request.lat, request.lon)
            .await?;
        let ranked = service.rank(&report.samples, Some(&result));
        Some((report, ranked))
    } else {
        None
    };

    if args.json {
        return print_json(&AnalyzeOutput {
            result: &result,
            comparison: comparison.as_deref(),
            scan: scan.as_ref().map(|(report, _)| report),
            ranking: scan.as_ref().map(|(_, ranked)| ranked.as_slice()),
        });
    }

    print!("{}", output::format_result(&result));
    if let Some(rows) = &comparison {
        println!();
        print!("{}", output::format_comparison(rows));
    }
    if let Some((report, ranked)) = &scan {
        println!();
        println!("Region ranking");
        print!("{}", output::format_ranking(report, ranked));
    }
    Ok(())
}

async fn scan_region(service: &Service, args: ScanRegionArgs) -> anyhow::Result<()> {
    let report = service.scan_region(&args.plant, args.lat, args.lon).await?;
    let ranked = service.rank(&report.samples, None);

    if args.json {
        return print_json(&ScanOutput {
            report: &report,
            ranking: &ranked,
        });
    }

    println!(
        "{} around ({:.2}, {:.2})",
        args.plant, args.lat, args.lon
    );
    print!("{}", output::format_ranking(&report, &ranked));
    Ok(())
}

async fn scan_world(service: &Service, args: ScanWorldArgs) -> anyhow::Result<()> {
    let country = match args.country.as_deref() {
        Some(name) => match locations::find(name) {
            Some(loc) => Some(loc),
            None => bail!("'{}' is not in the world location table", name),
        },
        None => None,
    };

    let report = service.scan_world(&args.plant).await?;

    let ranked = match (args.lat, args.lon, country) {
        (Some(lat), Some(lon), _) => {
            let anchor = service
                .analyze(&AnalysisRequest::new(args.plant.clone(), lat, lon))
                .await?;
            service.rank(&report.samples, Some(&anchor))
        }
        (_, _, Some(loc)) => {
            let anchor = report
                .samples
                .iter()
                .find(|s| s.location_id == loc.name)
                .map(|s| RankedEntry::anchor(s.location_id.clone(), s.score));
            if anchor.is_none() {
                eprintln!("No climate data for {}; it is not ranked.", loc.name);
            }
            ranking::rank(&report.samples, anchor, service.scan_config().top_n)
        }
        _ => service.rank(&report.samples, None),
    };

    if args.json {
        return print_json(&ScanOutput {
            report: &report,
            ranking: &ranked,
        });
    }

    println!("{} worldwide", args.plant);
    print!("{}", output::format_ranking(&report, &ranked));
    Ok(())
}

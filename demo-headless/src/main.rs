use clap::Parser;
use fire_risk_core::{
    available_countries, filter_by_country, load_hazard_feed, rank_by_risk, search_extent,
    Coordinate, GeoBounds, GeoRiskEngine, HazardRecord, MarkerPlacement, MarkerPlan,
    RiskAssessment, RiskModel, DEFAULT_OBSERVER, MARKER_BATCH_SIZE,
};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Wildfire proximity risk report for a hazard feed
#[derive(Parser, Debug)]
#[command(name = "fire-risk-demo")]
#[command(about = "Nearest wildfire hazard and risk report", long_about = None)]
struct Args {
    /// Hazard feed file (JSON array of hazard records)
    #[arg(short, long)]
    feed: PathBuf,

    /// Observer longitude in degrees
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Observer latitude in degrees
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Only consider hazards whose country contains this text
    #[arg(short, long)]
    country: Option<String>,

    /// Visible map area as west,south,east,north
    #[arg(long, allow_hyphen_values = true)]
    viewport: Option<GeoBounds>,

    /// Markers placed per batch
    #[arg(long, default_value_t = MARKER_BATCH_SIZE)]
    batch_size: usize,

    /// Number of highest-risk hazards to list
    #[arg(short, long, default_value_t = 5)]
    top: usize,

    /// Risk model file (JSON weights and coefficients)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    observer: Coordinate,
    hazards: usize,
    valid: usize,
    countries: Vec<String>,
    extent: Option<GeoBounds>,
    nearest: Option<&'a RiskAssessment>,
    highest_risk: &'a [RiskAssessment],
    markers: Option<MarkerSummary<'a>>,
}

#[derive(Serialize)]
struct MarkerSummary<'a> {
    viewport: GeoBounds,
    batch_size: usize,
    batches: usize,
    placements: &'a [MarkerPlacement],
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let engine = match &args.model {
        Some(path) => {
            let model = RiskModel::from_json_str(&fs::read_to_string(path)?)?;
            info!(path = %path.display(), "Loaded risk model");
            GeoRiskEngine::with_model(model)?
        }
        None => GeoRiskEngine::new(),
    };

    let observer = match (args.longitude, args.latitude) {
        (Some(longitude), Some(latitude)) => Coordinate::new(longitude, latitude)?,
        _ => {
            warn!("No observer location given, using {DEFAULT_OBSERVER}");
            DEFAULT_OBSERVER
        }
    };

    let feed = load_hazard_feed(&args.feed)?;
    let countries = available_countries(&feed);
    let hazards: Vec<HazardRecord> = match &args.country {
        Some(query) => filter_by_country(&feed, query).into_iter().cloned().collect(),
        None => feed,
    };

    let nearest = engine.find_nearest(observer, &hazards);
    let mut ranked = engine.assess_all(observer, &hazards);
    let valid = ranked.len();
    rank_by_risk(&mut ranked);
    ranked.truncate(args.top);

    let plan = args
        .viewport
        .map(|viewport| (viewport, MarkerPlan::new(&hazards, &viewport, args.batch_size)));

    let report = Report {
        observer,
        hazards: hazards.len(),
        valid,
        countries,
        extent: search_extent(&hazards),
        nearest: nearest.as_ref(),
        highest_risk: &ranked,
        markers: plan.as_ref().map(|(viewport, plan)| MarkerSummary {
            viewport: *viewport,
            batch_size: plan.batch_size(),
            batches: plan.batch_count(),
            placements: plan.placements(),
        }),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.country.as_deref());
    }

    Ok(())
}

fn print_report(report: &Report<'_>, country: Option<&str>) {
    println!("=== Fire Risk Report ===\n");
    println!("Observer: {}", report.observer);
    match country {
        Some(query) => println!(
            "Hazards: {} matching \"{}\" ({} with a valid location)",
            report.hazards,
            query.trim(),
            report.valid
        ),
        None => println!(
            "Hazards: {} ({} with a valid location)",
            report.hazards, report.valid
        ),
    }
    if !report.countries.is_empty() {
        println!("Countries in feed: {}", report.countries.join(", "));
    }
    if let Some(extent) = report.extent {
        println!("Extent: {extent}");
    }
    println!();

    match report.nearest {
        Some(nearest) => {
            println!("Nearest hazard:");
            print_assessment(nearest);
            println!("  {}", nearest.level().advice());
        }
        None => println!("No hazards with a valid location"),
    }

    if !report.highest_risk.is_empty() {
        println!("\nHighest risk:");
        for (rank, assessment) in report.highest_risk.iter().enumerate() {
            print!("{:>3}. ", rank + 1);
            print_assessment(assessment);
        }
    }

    if let Some(markers) = &report.markers {
        println!("\nViewport {}:", markers.viewport);
        println!(
            "  {} markers in {} batches of up to {}",
            markers.placements.len(),
            markers.batches,
            markers.batch_size
        );
    }
}

fn print_assessment(assessment: &RiskAssessment) {
    let hazard = &assessment.hazard;
    println!(
        "{} [{}] {} away, risk {} ({})",
        hazard.location_description(),
        assessment.coordinate,
        assessment.distance,
        assessment.score,
        assessment.level()
    );

    let mut conditions = Vec::new();
    if let Some(t) = hazard.temperature {
        conditions.push(format!("{t:.1}°C"));
    }
    if let Some(h) = hazard.humidity {
        conditions.push(format!("humidity {h:.0}%"));
    }
    if let Some(w) = hazard.wind_speed {
        conditions.push(format!("wind {w:.1} m/s"));
    }
    if let Some(c) = hazard.clouds {
        conditions.push(format!("clouds {c:.0}%"));
    }
    if !conditions.is_empty() {
        println!("       {}", conditions.join(", "));
    }
}

//! Command execution logic

use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use lanewatch_app::{run_pipeline, Config, PipelineInputs, PipelineOptions};
use lanewatch_domain::model::LocationRef;
use lanewatch_domain::repository::{AggregateSnapshotRepository, RouteCandidateRepository};
use lanewatch_domain::service::VehiclePositions;
use lanewatch_infra::persistence::{FileAggregateSnapshotRepository, FileRouteCandidateRepository};
use lanewatch_infra::place_csv::load_place_refs;
use lanewatch_infra::route_master_loader::load_routes_from_file;
use lanewatch_infra::shipment_csv::load_shipment_records;
use lanewatch_infra::telemetry_snapshot::load_vehicle_positions;
use lanewatch_types::{Error, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{output_candidates, output_reconcile};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match &cli.command {
        Commands::Reconcile {
            shipments,
            routes,
            locations,
            cities,
            landmarks,
            telemetry,
            out,
            candidates,
            threshold,
        } => {
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_reconcile(
                &config,
                ReconcileArgs {
                    shipments: shipments.clone(),
                    routes: routes.clone(),
                    locations: locations.clone(),
                    cities: cities.clone(),
                    landmarks: landmarks.clone(),
                    telemetry: telemetry.clone(),
                    out: out.clone(),
                    candidates: candidates.clone(),
                    threshold: *threshold,
                },
                output_format,
            )
        }

        Commands::Unmatched { candidates } => {
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_unmatched(&config, candidates.clone(), output_format)
        }

        Commands::Config {
            show,
            set_routes,
            set_locations,
            set_cities,
            set_landmarks,
            set_telemetry,
            set_threshold,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_routes.clone(),
            set_locations.clone(),
            set_cities.clone(),
            set_landmarks.clone(),
            set_telemetry.clone(),
            *set_threshold,
            *set_output,
            *reset,
        ),
    }
}

struct ReconcileArgs {
    shipments: PathBuf,
    routes: Option<PathBuf>,
    locations: Option<PathBuf>,
    cities: Option<PathBuf>,
    landmarks: Option<PathBuf>,
    telemetry: Option<PathBuf>,
    out: Option<PathBuf>,
    candidates: Option<PathBuf>,
    threshold: Option<f64>,
}

fn cmd_reconcile(config: &Config, args: ReconcileArgs, output_format: OutputFormat) -> Result<()> {
    let routes_path = args
        .routes
        .or_else(|| config.routes_file.clone())
        .ok_or_else(|| {
            Error::FileNotFound(
                "route master not set; pass --routes or configure routes_file".to_string(),
            )
        })?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    spinner.set_message("loading inputs");
    let records =
        load_shipment_records(&args.shipments).map_err(|e| Error::CsvLoader(e.to_string()))?;
    let routes = load_routes_from_file(&routes_path)?;
    let locations = load_optional_places(args.locations.or_else(|| config.locations_file.clone()))?;
    let cities = load_optional_places(args.cities.or_else(|| config.cities_file.clone()))?;
    let landmarks = load_optional_places(args.landmarks.or_else(|| config.landmarks_file.clone()))?;
    let positions = match args.telemetry.or_else(|| config.telemetry_file.clone()) {
        Some(path) => load_vehicle_positions(&path)?,
        None => VehiclePositions::default(),
    };

    spinner.set_message(format!("reconciling {} records", records.len()));
    let inputs = PipelineInputs {
        records,
        routes,
        locations,
        cities,
        landmarks,
        positions,
    };
    let options = PipelineOptions::default()
        .with_match_threshold(args.threshold.unwrap_or(config.match_threshold));
    let output = run_pipeline(&inputs, &options);

    spinner.set_message("saving results");
    let snapshot_path = match args.out {
        Some(path) => path,
        None => config.snapshot_path()?,
    };
    let snapshot_repo = FileAggregateSnapshotRepository::new(snapshot_path);
    snapshot_repo.replace_all(&output.aggregates)?;

    let candidates_path = match args.candidates {
        Some(path) => path,
        None => config.candidates_path()?,
    };
    let candidate_repo = FileRouteCandidateRepository::new(candidates_path);
    let new_candidates = candidate_repo.upsert_new(&output.candidates)?;

    spinner.finish_and_clear();
    output_reconcile(output_format, &output, new_candidates)
}

fn load_optional_places(path: Option<PathBuf>) -> Result<Vec<LocationRef>> {
    match path {
        Some(path) => load_place_refs(&path).map_err(|e| Error::CsvLoader(e.to_string())),
        None => Ok(Vec::new()),
    }
}

fn cmd_unmatched(
    config: &Config,
    candidates: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    let path = match candidates {
        Some(path) => path,
        None => config.candidates_path()?,
    };
    let repo = FileRouteCandidateRepository::new(path);
    let stored = repo.find_all()?;
    output_candidates(output_format, &stored)
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_routes: Option<PathBuf>,
    set_locations: Option<PathBuf>,
    set_cities: Option<PathBuf>,
    set_landmarks: Option<PathBuf>,
    set_telemetry: Option<PathBuf>,
    set_threshold: Option<f64>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    let mut config = if reset {
        Config::default()
    } else {
        Config::load()?
    };

    let mut changed = reset;

    if let Some(path) = set_routes {
        config.routes_file = Some(path);
        changed = true;
    }
    if let Some(path) = set_locations {
        config.locations_file = Some(path);
        changed = true;
    }
    if let Some(path) = set_cities {
        config.cities_file = Some(path);
        changed = true;
    }
    if let Some(path) = set_landmarks {
        config.landmarks_file = Some(path);
        changed = true;
    }
    if let Some(path) = set_telemetry {
        config.telemetry_file = Some(path);
        changed = true;
    }
    if let Some(threshold) = set_threshold {
        config.match_threshold = threshold;
        changed = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !changed {
        println!("{}", config);
    }

    Ok(())
}

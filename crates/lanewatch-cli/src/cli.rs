//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lanewatch_types::OutputFormat;

#[derive(Parser)]
#[command(name = "lanewatch")]
#[command(version)]
#[command(about = "Shipment route reconciliation and lane aggregation for fleet exports")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile a shipment export against the route master
    Reconcile {
        /// Path to the shipment export CSV
        shipments: PathBuf,

        /// Route master TOML. Uses config value if not specified.
        #[arg(long)]
        routes: Option<PathBuf>,

        /// Curated location list CSV for coordinate backfill
        #[arg(long)]
        locations: Option<PathBuf>,

        /// Telemetry dropdown city list CSV
        #[arg(long)]
        cities: Option<PathBuf>,

        /// Telemetry dropdown landmark list CSV
        #[arg(long)]
        landmarks: Option<PathBuf>,

        /// Live-telemetry position snapshot JSON
        #[arg(long)]
        telemetry: Option<PathBuf>,

        /// Aggregate snapshot output path override
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Route candidate store path override
        #[arg(long)]
        candidates: Option<PathBuf>,

        /// Fuzzy matcher acceptance threshold (0.0-1.0)
        #[arg(long, short = 't')]
        threshold: Option<f64>,
    },

    /// List stored unmatched route candidates
    Unmatched {
        /// Route candidate store path override
        #[arg(long)]
        candidates: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set route master path
        #[arg(long)]
        set_routes: Option<PathBuf>,

        /// Set curated location list path
        #[arg(long)]
        set_locations: Option<PathBuf>,

        /// Set dropdown city list path
        #[arg(long)]
        set_cities: Option<PathBuf>,

        /// Set dropdown landmark list path
        #[arg(long)]
        set_landmarks: Option<PathBuf>,

        /// Set telemetry snapshot path
        #[arg(long)]
        set_telemetry: Option<PathBuf>,

        /// Set fuzzy matcher threshold
        #[arg(long)]
        set_threshold: Option<f64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

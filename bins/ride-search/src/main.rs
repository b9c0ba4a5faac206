//! ride-search - find posted rides that cover a passenger's journey
//!
//! Drives the route-match engine from JSON fixtures: a gazetteer of places
//! and a list of posted rides.

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use rideshare_core::config::Config;
use rideshare_core::error::{exit_codes, Error as CoreError};
use rideshare_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod fixtures;
mod output;

use commands::{polyline, search};

/// Route-match search for shared rides
#[derive(Parser)]
#[command(name = "ride-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search posted rides for a journey
    Search(search::SearchArgs),

    /// Decode an encoded polyline into coordinates
    Decode {
        /// The encoded polyline
        polyline: String,

        /// Decimal places used by the encoder
        #[arg(short, long)]
        precision: Option<u32>,

        /// Print coordinates as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode coordinates into a polyline
    Encode {
        /// Points as `lat,lng`
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<String>,

        /// Decimal places to encode with
        #[arg(short, long)]
        precision: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let mut telemetry = TelemetryConfig::from(&config.engine.logging);
    if cli.verbose {
        telemetry = telemetry.with_level("debug");
    }
    rideshare_telemetry::init_with_config(telemetry)?;

    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    match cli.command {
        Commands::Search(args) => search::run(args, &config.engine).await,
        Commands::Decode { polyline: encoded, precision, json } => {
            polyline::decode(&encoded, precision.unwrap_or(config.engine.matching.polyline_precision), json)
        }
        Commands::Encode { points, precision } => {
            polyline::encode(&points, precision.unwrap_or(config.engine.matching.polyline_precision))
        }
    }
}

/// Exit status for a failed command, taken from the first structured error in the chain.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<CoreError>())
        .map_or(exit_codes::FAILURE, |core| core.code.exit_code());
    u8::try_from(code).unwrap_or(1)
}

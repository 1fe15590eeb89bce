//! Stookwijzer CLI
//!
//! Fetches the wood-burning advisory for one location and appends the
//! four-step forecast to a CSV file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use stookwijzer::config::DEFAULT_ENDPOINT;
use stookwijzer::{AdvisoryService, ClientConfig, CsvSink, GeoCoordinate, SinkMode};

/// Stookwijzer advisory fetcher
#[derive(Parser, Debug)]
#[command(name = "stookwijzer")]
#[command(about = "Fetch the RIVM wood-burning advisory for one location into a CSV file")]
struct Args {
    /// Latitude in degrees (WGS84)
    #[arg(long, env = "STOOKWIJZER_LAT", default_value_t = 52.089770561127374, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees (WGS84)
    #[arg(long, env = "STOOKWIJZER_LON", default_value_t = 5.109876746789877, allow_hyphen_values = true)]
    lon: f64,

    /// CSV file to create or append to
    #[arg(short, long, env = "STOOKWIJZER_OUTPUT", default_value = "stookwijzer_output.csv")]
    output: PathBuf,

    /// WMS endpoint
    #[arg(long, env = "STOOKWIJZER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, env = "STOOKWIJZER_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Stookwijzer run failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when no forecast was available and nothing was written.
async fn run(args: Args) -> Result<bool> {
    let location = GeoCoordinate::new(args.lat, args.lon);
    if !location.in_projection_area() {
        warn!(
            lat = args.lat,
            lon = args.lon,
            "Location is outside the RD New area; projected coordinates will be meaningless"
        );
    }

    let config = ClientConfig {
        endpoint: args.endpoint,
        timeout: Duration::from_secs(args.timeout_secs),
        ..Default::default()
    };
    let service = AdvisoryService::from_config(config)?;

    let forecast = match service.fetch_forecast(location).await {
        Ok(forecast) => forecast,
        Err(_) => {
            info!(path = %args.output.display(), "No forecast available, output left untouched");
            return Ok(false);
        }
    };

    let mode = SinkMode::for_path(&args.output);
    let mut sink = CsvSink::open(&args.output, mode)
        .with_context(|| format!("opening {}", args.output.display()))?;
    let rows = sink.write_forecast(&forecast)?;

    info!(rows, ?mode, path = %args.output.display(), "Forecast written");
    Ok(true)
}

//! Virtual sounding CLI.
//!
//! Fetches one provider meteogram for a point and instant, builds the
//! altitude profile and prints it as JSON on stdout. Logs go to stderr.

mod report;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use atmo_common::{DateInput, ObservationInstant, DEFAULT_TIMEZONE};
use meteogram::{AtmosphereModel, ClientConfig, WindyClient, DEFAULT_MODEL};

use report::SoundingReport;

#[derive(Parser, Debug)]
#[command(name = "sounding")]
#[command(about = "Atmosphere profile by altitude from a forecast meteogram")]
struct Args {
    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,

    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,

    /// RFC 3339 timestamp or local "YYYY-MM-DD[ HH:MM[:SS]]" (default: now)
    #[arg(long)]
    date: Option<String>,

    /// IANA time zone for a local date
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Forecast model name
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Altitude spacing of the output rows, metres
    #[arg(long, default_value_t = 500.0)]
    step: f64,

    /// Provider base URL
    #[arg(long, env = "METEOGRAM_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "METEOGRAM_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.log_level))
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn client_config(args: &Args) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url.as_str());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn observation_instant(args: &Args) -> Result<ObservationInstant> {
    match &args.date {
        Some(date) => {
            let input = DateInput::parse(date).with_context(|| format!("invalid --date {date}"))?;
            Ok(ObservationInstant::new(input, &args.timezone)?)
        }
        None => Ok(ObservationInstant::now()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args)?;

    let config = client_config(&args)?;
    info!(base_url = %config.base_url, "Starting sounding");

    let instant = observation_instant(&args)?;
    let client = WindyClient::new(config)?;
    let model = AtmosphereModel::new(client)
        .with_location(args.latitude, args.longitude)
        .with_instant(instant.clone());

    let profile = model
        .process(&args.model)
        .await
        .with_context(|| format!("failed to build profile for {}", args.model))?;
    info!(
        model = %profile.model,
        time_index = profile.time_index,
        max_expected_height = profile.max_expected_height,
        "Profile ready"
    );

    let report = SoundingReport::build(&profile, instant.utc(), args.step)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

//! Fleet zone map - one-shot fleet snapshot report
//!
//! Loads operating zones from a KML file, fetches the live GBFS vehicle feed,
//! classifies every vehicle by zone and battery state, and writes a static
//! Leaflet map page with zone and battery summary panels.
//!
//! Module structure:
//! - `domain/` - Core types (LatLon, FleetUnit, BatteryCategory, Zone, ReportModel)
//! - `io/` - External interfaces (KML file, GBFS feed, HTML report)
//! - `services/` - Classification logic (zone loader, classifier, aggregator, report builder)
//! - `infra/` - Infrastructure (Config, error types)

use clap::Parser;
use fleet_zone_map::infra::config::{Config, DEFAULT_CONFIG_PATH};
use fleet_zone_map::io::{GbfsClient, HtmlReport, KmlFile};
use fleet_zone_map::services::pipeline;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Fleet zone map - render a zone and battery snapshot of a shared fleet
#[derive(Parser, Debug)]
#[command(name = "fleet-zone-map", version, about)]
struct Args {
    /// Path to TOML configuration file (compiled-in defaults if missing)
    #[arg(short, long, env = "CONFIG_FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for per-unit classification
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(version = %env!("CARGO_PKG_VERSION"), git = %env!("GIT_HASH"), "fleet-zone-map starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        kml_path = %config.kml_path(),
        feed_url = %config.feed_url(),
        output = %config.output_path(),
        icon_dir = ?config.icon_dir(),
        "config_loaded"
    );

    let zones = KmlFile::new(config.kml_path());
    let feed = GbfsClient::new(config.feed_url(), config.feed_client_name(), config.feed_timeout())?;
    let sink = HtmlReport::from_config(&config);

    let report = pipeline::run(&zones, &feed, &sink).await?;

    info!(
        path = %sink.path().display(),
        total = %report.total,
        feed_available = %report.feed_available,
        "map_saved"
    );
    Ok(())
}

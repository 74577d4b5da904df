//! One report run: zones → units → tally → model → sink
//!
//! Runs exactly once with no retries. Zone loading and report writing
//! failures abort the run. A feed failure does not: it is logged and the run
//! continues with zero units, so a report is always written.

use crate::domain::report::ReportModel;
use crate::io::ports::{FleetSource, GeometrySource, ReportSink};
use crate::services::aggregator::aggregate;
use crate::services::report_builder::build_report;
use anyhow::Context;
use std::time::Instant;
use tracing::{info, warn};

pub async fn run<G, F, R>(geometry: &G, fleet: &F, sink: &R) -> anyhow::Result<ReportModel>
where
    G: GeometrySource + ?Sized,
    F: FleetSource + ?Sized,
    R: ReportSink + ?Sized,
{
    let start = Instant::now();

    let zones = geometry.load_zones().context("Failed to load zones")?;
    if zones.is_empty() {
        warn!("no_zones_loaded");
    }

    let (units, feed_available) = match fleet.fetch_units().await {
        Ok(units) => (units, true),
        Err(e) => {
            warn!(error = %e, "feed_unavailable");
            (Vec::new(), false)
        }
    };

    let tally = aggregate(&units, &zones);
    let report = build_report(&zones, tally, feed_available);
    report.log();

    sink.write_report(&report).context("Failed to write report")?;

    info!(elapsed_ms = %start.elapsed().as_millis(), "run_complete");
    Ok(report)
}

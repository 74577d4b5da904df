//! Tally + zones → ReportModel
//!
//! Pure transformation: zone ranking, availability percentage and marker
//! list. No I/O.

use crate::domain::report::{ReportModel, UnitMarker, ZoneSummary};
use crate::domain::zone::Zone;
use crate::services::aggregator::FleetTally;

/// available / total × 100, or 0 when there are no units
pub fn availability_percent(available: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (available as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Zones paired with their counts, sorted by count descending.
/// `sort_by` is stable, so equal counts keep load order.
pub fn rank_zones(zones: &[Zone], counts: &[u64]) -> Vec<ZoneSummary> {
    let mut ranked: Vec<ZoneSummary> = zones
        .iter()
        .zip(counts.iter().copied().chain(std::iter::repeat(0)))
        .map(|(zone, count)| ZoneSummary {
            name: zone.name().to_string(),
            count,
            boundary: zone.boundary().to_vec(),
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

pub fn build_report(zones: &[Zone], tally: FleetTally, feed_available: bool) -> ReportModel {
    let zone_summaries = rank_zones(zones, &tally.zone_counts);
    let units = tally
        .units
        .into_iter()
        .map(|u| UnitMarker {
            position: u.position,
            battery: u.battery,
            disabled: u.disabled,
            category: u.category,
        })
        .collect();

    ReportModel {
        total: tally.total,
        available: tally.available,
        out_of_zone: tally.out_of_zone,
        zones: zone_summaries,
        categories: tally.categories,
        availability_percent: availability_percent(tally.available, tally.total),
        units,
        feed_available,
    }
}

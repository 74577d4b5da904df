//! Report model handed to the renderer
//!
//! Built once by `services::report_builder` and read-only afterwards.

use crate::domain::types::{BatteryCategory, CategoryCounts, LatLon};
use serde::Serialize;
use tracing::info;

/// One zone with its final count, in report order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub name: String,
    pub count: u64,
    pub boundary: Vec<LatLon>,
}

/// One map marker per classified unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitMarker {
    pub position: LatLon,
    pub battery: f64,
    pub disabled: bool,
    pub category: BatteryCategory,
}

impl UnitMarker {
    pub fn battery_percent(&self) -> f64 {
        self.battery * 100.0
    }

    pub fn status(&self) -> &'static str {
        if self.disabled {
            "Disabled"
        } else {
            "Available"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportModel {
    pub total: u64,
    pub available: u64,
    pub out_of_zone: u64,
    /// Sorted by count descending; ties keep load order
    pub zones: Vec<ZoneSummary>,
    pub categories: CategoryCounts,
    /// available / total × 100, or 0 when there are no units
    pub availability_percent: f64,
    pub units: Vec<UnitMarker>,
    /// False when the fleet feed could not be reached
    pub feed_available: bool,
}

impl ReportModel {
    pub fn in_zone(&self) -> u64 {
        self.zones.iter().map(|z| z.count).sum()
    }

    /// Log a one-line summary of the report
    pub fn log(&self) {
        info!(
            total = %self.total,
            available = %self.available,
            availability_pct = format!("{:.1}", self.availability_percent),
            in_zone = %self.in_zone(),
            out_of_zone = %self.out_of_zone,
            zones = %self.zones.len(),
            critical = %self.categories.get(BatteryCategory::Critical),
            superlow = %self.categories.get(BatteryCategory::Superlow),
            low = %self.categories.get(BatteryCategory::Low),
            medium = %self.categories.get(BatteryCategory::Medium),
            good = %self.categories.get(BatteryCategory::Good),
            broken = %self.categories.get(BatteryCategory::Broken),
            feed_available = %self.feed_available,
            "report_summary"
        );
    }
}

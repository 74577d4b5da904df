//! Fleet aggregation: one pass over the feed, one tally out
//!
//! The tally is threaded through a fold by value. Each unit lands in exactly
//! one zone-or-out-of-zone bucket and exactly one battery category, so
//!   sum(zone_counts) + out_of_zone == total == categories.total()
//! holds for every tally this module produces.

use crate::domain::types::{BatteryCategory, CategoryCounts, FleetUnit, LatLon};
use crate::domain::zone::Zone;
use crate::services::classifier;
use tracing::{debug, info};

/// A unit after zone and category classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedUnit {
    pub position: LatLon,
    pub battery: f64,
    pub disabled: bool,
    pub category: BatteryCategory,
    /// Index into the zone list, None when out of zone
    pub zone: Option<usize>,
}

impl ClassifiedUnit {
    pub fn classify(unit: &FleetUnit, zones: &[Zone]) -> Self {
        Self {
            position: unit.position,
            battery: unit.battery_fraction(),
            disabled: unit.disabled,
            category: BatteryCategory::classify(unit),
            zone: classifier::classify(unit.position, zones),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FleetTally {
    pub total: u64,
    pub available: u64,
    pub out_of_zone: u64,
    /// Per-zone counts, indexed in zone load order
    pub zone_counts: Vec<u64>,
    pub categories: CategoryCounts,
    pub units: Vec<ClassifiedUnit>,
}

impl FleetTally {
    pub fn empty(zone_count: usize) -> Self {
        Self {
            total: 0,
            available: 0,
            out_of_zone: 0,
            zone_counts: vec![0; zone_count],
            categories: CategoryCounts::default(),
            units: Vec::new(),
        }
    }

    #[must_use]
    pub fn record(mut self, unit: ClassifiedUnit) -> Self {
        self.total += 1;
        if !unit.disabled {
            self.available += 1;
        }
        // An index outside this tally's zone list counts as out of zone
        match unit.zone.and_then(|i| self.zone_counts.get_mut(i)) {
            Some(count) => *count += 1,
            None => self.out_of_zone += 1,
        }
        self.categories = self.categories.incremented(unit.category);
        self.units.push(unit);
        self
    }
}

/// Classify every unit and tally zone and category counts
pub fn aggregate(units: &[FleetUnit], zones: &[Zone]) -> FleetTally {
    let tally = units.iter().fold(FleetTally::empty(zones.len()), |tally, unit| {
        let classified = ClassifiedUnit::classify(unit, zones);
        debug!(
            bike_id = %unit.bike_id.as_deref().unwrap_or("-"),
            position = %unit.position,
            category = %classified.category.as_str(),
            zone = ?classified.zone.map(|i| zones[i].name()),
            "unit_classified"
        );
        tally.record(classified)
    });

    info!(
        total = %tally.total,
        available = %tally.available,
        out_of_zone = %tally.out_of_zone,
        "fleet_aggregated"
    );
    tally
}

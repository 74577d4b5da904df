//! Shared types for fleet classification

use serde::{Deserialize, Serialize};

/// A WGS84 position, always stored latitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar point used for containment tests (x = lon, y = lat)
    #[inline]
    pub(crate) fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }

    #[inline]
    pub(crate) fn to_coord(self) -> geo::Coord<f64> {
        geo::Coord { x: self.lon, y: self.lat }
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}

/// One vehicle as reported by the fleet feed
#[derive(Debug, Clone, PartialEq)]
pub struct FleetUnit {
    /// Feed-assigned vehicle id, kept for log context only
    pub bike_id: Option<String>,
    pub position: LatLon,
    /// Battery level in [0, 1]; a missing reading is 0
    pub battery: f64,
    pub disabled: bool,
}

impl FleetUnit {
    pub fn new(lat: f64, lon: f64, battery: f64, disabled: bool) -> Self {
        Self { bike_id: None, position: LatLon::new(lat, lon), battery, disabled }
    }

    /// Battery fraction with non-finite readings mapped to 0
    #[inline]
    pub fn battery_fraction(&self) -> f64 {
        if self.battery.is_finite() {
            self.battery
        } else {
            0.0
        }
    }
}

pub const BROKEN_ABOVE: f64 = 0.10;
pub const CRITICAL_BELOW: f64 = 0.04;
pub const SUPERLOW_BELOW: f64 = 0.10;
pub const LOW_BELOW: f64 = 0.25;
pub const MEDIUM_BELOW: f64 = 0.55;

/// Operational state bucket derived from battery level and disabled flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryCategory {
    Critical,
    Superlow,
    Low,
    Medium,
    Good,
    Broken,
}

fn is_broken(unit: &FleetUnit) -> bool {
    unit.disabled && unit.battery_fraction() > BROKEN_ABOVE
}

fn is_critical(unit: &FleetUnit) -> bool {
    unit.battery_fraction() < CRITICAL_BELOW
}

fn is_superlow(unit: &FleetUnit) -> bool {
    unit.battery_fraction() < SUPERLOW_BELOW
}

fn is_low(unit: &FleetUnit) -> bool {
    unit.battery_fraction() < LOW_BELOW
}

fn is_medium(unit: &FleetUnit) -> bool {
    unit.battery_fraction() < MEDIUM_BELOW
}

/// Evaluated top to bottom, first match wins. A disabled unit at or below
/// 10% misses the Broken rule and lands in an ordinary battery bucket.
const CATEGORY_RULES: [(fn(&FleetUnit) -> bool, BatteryCategory); 5] = [
    (is_broken, BatteryCategory::Broken),
    (is_critical, BatteryCategory::Critical),
    (is_superlow, BatteryCategory::Superlow),
    (is_low, BatteryCategory::Low),
    (is_medium, BatteryCategory::Medium),
];

impl BatteryCategory {
    /// All categories in report panel order
    pub const ALL: [BatteryCategory; 6] = [
        BatteryCategory::Critical,
        BatteryCategory::Superlow,
        BatteryCategory::Low,
        BatteryCategory::Medium,
        BatteryCategory::Good,
        BatteryCategory::Broken,
    ];

    pub fn classify(unit: &FleetUnit) -> Self {
        CATEGORY_RULES
            .iter()
            .find(|(applies, _)| applies(unit))
            .map(|&(_, category)| category)
            .unwrap_or(BatteryCategory::Good)
    }

    /// Position in `ALL`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BatteryCategory::Critical => 0,
            BatteryCategory::Superlow => 1,
            BatteryCategory::Low => 2,
            BatteryCategory::Medium => 3,
            BatteryCategory::Good => 4,
            BatteryCategory::Broken => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryCategory::Critical => "critical",
            BatteryCategory::Superlow => "superlow",
            BatteryCategory::Low => "low",
            BatteryCategory::Medium => "medium",
            BatteryCategory::Good => "good",
            BatteryCategory::Broken => "broken",
        }
    }

    /// Label shown in the battery panel
    pub fn label(&self) -> &'static str {
        match self {
            BatteryCategory::Critical => "Critical low < 4%",
            BatteryCategory::Superlow => "Superlow 4–10%",
            BatteryCategory::Low => "10–25%",
            BatteryCategory::Medium => "25–55%",
            BatteryCategory::Good => "Good > 55%",
            BatteryCategory::Broken => "Broken (>10% + disabled)",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BatteryCategory::Critical => "#333333",
            BatteryCategory::Superlow => "#6e4b3a",
            BatteryCategory::Low => "#e67e22",
            BatteryCategory::Medium => "#f1c40f",
            BatteryCategory::Good => "#27ae60",
            BatteryCategory::Broken => "#e74c3c",
        }
    }

    /// Marker image file name inside the configured icon directory
    pub fn icon_file(&self) -> &'static str {
        match self {
            BatteryCategory::Critical => "scooter_icon_black.png",
            BatteryCategory::Superlow => "scooter_icon_brown.png",
            BatteryCategory::Low => "scooter_icon_orange.png",
            BatteryCategory::Medium => "scooter_icon_yellow.png",
            BatteryCategory::Good => "scooter_icon_green.png",
            BatteryCategory::Broken => "scooter_icon_red.png",
        }
    }
}

/// Per-category running counts, indexed in panel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts([u64; 6]);

impl CategoryCounts {
    #[inline]
    pub fn get(&self, category: BatteryCategory) -> u64 {
        self.0[category.index()]
    }

    #[must_use]
    pub fn incremented(mut self, category: BatteryCategory) -> Self {
        self.0[category.index()] += 1;
        self
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// (category, count) pairs in panel order
    pub fn iter(&self) -> impl Iterator<Item = (BatteryCategory, u64)> + '_ {
        BatteryCategory::ALL.iter().map(move |&category| (category, self.get(category)))
    }
}

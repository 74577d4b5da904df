//! Domain models - fleet units, zones and the report model
//!
//! This module contains the canonical data types used throughout the system:
//! - `LatLon` - a position, latitude first
//! - `FleetUnit` - one vehicle from the fleet feed
//! - `BatteryCategory` - the six operational-state buckets and their rule table
//! - `Zone` - a named polygon with boundary-exclusive containment
//! - `ReportModel` - the sorted, computed view handed to the renderer

pub mod report;
pub mod types;
pub mod zone;

// Re-export commonly used types at module level
pub use report::{ReportModel, UnitMarker, ZoneSummary};
pub use types::{BatteryCategory, CategoryCounts, FleetUnit, LatLon};
pub use zone::Zone;

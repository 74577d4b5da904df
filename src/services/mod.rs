//! Services - classification and report logic
//!
//! This module contains the core business logic services:
//! - `zone_loader` - KML boundary document to ordered zones
//! - `classifier` - first-match point-in-zone classification
//! - `aggregator` - single-pass fold into zone and battery tallies
//! - `report_builder` - zone ranking and availability percentage
//! - `pipeline` - one end-to-end report run over the IO traits

pub mod aggregator;
pub mod classifier;
pub mod pipeline;
pub mod report_builder;
pub mod zone_loader;

// Re-export commonly used types
pub use aggregator::{aggregate, ClassifiedUnit, FleetTally};
pub use report_builder::build_report;

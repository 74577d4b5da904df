//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `ports` - capability traits the pipeline depends on
//! - `kml` - boundary document read from disk
//! - `gbfs` - HTTP client for the GBFS free_bike_status feed
//! - `html` - Leaflet map report written to disk

pub mod gbfs;
pub mod html;
pub mod kml;
pub mod ports;

// Re-export commonly used types
pub use gbfs::GbfsClient;
pub use html::HtmlReport;
pub use kml::KmlFile;
pub use ports::{FleetSource, GeometrySource, ReportSink};

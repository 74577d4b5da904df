//! Capability traits between the pipeline and the outside world
//!
//! The pipeline only sees these traits, so tests can drive it with
//! in-memory zones, units and sinks.

use crate::domain::report::ReportModel;
use crate::domain::types::FleetUnit;
use crate::domain::zone::Zone;
use crate::infra::error::{FeedError, ReportError, ZoneLoadError};
use async_trait::async_trait;

/// Produces the ordered zone list
pub trait GeometrySource {
    fn load_zones(&self) -> Result<Vec<Zone>, ZoneLoadError>;
}

/// Produces one snapshot of fleet units
#[async_trait]
pub trait FleetSource {
    async fn fetch_units(&self) -> Result<Vec<FleetUnit>, FeedError>;
}

/// Consumes the finished report
pub trait ReportSink {
    fn write_report(&self, report: &ReportModel) -> Result<(), ReportError>;
}

impl GeometrySource for Vec<Zone> {
    fn load_zones(&self) -> Result<Vec<Zone>, ZoneLoadError> {
        Ok(self.clone())
    }
}

#[async_trait]
impl FleetSource for Vec<FleetUnit> {
    async fn fetch_units(&self) -> Result<Vec<FleetUnit>, FeedError> {
        Ok(self.clone())
    }
}

//! Zone source reading a KML boundary document from disk

use crate::domain::zone::Zone;
use crate::infra::error::ZoneLoadError;
use crate::io::ports::GeometrySource;
use crate::services::zone_loader;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct KmlFile {
    path: PathBuf,
}

impl KmlFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl GeometrySource for KmlFile {
    fn load_zones(&self) -> Result<Vec<Zone>, ZoneLoadError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| ZoneLoadError::Io { path: self.path.clone(), source })?;

        let zones = zone_loader::parse_kml(&text)?;
        info!(path = %self.path.display(), zones = %zones.len(), "zones_loaded");
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_zones_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document><Placemark><name>Vågen</name>
<Polygon><outerBoundaryIs><LinearRing><coordinates>5.72,58.97 5.74,58.97 5.74,58.98 5.72,58.98</coordinates>
</LinearRing></outerBoundaryIs></Polygon></Placemark></Document></kml>"#
        )
        .unwrap();
        file.flush().unwrap();

        let zones = KmlFile::new(file.path()).load_zones().unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name(), "Vågen");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = KmlFile::new("/nonexistent/zones.kml").load_zones().unwrap_err();
        assert!(matches!(err, ZoneLoadError::Io { .. }));
        assert!(!err.is_recoverable());
    }
}

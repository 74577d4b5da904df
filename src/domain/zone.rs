//! Named polygonal zones
//!
//! A zone keeps its outer ring twice: as the lat/lon vertex list the report
//! draws, and as a `geo` polygon (x = lon, y = lat) for containment tests.
//! Holes are not modelled.

use crate::domain::types::LatLon;
use crate::infra::error::ZoneLoadError;
use geo::{BoundingRect, Contains, LineString, Polygon, Rect};

#[derive(Debug, Clone)]
pub struct Zone {
    name: String,
    boundary: Vec<LatLon>,
    polygon: Polygon<f64>,
    bbox: Rect<f64>,
}

impl Zone {
    /// Build a zone from its outer ring. The ring may be open or closed.
    ///
    /// Fails with `MalformedGeometry` when the ring has fewer than three
    /// distinct vertices.
    pub fn new(name: impl Into<String>, boundary: Vec<LatLon>) -> Result<Self, ZoneLoadError> {
        let name = name.into();

        let mut distinct: Vec<LatLon> = Vec::with_capacity(boundary.len());
        for vertex in &boundary {
            if !distinct.contains(vertex) {
                distinct.push(*vertex);
            }
        }
        if distinct.len() < 3 {
            return Err(ZoneLoadError::MalformedGeometry {
                reason: format!("ring has {} distinct vertices, need at least 3", distinct.len()),
                name,
            });
        }

        // Polygon::new closes the exterior ring if needed
        let ring: LineString<f64> = boundary.iter().map(|v| v.to_coord()).collect();
        let polygon = Polygon::new(ring, vec![]);
        let bbox = polygon.bounding_rect().ok_or_else(|| ZoneLoadError::MalformedGeometry {
            name: name.clone(),
            reason: "ring has no extent".to_string(),
        })?;

        Ok(Self { name, boundary, polygon, bbox })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outer ring vertices in (lat, lon) order, as loaded
    pub fn boundary(&self) -> &[LatLon] {
        &self.boundary
    }

    /// Boundary-exclusive containment: a point on an edge or vertex is outside.
    pub fn contains(&self, point: LatLon) -> bool {
        let (min, max) = (self.bbox.min(), self.bbox.max());
        if point.lon < min.x || point.lon > max.x || point.lat < min.y || point.lat > max.y {
            return false;
        }
        self.polygon.contains(&point.to_point())
    }
}

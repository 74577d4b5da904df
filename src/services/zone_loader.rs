//! KML boundary document → ordered zone list
//!
//! Each `Placemark` becomes one zone:
//! - name: the direct `<name>` child, trimmed (missing name aborts the load)
//! - ring: the first `<coordinates>` of the first `<Polygon>` descendant
//!   (inner rings and further polygons are ignored)
//!
//! KML coordinates are `lon,lat[,alt]` tuples separated by whitespace; zones
//! store them as (lat, lon). Placemarks without usable polygon geometry are
//! skipped with a warning. Duplicate names are kept as separate zones.

use crate::domain::types::LatLon;
use crate::domain::zone::Zone;
use crate::infra::error::ZoneLoadError;
use roxmltree::{Document, Node};
use tracing::{debug, info, warn};

pub const KML_NS: &str = "http://www.opengis.net/kml/2.2";

/// Matches KML 2.2 elements, plus un-namespaced ones from hand-written files
fn is_kml(node: &Node, local: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local
        && matches!(node.tag_name().namespace(), None | Some(KML_NS))
}

/// Parse a KML document into zones, in document order
pub fn parse_kml(text: &str) -> Result<Vec<Zone>, ZoneLoadError> {
    let doc = Document::parse(text)?;

    let mut zones = Vec::new();
    let mut skipped = 0usize;

    for (index, placemark) in doc.descendants().filter(|n| is_kml(n, "Placemark")).enumerate() {
        let name = placemark_name(&placemark).ok_or(ZoneLoadError::MissingName { index })?;

        match placemark_zone(&placemark, name) {
            Ok(zone) => {
                debug!(zone = %zone.name(), vertices = %zone.boundary().len(), "zone_parsed");
                zones.push(zone);
            }
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "zone_skipped");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(zones = %zones.len(), skipped = %skipped, "zones_parsed");
    Ok(zones)
}

fn placemark_name<'a>(placemark: &Node<'a, '_>) -> Option<&'a str> {
    placemark
        .children()
        .find(|c| is_kml(c, "name"))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn placemark_zone(placemark: &Node, name: &str) -> Result<Zone, ZoneLoadError> {
    let malformed = |reason: &str| ZoneLoadError::MalformedGeometry {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let polygon = placemark
        .descendants()
        .find(|n| is_kml(n, "Polygon"))
        .ok_or_else(|| malformed("no Polygon"))?;

    // First <coordinates> in document order belongs to the outer boundary
    let coordinates = polygon
        .descendants()
        .find(|n| is_kml(n, "coordinates"))
        .ok_or_else(|| malformed("Polygon has no coordinates"))?;

    let ring = parse_coordinates(coordinates.text().unwrap_or_default())
        .map_err(|reason| malformed(&reason))?;

    Zone::new(name, ring)
}

/// Parse a KML coordinate list into (lat, lon) vertices
pub fn parse_coordinates(text: &str) -> Result<Vec<LatLon>, String> {
    text.split_whitespace().map(parse_tuple).collect()
}

fn parse_tuple(tuple: &str) -> Result<LatLon, String> {
    let mut parts = tuple.split(',');
    let lon = parse_component(parts.next(), tuple)?;
    let lat = parse_component(parts.next(), tuple)?;
    Ok(LatLon::new(lat, lon))
}

fn parse_component(part: Option<&str>, tuple: &str) -> Result<f64, String> {
    part.and_then(|p| p.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("bad coordinate tuple '{tuple}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    {body}
  </Document>
</kml>"#
        )
    }

    fn placemark(name: &str, coords: &str) -> String {
        format!(
            "<Placemark><name>{name}</name><Polygon><outerBoundaryIs><LinearRing>\
             <coordinates>{coords}</coordinates></LinearRing></outerBoundaryIs></Polygon></Placemark>"
        )
    }

    const SQUARE: &str = "5.70,58.96,0 5.72,58.96,0 5.72,58.98,0 5.70,58.98,0 5.70,58.96,0";

    #[test]
    fn test_parses_zone_and_swaps_axes() {
        let zones = parse_kml(&kml(&placemark("Sentrum", SQUARE))).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name(), "Sentrum");
        assert_eq!(zones[0].boundary()[0], LatLon::new(58.96, 5.70));
        assert_eq!(zones[0].boundary().len(), 5);
        assert!(zones[0].contains(LatLon::new(58.97, 5.71)));
    }

    #[test]
    fn test_keeps_document_order_and_duplicates() {
        let body = [placemark("B", SQUARE), placemark("A", SQUARE), placemark("B", SQUARE)].concat();
        let zones = parse_kml(&kml(&body)).unwrap();
        let names: Vec<_> = zones.iter().map(|z| z.name()).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
    }

    #[test]
    fn test_placemark_without_polygon_is_skipped() {
        let point = "<Placemark><name>Depot</name><Point><coordinates>5.7,58.9</coordinates></Point></Placemark>";
        let body = [point.to_string(), placemark("Sentrum", SQUARE)].concat();
        let zones = parse_kml(&kml(&body)).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name(), "Sentrum");
    }

    #[test]
    fn test_placemark_without_name_is_fatal() {
        let unnamed = "<Placemark><Polygon><outerBoundaryIs><LinearRing><coordinates>\
                       5.70,58.96 5.72,58.96 5.72,58.98</coordinates></LinearRing></outerBoundaryIs>\
                       </Polygon></Placemark>";
        let body = [placemark("Sentrum", SQUARE), unnamed.to_string()].concat();
        let err = parse_kml(&kml(&body)).unwrap_err();
        assert!(matches!(err, ZoneLoadError::MissingName { index: 1 }));
    }

    #[test]
    fn test_blank_name_is_fatal() {
        let err = parse_kml(&kml(&placemark("   ", SQUARE))).unwrap_err();
        assert!(matches!(err, ZoneLoadError::MissingName { index: 0 }));
    }

    #[test]
    fn test_inner_ring_is_ignored() {
        let with_hole = "<Placemark><name>Ring</name><Polygon>\
            <outerBoundaryIs><LinearRing><coordinates>0,0 10,0 10,10 0,10 0,0</coordinates></LinearRing></outerBoundaryIs>\
            <innerBoundaryIs><LinearRing><coordinates>4,4 6,4 6,6 4,6 4,4</coordinates></LinearRing></innerBoundaryIs>\
            </Polygon></Placemark>";
        let zones = parse_kml(&kml(with_hole)).unwrap();
        assert_eq!(zones[0].boundary().len(), 5);
        // Inside the hole still counts as inside the zone
        assert!(zones[0].contains(LatLon::new(5.0, 5.0)));
    }

    #[test]
    fn test_polygon_inside_multigeometry() {
        let multi = "<Placemark><name>Multi</name><MultiGeometry><Polygon><outerBoundaryIs><LinearRing>\
            <coordinates>0,0 2,0 2,2 0,2</coordinates></LinearRing></outerBoundaryIs></Polygon></MultiGeometry></Placemark>";
        let zones = parse_kml(&kml(multi)).unwrap();
        assert_eq!(zones.len(), 1);
        assert!(zones[0].contains(LatLon::new(1.0, 1.0)));
    }

    #[test]
    fn test_nested_folders() {
        let body = format!("<Folder><name>Ops</name><Folder>{}</Folder></Folder>", placemark("Deep", SQUARE));
        let zones = parse_kml(&kml(&body)).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name(), "Deep");
    }

    #[test]
    fn test_bad_coordinates_skip_zone() {
        let body = [placemark("Broken", "5.70,abc 5.72,58.96 5.72,58.98"), placemark("Ok", SQUARE)].concat();
        let zones = parse_kml(&kml(&body)).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name(), "Ok");
    }

    #[test]
    fn test_degenerate_ring_skips_zone() {
        let zones = parse_kml(&kml(&placemark("Sliver", "5.70,58.96 5.72,58.96"))).unwrap();
        assert!(zones.is_empty());
    }

    #[test]
    fn test_invalid_xml_is_fatal() {
        let err = parse_kml("<kml><Placemark>").unwrap_err();
        assert!(matches!(err, ZoneLoadError::Xml(_)));
    }

    #[test]
    fn test_parse_coordinates_ignores_altitude_and_whitespace() {
        let ring = parse_coordinates("\n   5.1,58.1,12.5\n\t5.2,58.2  ").unwrap();
        assert_eq!(ring, vec![LatLon::new(58.1, 5.1), LatLon::new(58.2, 5.2)]);
    }

    #[test]
    fn test_parse_coordinates_rejects_single_component() {
        assert!(parse_coordinates("5.1").is_err());
    }
}

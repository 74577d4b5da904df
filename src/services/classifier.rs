//! Point → zone classification
//!
//! Zones are tested in load order and the first containing zone wins, so
//! overlapping zones never double count. Containment is boundary-exclusive
//! (see `Zone::contains`).

use crate::domain::types::LatLon;
use crate::domain::zone::Zone;

/// Index of the first zone containing `point`, or None when out of zone
pub fn classify(point: LatLon, zones: &[Zone]) -> Option<usize> {
    zones.iter().position(|zone| zone.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(name: &str, lat0: f64, lon0: f64, lat1: f64, lon1: f64) -> Zone {
        Zone::new(
            name,
            vec![
                LatLon::new(lat0, lon0),
                LatLon::new(lat0, lon1),
                LatLon::new(lat1, lon1),
                LatLon::new(lat1, lon0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_point_inside_square() {
        let zones = vec![rect("Square", 0.0, 0.0, 2.0, 2.0)];
        assert_eq!(classify(LatLon::new(1.0, 1.0), &zones), Some(0));
    }

    #[test]
    fn test_point_outside_all_zones() {
        let zones = vec![rect("Square", 0.0, 0.0, 2.0, 2.0)];
        assert_eq!(classify(LatLon::new(10.0, 10.0), &zones), None);
    }

    #[test]
    fn test_no_zones() {
        assert_eq!(classify(LatLon::new(1.0, 1.0), &[]), None);
    }

    #[test]
    fn test_overlap_first_loaded_wins() {
        let zones = vec![
            rect("Harbour", 0.0, 0.0, 2.0, 2.0),
            rect("Centre", 1.0, 1.0, 3.0, 3.0),
        ];
        // (1.5, 1.5) lies in both
        assert_eq!(classify(LatLon::new(1.5, 1.5), &zones), Some(0));
        assert_eq!(classify(LatLon::new(2.5, 2.5), &zones), Some(1));

        let reversed: Vec<Zone> = zones.into_iter().rev().collect();
        assert_eq!(classify(LatLon::new(1.5, 1.5), &reversed), Some(0));
        assert_eq!(reversed[0].name(), "Centre");
    }

    #[test]
    fn test_point_on_shared_edge_is_out_of_zone() {
        let zones = vec![
            rect("West", 0.0, 0.0, 2.0, 1.0),
            rect("East", 0.0, 1.0, 2.0, 2.0),
        ];
        // On the shared edge lon = 1: in neither interior
        assert_eq!(classify(LatLon::new(1.0, 1.0), &zones), None);
        assert_eq!(classify(LatLon::new(1.0, 1.5), &zones), Some(1));
    }

    #[test]
    fn test_axis_order_matters() {
        // Tall thin zone: lat 0..10, lon 0..1
        let zones = vec![rect("Strip", 0.0, 0.0, 10.0, 1.0)];
        assert_eq!(classify(LatLon::new(5.0, 0.5), &zones), Some(0));
        assert_eq!(classify(LatLon::new(0.5, 5.0), &zones), None);
    }
}

//! Geographic coordinates and metric distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint { latitude, longitude }
    }

    /// Whether the pair lies inside the WGS84 envelope.
    pub fn in_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other` in meters (haversine).
    ///
    /// A metric measure, never raw degree deltas: one degree of longitude
    /// shrinks with latitude, and proximity thresholds are stated in meters.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let lat_a = self.latitude.to_radians();
        let lat_b = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = GeoPoint::new(40.7128, -74.0060);
        assert_eq!(p.distance_meters(&p), 0.0);
    }

    #[test]
    fn a_block_apart_is_well_inside_a_hundred_meters() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let b = GeoPoint::new(40.7129, -74.0061);
        let d = a.distance_meters(&b);
        assert!(d > 0.0 && d < 100.0, "expected tens of meters, got {d}");
    }

    #[test]
    fn a_thousandth_of_latitude_is_over_a_hundred_meters() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let b = GeoPoint::new(40.7138, -74.0060);
        let d = a.distance_meters(&b);
        assert!((100.0..150.0).contains(&d), "expected ~111 m, got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(51.5074, -0.1278);
        let b = GeoPoint::new(48.8566, 2.3522);
        let there = a.distance_meters(&b);
        let back = b.distance_meters(&a);
        assert!((there - back).abs() < 1e-6);
        assert!((300_000.0..400_000.0).contains(&there), "London to Paris, got {there}");
    }

    #[test]
    fn bounds_reject_out_of_range_pairs() {
        assert!(GeoPoint::new(90.0, 180.0).in_bounds());
        assert!(GeoPoint::new(-90.0, -180.0).in_bounds());
        assert!(!GeoPoint::new(90.1, 0.0).in_bounds());
        assert!(!GeoPoint::new(0.0, -180.5).in_bounds());
    }
}

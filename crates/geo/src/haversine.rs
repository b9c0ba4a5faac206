//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. The Earth is treated as a
//! sphere of fixed mean radius.

use crate::GeoPoint;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two points in meters.
///
/// Pure and deterministic. Callers are responsible for passing valid
/// latitude/longitude values; any real input produces a finite result.
///
/// # Example
/// ```
/// use rideshare_geo::{distance_meters, GeoPoint};
///
/// let a = GeoPoint::new(0.0, 0.0);
/// let b = GeoPoint::new(0.0, 1.0);
///
/// // One degree of longitude at the equator is ~111.2 km
/// assert!((distance_meters(&a, &b) - 111_195.0).abs() < 1.0);
/// ```
#[inline]
pub fn distance_meters(from: &GeoPoint, to: &GeoPoint) -> f64 {
    haversine_with_radius(from, to, EARTH_RADIUS_M)
}

/// Calculates the great-circle distance between two points in kilometers.
#[inline]
pub fn distance_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    haversine_with_radius(from, to, EARTH_RADIUS_KM)
}

#[inline]
fn haversine_with_radius(from: &GeoPoint, to: &GeoPoint, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

/// Cumulative length of a path, summing consecutive-point Haversine distances.
///
/// Returns 0 for paths with fewer than two points.
pub fn path_length_meters(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_meters(&pair[0], &pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BENGALURU: GeoPoint = GeoPoint::new(12.9716, 77.5946);
    const MYSURU: GeoPoint = GeoPoint::new(12.2958, 76.6394);
    const CHENNAI: GeoPoint = GeoPoint::new(13.0827, 80.2707);
    const MUMBAI: GeoPoint = GeoPoint::new(19.0760, 72.8777);

    #[test]
    fn test_bengaluru_to_mysuru() {
        let distance = distance_km(&BENGALURU, &MYSURU);
        // Expected: ~127 km as the crow flies
        assert!((distance - 127.0).abs() < 5.0, "Bengaluru-Mysuru: {}", distance);
    }

    #[test]
    fn test_bengaluru_to_mumbai() {
        let distance = distance_km(&BENGALURU, &MUMBAI);
        // Expected: ~845 km
        assert!((distance - 845.0).abs() < 15.0, "Bengaluru-Mumbai: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert!(distance_meters(&CHENNAI, &CHENNAI).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let d1 = distance_meters(&BENGALURU, &CHENNAI);
        let d2 = distance_meters(&CHENNAI, &BENGALURU);
        assert!((d1 - d2).abs() < 1e-6);
    }

    #[test]
    fn test_meters_conversion() {
        let km = distance_km(&BENGALURU, &CHENNAI);
        let meters = distance_meters(&BENGALURU, &CHENNAI);
        assert!((meters - km * 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_path_length_sums_legs() {
        let path = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 2.0)];
        let direct = distance_meters(&path[0], &path[2]);
        let summed = path_length_meters(&path);
        assert!((summed - 2.0 * distance_meters(&path[0], &path[1])).abs() < 1e-6);
        // Collinear along the equator, so the path equals the straight line
        assert!((summed - direct).abs() < 1e-3);
    }

    #[test]
    fn test_path_length_detour_is_longer() {
        let path = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0), GeoPoint::new(0.0, 2.0)];
        assert!(path_length_meters(&path) > distance_meters(&path[0], &path[2]));
    }

    #[test]
    fn test_path_length_degenerate() {
        assert_eq!(path_length_meters(&[]), 0.0);
        assert_eq!(path_length_meters(&[BENGALURU]), 0.0);
    }
}

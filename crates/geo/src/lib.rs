//! Geospatial primitives for ride search.
//!
//! This crate provides:
//! - The [`GeoPoint`] value type
//! - Haversine great-circle distances
//! - Encoded polyline decoding and encoding
//! - Path length along an ordered coordinate sequence
//!
//! # Example
//!
//! ```
//! use rideshare_geo::{distance_meters, GeoPoint};
//!
//! let bengaluru = GeoPoint::new(12.9716, 77.5946);
//! let mysuru = GeoPoint::new(12.2958, 76.6394);
//!
//! let distance = distance_meters(&bengaluru, &mysuru);
//! assert!((distance - 127_000.0).abs() < 5_000.0);
//! ```

mod error;
mod haversine;
pub mod polyline;

pub use error::{DecodeFailure, GeoError, GeoErrorCode, Result};
pub use haversine::{distance_km, distance_meters, path_length_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use polyline::{decode, decode_with_precision, encode, encode_with_precision, DEFAULT_PRECISION};

/// A geographic coordinate with latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new point.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if the point lies within valid latitude/longitude ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Checks validity, returning the point or an error describing it.
    pub fn validated(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GeoError::InvalidCoordinate(format!("({}, {})", self.lat, self.lng)))
        }
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let point = GeoPoint::new(12.9716, 77.5946);
        assert_eq!(point.lat, 12.9716);
        assert_eq!(point.lng, 77.5946);
    }

    #[test]
    fn test_point_validation() {
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(matches!(
            GeoPoint::new(0.0, 181.0).validated(),
            Err(GeoError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_point_from_tuple() {
        let point: GeoPoint = (12.9716, 77.5946).into();
        assert_eq!(point.lat, 12.9716);
        assert_eq!(point.lng, 77.5946);
    }

    #[test]
    fn test_point_display() {
        assert_eq!(GeoPoint::new(12.97161, 77.59456).to_string(), "12.97161,77.59456");
    }
}

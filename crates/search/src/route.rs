//! Posted rides and their routes.

use chrono::NaiveDate;
use rideshare_geo::{polyline, GeoPoint};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Route geometry as delivered by the routing collaborator.
///
/// Point order is the travel direction from ride start to ride end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteGeometry {
    /// Encoded polyline; `precision` falls back to the engine default when absent
    Encoded {
        /// The encoded string
        polyline: String,
        /// Decimal places used by the encoder
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<u32>,
    },
    /// Already decoded coordinates
    Coordinates {
        /// Ordered route points
        points: Vec<GeoPoint>,
    },
}

/// How a ride is priced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PricingMode {
    /// One declared price per seat for any covered journey
    Fixed,
    /// Charged by the kilometre of the passenger's segment
    PerKm {
        /// Price per kilometre per seat
        rate: f64,
    },
}

/// A posted ride's route and pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Polyline or coordinates
    pub geometry: RouteGeometry,
    /// Full route length reported by the routing collaborator
    pub total_distance_meters: f64,
    /// Declared per-seat fare for the whole trip
    pub base_fare_per_seat: f64,
    /// Pricing policy
    pub pricing: PricingMode,
}

impl Route {
    /// A fixed-price route over decoded points.
    pub fn fixed(points: Vec<GeoPoint>, total_distance_meters: f64, fare_per_seat: f64) -> Self {
        Self {
            geometry: RouteGeometry::Coordinates { points },
            total_distance_meters,
            base_fare_per_seat: fare_per_seat,
            pricing: PricingMode::Fixed,
        }
    }

    /// A per-kilometre route over decoded points.
    pub fn per_km(points: Vec<GeoPoint>, total_distance_meters: f64, base_fare: f64, rate: f64) -> Self {
        Self {
            geometry: RouteGeometry::Coordinates { points },
            total_distance_meters,
            base_fare_per_seat: base_fare,
            pricing: PricingMode::PerKm { rate },
        }
    }

    /// Replaces the geometry with an encoded polyline.
    #[must_use]
    pub fn with_polyline(mut self, encoded: impl Into<String>, precision: Option<u32>) -> Self {
        self.geometry = RouteGeometry::Encoded {
            polyline: encoded.into(),
            precision,
        };
        self
    }

    /// The route's points, decoding the polyline if necessary.
    ///
    /// `default_precision` applies to polylines that do not carry their own.
    pub fn points(&self, default_precision: u32) -> rideshare_geo::Result<Cow<'_, [GeoPoint]>> {
        match &self.geometry {
            RouteGeometry::Coordinates { points } => Ok(Cow::Borrowed(points.as_slice())),
            RouteGeometry::Encoded { polyline, precision } => {
                let precision = precision.unwrap_or(default_precision);
                polyline::decode_with_precision(polyline, precision).map(Cow::Owned)
            }
        }
    }

    /// Converts an encoded geometry into decoded coordinates in place.
    pub fn decode_in_place(&mut self, default_precision: u32) -> rideshare_geo::Result<()> {
        if let RouteGeometry::Encoded { .. } = self.geometry {
            let points = self.points(default_precision)?.into_owned();
            self.geometry = RouteGeometry::Coordinates { points };
        }
        Ok(())
    }

    /// True when the geometry is already decoded.
    pub fn is_decoded(&self) -> bool {
        matches!(self.geometry, RouteGeometry::Coordinates { .. })
    }
}

/// Vehicle categories drivers choose from when posting a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum VehicleType {
    Hatchback,
    Sedan,
    Suv,
    Muv,
    Bike,
}

/// Amenity flags a ride may advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Amenity {
    AirConditioning,
    Music,
    PetFriendly,
    Luggage,
    NoSmoking,
    WomenOnly,
}

/// Ride attributes used by post-filters and the city-pair fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideDetails {
    /// Seats still bookable
    pub seats_available: u32,
    /// Vehicle category, when declared
    pub vehicle_type: Option<VehicleType>,
    /// Advertised amenities
    pub amenities: BTreeSet<Amenity>,
    /// City the ride starts from, as entered by the driver
    pub origin_city: String,
    /// City the ride ends in, as entered by the driver
    pub destination_city: String,
    /// Day of departure
    pub departure_date: Option<NaiveDate>,
}

/// A posted ride as handed over by the candidate-loading collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideCandidate {
    /// Ride identifier
    pub ride_id: String,
    /// Route and pricing
    pub route: Route,
    /// Filterable attributes
    #[serde(default)]
    pub details: RideDetails,
}

impl RideCandidate {
    /// A candidate with default details.
    pub fn new(ride_id: impl Into<String>, route: Route) -> Self {
        Self {
            ride_id: ride_id.into(),
            route,
            details: RideDetails::default(),
        }
    }

    /// Replaces the ride details.
    #[must_use]
    pub fn with_details(mut self, details: RideDetails) -> Self {
        self.details = details;
        self
    }
}

//! Fare computation for partial-route bookings.

use crate::error::{Result, SearchError};
use crate::matcher::RouteMatch;
use crate::route::{PricingMode, Route};
use rideshare_core::config::FareConfig;
use serde::{Deserialize, Serialize};

/// Per-seat fare owed for the matched segment of a route.
///
/// - `Fixed`: the declared per-seat fare, whatever the segment.
/// - `PerKm`: `rate * segment_km`, prorated strictly by the matched segment.
///
/// Per-km pricing needs a positive `total_distance_meters` and a
/// non-negative rate; otherwise the route is rejected with
/// [`SearchError::InvalidRoute`].
pub fn compute_segment_fare(route: &Route, route_match: &RouteMatch) -> Result<f64> {
    match route.pricing {
        PricingMode::Fixed => Ok(route.base_fare_per_seat),
        PricingMode::PerKm { rate } => {
            if !(route.total_distance_meters > 0.0) {
                return Err(SearchError::invalid_route(format!(
                    "per-km pricing needs a positive route distance, got {}",
                    route.total_distance_meters
                )));
            }
            if !rate.is_finite() || rate < 0.0 {
                return Err(SearchError::invalid_route(format!("per-km rate {rate} is not usable")));
            }
            Ok(rate * (route_match.segment_distance_meters / 1000.0))
        }
    }
}

/// Booking fee policy applied on top of the driver's fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FarePolicy {
    /// Flat fee per booked seat
    pub platform_fee_per_seat: f64,
    /// GST applied to the platform fee
    pub gst_rate: f64,
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self::from(&FareConfig::default())
    }
}

impl From<&FareConfig> for FarePolicy {
    fn from(config: &FareConfig) -> Self {
        Self {
            platform_fee_per_seat: config.platform_fee_per_seat,
            gst_rate: config.gst_rate,
        }
    }
}

/// Price breakdown for booking some seats on a ride.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    /// Fare per seat for the matched segment
    pub fare_per_seat: f64,
    /// Seats booked
    pub seats: u32,
    /// Driver's share: fare per seat times seats
    pub subtotal: f64,
    /// Platform fee for all seats
    pub platform_fee: f64,
    /// GST on the platform fee
    pub gst: f64,
    /// What the passenger pays
    pub total: f64,
}

/// Splits a booking into driver share, platform fee and GST.
///
/// Every amount is rounded to two decimal places.
pub fn quote_booking(fare_per_seat: f64, seats: u32, policy: &FarePolicy) -> Result<FareQuote> {
    if seats == 0 {
        return Err(SearchError::InvalidQuery("a booking needs at least one seat".into()));
    }

    let seat_count = f64::from(seats);
    let subtotal = round_currency(fare_per_seat * seat_count);
    let platform_fee = round_currency(policy.platform_fee_per_seat * seat_count);
    let gst = round_currency(platform_fee * policy.gst_rate);

    Ok(FareQuote {
        fare_per_seat: round_currency(fare_per_seat),
        seats,
        subtotal,
        platform_fee,
        gst,
        total: round_currency(subtotal + platform_fee + gst),
    })
}

/// Rounds to the nearest hundredth, halves away from zero.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchAnchor;
    use rideshare_geo::GeoPoint;

    fn route_match(segment_distance_meters: f64) -> RouteMatch {
        let anchor = |route_index| MatchAnchor {
            point: GeoPoint::new(0.0, 0.0),
            distance_meters: 0.0,
            route_index,
        };
        RouteMatch {
            origin_anchor: anchor(0),
            destination_anchor: anchor(1),
            segment: vec![],
            segment_distance_meters,
        }
    }

    #[test]
    fn test_per_km_fare_scenario() {
        let route = Route::per_km(vec![], 100_000.0, 0.0, 5.0);
        let fare = compute_segment_fare(&route, &route_match(20_000.0)).unwrap();
        assert_eq!(fare, 100.0);
    }

    #[test]
    fn test_per_km_is_exact_product() {
        let route = Route::per_km(vec![], 250_000.0, 0.0, 3.7);
        let distance = 12_345.678;
        let fare = compute_segment_fare(&route, &route_match(distance)).unwrap();
        assert_eq!(fare, 3.7 * (distance / 1000.0));
    }

    #[test]
    fn test_fixed_fare_invariant_to_segment() {
        let route = Route::fixed(vec![], 100_000.0, 350.0);
        for distance in [1.0, 5_000.0, 99_999.0] {
            assert_eq!(compute_segment_fare(&route, &route_match(distance)).unwrap(), 350.0);
        }
    }

    #[test]
    fn test_fixed_fare_ignores_missing_distance() {
        let route = Route::fixed(vec![], 0.0, 350.0);
        assert_eq!(compute_segment_fare(&route, &route_match(10.0)).unwrap(), 350.0);
    }

    #[test]
    fn test_per_km_requires_route_distance() {
        for total in [0.0, -1.0, f64::NAN] {
            let route = Route::per_km(vec![], total, 0.0, 5.0);
            let err = compute_segment_fare(&route, &route_match(20_000.0)).unwrap_err();
            assert!(matches!(err, SearchError::InvalidRoute(_)));
        }
    }

    #[test]
    fn test_per_km_rejects_negative_rate() {
        let route = Route::per_km(vec![], 1000.0, 0.0, -2.0);
        assert!(compute_segment_fare(&route, &route_match(500.0)).is_err());
    }

    #[test]
    fn test_quote_breakdown() {
        let quote = quote_booking(100.0, 2, &FarePolicy::default()).unwrap();
        assert_eq!(quote.subtotal, 200.0);
        assert_eq!(quote.platform_fee, 20.0);
        assert_eq!(quote.gst, 3.6);
        assert_eq!(quote.total, 223.6);
    }

    #[test]
    fn test_quote_rounds_to_paise() {
        let policy = FarePolicy {
            platform_fee_per_seat: 10.0,
            gst_rate: 0.18,
        };
        let quote = quote_booking(33.333, 3, &policy).unwrap();
        assert_eq!(quote.fare_per_seat, 33.33);
        assert_eq!(quote.subtotal, 100.0);
        assert_eq!(quote.gst, 5.4);
    }

    #[test]
    fn test_quote_rejects_zero_seats() {
        assert!(matches!(
            quote_booking(100.0, 0, &FarePolicy::default()),
            Err(SearchError::InvalidQuery(_))
        ));
    }
}

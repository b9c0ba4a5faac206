//! Post-classification filters.
//!
//! Filters run after classification and treat `Connected` and `Other`
//! candidates identically. The city-name fallback for `Other` candidates is
//! also applied here, never inside the geometric matcher.

use crate::classify::SearchCandidate;
use crate::relevance::same_place;
use crate::route::{Amenity, VehicleType};
use rideshare_core::config::OtherResults;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Caller-declared result filters. Unset fields accept everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Ride must have at least this many free seats
    pub min_seats: Option<u32>,
    /// Per-seat fare must not exceed this
    pub max_fare: Option<f64>,
    /// Ride must use this vehicle type
    pub vehicle_type: Option<VehicleType>,
    /// Ride must advertise every one of these
    pub amenities: BTreeSet<Amenity>,
}

impl SearchFilters {
    /// No filtering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require free seats.
    #[must_use]
    pub fn with_min_seats(mut self, seats: u32) -> Self {
        self.min_seats = Some(seats);
        self
    }

    /// Cap the per-seat fare.
    #[must_use]
    pub fn with_max_fare(mut self, fare: f64) -> Self {
        self.max_fare = Some(fare);
        self
    }

    /// Require a vehicle type.
    #[must_use]
    pub fn with_vehicle_type(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = Some(vehicle_type);
        self
    }

    /// Require an amenity.
    #[must_use]
    pub fn with_amenity(mut self, amenity: Amenity) -> Self {
        self.amenities.insert(amenity);
        self
    }

    /// True when no filter is set.
    pub fn is_empty(&self) -> bool {
        self.min_seats.is_none()
            && self.max_fare.is_none()
            && self.vehicle_type.is_none()
            && self.amenities.is_empty()
    }

    /// Whether a candidate passes every declared filter.
    ///
    /// The fare compared against `max_fare` is the segment fare for connected
    /// candidates and the declared per-seat fare otherwise.
    pub fn accepts(&self, candidate: &SearchCandidate) -> bool {
        let details = &candidate.ride.details;

        if self.min_seats.is_some_and(|seats| details.seats_available < seats) {
            return false;
        }

        if let Some(max_fare) = self.max_fare {
            let fare = candidate
                .segment_fare
                .unwrap_or(candidate.ride.route.base_fare_per_seat);
            if fare > max_fare {
                return false;
            }
        }

        if self.vehicle_type.is_some() && details.vehicle_type != self.vehicle_type {
            return false;
        }

        self.amenities.is_subset(&details.amenities)
    }
}

/// Applies the fallback policy to `Other` candidates; `Connected` ones always stay.
pub fn retain_other_results(
    candidates: &mut Vec<SearchCandidate>,
    policy: OtherResults,
    origin_text: &str,
    destination_text: &str,
) {
    match policy {
        OtherResults::KeepAll => {}
        OtherResults::Drop => candidates.retain(SearchCandidate::is_connected),
        OtherResults::SameCityPair => candidates.retain(|c| {
            c.is_connected()
                || (same_place(&c.ride.details.origin_city, origin_text)
                    && same_place(&c.ride.details.destination_city, destination_text))
        }),
    }
}

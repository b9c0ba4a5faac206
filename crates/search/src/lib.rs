//! Route-match search for shared rides.
//!
//! Given a passenger's origin and destination, decides which posted rides
//! cover the journey in travel order, ranks them, and prices the segment the
//! passenger actually rides.
//!
//! This crate provides:
//! - Route model with encoded or decoded geometry and fixed or per-km pricing
//! - Anchor matching and segment extraction
//! - Segment fares and booking quotes
//! - Candidate classification (sequential or on the rayon pool)
//! - Post-filters and place-name relevance
//! - Async collaborator seams for geocoding and ride loading
//!
//! # Example
//!
//! ```
//! use rideshare_search::{classify, RideCandidate, Route};
//! use rideshare_geo::GeoPoint;
//!
//! let route = Route::fixed(
//!     vec![GeoPoint::new(12.0, 77.0), GeoPoint::new(12.0, 77.1), GeoPoint::new(12.0, 77.2)],
//!     21_700.0,
//!     120.0,
//! );
//! let rides = vec![RideCandidate::new("ride-1", route)];
//!
//! let result = classify(&rides, &GeoPoint::new(12.0, 77.0), &GeoPoint::new(12.0, 77.2), 3000.0);
//! assert_eq!(result.connected_count(), 1);
//! assert_eq!(result.candidates[0].segment_fare, Some(120.0));
//! ```

mod cancel;
mod classify;
mod error;
mod fare;
mod filters;
mod fuzzy;
mod geocode;
mod matcher;
mod orchestrator;
mod relevance;
mod route;
mod segment;
mod source;

pub use cancel::CancellationToken;
pub use classify::{
    classify, classify_with, match_quality, CandidateIssue, Classification, ClassifyOptions, MatchType,
    SearchCandidate,
};
pub use error::{Endpoint, GeocodeError, Result, SearchError, SearchErrorCode};
pub use fare::{compute_segment_fare, quote_booking, round_currency, FarePolicy, FareQuote};
pub use filters::{retain_other_results, SearchFilters};
pub use fuzzy::{fuzzy_match, levenshtein_distance, normalize_place};
pub use geocode::{Geocoder, Place, StaticGeocoder};
pub use matcher::{find_anchor, match_route, MatchAnchor, RouteMatch, DEFAULT_TOLERANCE_METERS};
pub use orchestrator::{prepare_candidates, search, SearchOptions, SearchOutcome, SearchQuery};
pub use relevance::{place_relevance, same_place, PlaceRelevance};
pub use route::{Amenity, PricingMode, RideCandidate, RideDetails, Route, RouteGeometry, VehicleType};
pub use segment::{extract_segment, Segment};
pub use source::{CandidateSource, InMemoryRides};

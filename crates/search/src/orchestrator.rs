//! End-to-end search: resolve the journey, load rides, classify, filter.

use crate::cancel::CancellationToken;
use crate::classify::{classify_with, CandidateIssue, ClassifyOptions, SearchCandidate};
use crate::error::{Endpoint, Result, SearchError};
use crate::fare::{quote_booking, FarePolicy};
use crate::filters::{retain_other_results, SearchFilters};
use crate::geocode::Geocoder;
use crate::matcher::DEFAULT_TOLERANCE_METERS;
use crate::route::RideCandidate;
use crate::source::CandidateSource;
use chrono::NaiveDate;
use rideshare_core::config::{EngineConfig, OtherResults};
use rideshare_geo::{GeoPoint, DEFAULT_PRECISION};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What the passenger asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text boarding place
    pub origin_text: String,
    /// Free-text alighting place
    pub destination_text: String,
    /// Travel day, if the passenger picked one
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Post-classification filters
    #[serde(default)]
    pub filters: SearchFilters,
}

impl SearchQuery {
    /// A query with no date and no filters.
    pub fn new(origin_text: impl Into<String>, destination_text: impl Into<String>) -> Self {
        Self {
            origin_text: origin_text.into(),
            destination_text: destination_text.into(),
            date: None,
            filters: SearchFilters::default(),
        }
    }

    /// Restrict to rides departing on `date`.
    #[must_use]
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Replace the filters.
    #[must_use]
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Rejects blank place text, a zero seat count, and unusable fare caps.
    pub fn validate(&self) -> Result<()> {
        if self.origin_text.trim().is_empty() {
            return Err(SearchError::InvalidQuery("origin is empty".into()));
        }
        if self.destination_text.trim().is_empty() {
            return Err(SearchError::InvalidQuery("destination is empty".into()));
        }
        if self.filters.min_seats == Some(0) {
            return Err(SearchError::InvalidQuery("seat count must be at least 1".into()));
        }
        if let Some(max_fare) = self.filters.max_fare {
            if !max_fare.is_finite() || max_fare < 0.0 {
                return Err(SearchError::InvalidQuery(format!("max fare {max_fare} is not usable")));
            }
        }
        Ok(())
    }
}

/// Engine tuning for a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Maximum anchor distance in meters
    pub tolerance_meters: f64,
    /// Precision for polylines that do not carry one
    pub default_precision: u32,
    /// Classify on the rayon pool
    pub parallel: bool,
    /// What happens to unmatched candidates
    pub other_results: OtherResults,
    /// Booking fees used for quotes
    pub fare_policy: FarePolicy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            tolerance_meters: DEFAULT_TOLERANCE_METERS,
            default_precision: DEFAULT_PRECISION,
            parallel: true,
            other_results: OtherResults::default(),
            fare_policy: FarePolicy::default(),
        }
    }
}

impl From<&EngineConfig> for SearchOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            tolerance_meters: config.matching.tolerance_meters,
            default_precision: config.matching.polyline_precision,
            parallel: config.search.parallel,
            other_results: config.search.other_results,
            fare_policy: FarePolicy::from(&config.fare),
        }
    }
}

impl SearchOptions {
    /// Set the anchor tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, meters: f64) -> Self {
        self.tolerance_meters = meters;
        self
    }

    /// Set the default polyline precision.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.default_precision = precision;
        self
    }

    /// Toggle parallel classification.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the fallback policy for unmatched candidates.
    #[must_use]
    pub fn with_other_results(mut self, policy: OtherResults) -> Self {
        self.other_results = policy;
        self
    }

    /// Set the booking fee policy.
    #[must_use]
    pub fn with_fare_policy(mut self, policy: FarePolicy) -> Self {
        self.fare_policy = policy;
        self
    }

    /// Rejects a tolerance that is not a positive finite distance.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance_meters.is_finite() || self.tolerance_meters <= 0.0 {
            return Err(SearchError::InvalidQuery(format!(
                "tolerance {} m is not a usable distance",
                self.tolerance_meters
            )));
        }
        Ok(())
    }

    fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            tolerance_meters: self.tolerance_meters,
            default_precision: self.default_precision,
            parallel: self.parallel,
        }
    }
}

/// Result of a completed search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Resolved boarding point
    pub origin: GeoPoint,
    /// Resolved alighting point
    pub destination: GeoPoint,
    /// Connected results by quality, then other results
    pub results: Vec<SearchCandidate>,
    /// Candidates excluded or downgraded by a contained failure
    pub issues: Vec<CandidateIssue>,
}

impl SearchOutcome {
    /// Connected results, best first.
    pub fn connected(&self) -> impl Iterator<Item = &SearchCandidate> {
        self.results.iter().filter(|c| c.is_connected())
    }

    /// Fallback results in load order.
    pub fn others(&self) -> impl Iterator<Item = &SearchCandidate> {
        self.results.iter().filter(|c| !c.is_connected())
    }

    /// Number of connected results.
    pub fn connected_count(&self) -> usize {
        self.connected().count()
    }
}

/// Decodes every encoded route up front.
///
/// A ride whose polyline fails to decode is left out and reported as an
/// issue; the others are returned in their original order with coordinate
/// geometry.
pub fn prepare_candidates(
    rides: Vec<RideCandidate>,
    default_precision: u32,
    cancel: &CancellationToken,
) -> Result<(Vec<RideCandidate>, Vec<CandidateIssue>)> {
    let mut prepared = Vec::with_capacity(rides.len());
    let mut issues = Vec::new();

    for mut ride in rides {
        cancel.check()?;
        match ride.route.decode_in_place(default_precision) {
            Ok(()) => prepared.push(ride),
            Err(err) => {
                warn!(ride_id = %ride.ride_id, error = %err, "excluding ride with undecodable route");
                issues.push(CandidateIssue::contain(&ride.ride_id, err.into())?);
            }
        }
    }

    Ok((prepared, issues))
}

/// Runs one search.
///
/// Each collaborator is awaited at most once and never retried. The
/// cancellation token is checked between phases and between candidates; a
/// cancelled search fails with [`SearchError::Cancelled`]. When the filters
/// name a seat count, connected results carry a booking quote for it.
#[tracing::instrument(
    skip_all,
    fields(origin = %query.origin_text, destination = %query.destination_text)
)]
pub async fn search<G, S>(
    query: &SearchQuery,
    geocoder: &G,
    source: &S,
    options: &SearchOptions,
    cancel: &CancellationToken,
) -> Result<SearchOutcome>
where
    G: Geocoder,
    S: CandidateSource,
{
    query.validate()?;
    options.validate()?;
    cancel.check()?;

    let origin = geocoder
        .resolve(&query.origin_text)
        .await
        .map_err(|source| SearchError::Geocode {
            endpoint: Endpoint::Origin,
            source,
        })?;
    cancel.check()?;

    let destination = geocoder
        .resolve(&query.destination_text)
        .await
        .map_err(|source| SearchError::Geocode {
            endpoint: Endpoint::Destination,
            source,
        })?;
    cancel.check()?;

    let rides = source.load(query.date).await?;
    cancel.check()?;
    let loaded = rides.len();

    let (rides, mut issues) = prepare_candidates(rides, options.default_precision, cancel)?;
    let classification = classify_with(&rides, &origin, &destination, &options.classify_options(), cancel)?;
    issues.extend(classification.issues);

    let mut results = classification.candidates;
    retain_other_results(
        &mut results,
        options.other_results,
        &query.origin_text,
        &query.destination_text,
    );
    results.retain(|candidate| query.filters.accepts(candidate));

    if let Some(seats) = query.filters.min_seats {
        for candidate in &mut results {
            if let Some(fare) = candidate.segment_fare {
                candidate.quote = Some(quote_booking(fare, seats, &options.fare_policy)?);
            }
        }
    }

    let outcome = SearchOutcome {
        origin,
        destination,
        results,
        issues,
    };
    info!(
        loaded,
        connected = outcome.connected_count(),
        returned = outcome.results.len(),
        issues = outcome.issues.len(),
        "search complete"
    );
    Ok(outcome)
}

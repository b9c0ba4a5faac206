//! Candidate classification: connected routes first, everything else after.
//!
//! Every input candidate comes back exactly once, labelled `Connected` when a
//! valid [`RouteMatch`] exists and its fare could be computed, `Other`
//! otherwise. Per-candidate failures (undecodable polyline, route unusable
//! for fare proration) degrade that candidate to `Other` and are reported in
//! [`Classification::issues`].

use crate::cancel::CancellationToken;
use crate::error::{Result, SearchError};
use crate::fare::{compute_segment_fare, FareQuote};
use crate::matcher::{match_route, RouteMatch, DEFAULT_TOLERANCE_METERS};
use crate::route::RideCandidate;
use rideshare_core::error::{Error as CoreError, ErrorReport};
use rideshare_geo::{GeoPoint, DEFAULT_PRECISION};
use serde::Serialize;
use tracing::{debug, warn};

/// Classification tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Both ends anchored, in travel order
    Connected,
    /// No valid geometric match; a possible fallback result
    Other,
}

/// A ride plus its computed match outcome.
#[derive(Debug, Clone, Serialize)]
pub struct SearchCandidate {
    /// The ride as loaded
    pub ride: RideCandidate,
    /// Tier
    pub match_type: MatchType,
    /// Ranking score in `[0, 1]`, higher when anchors sit closer to the query
    pub match_quality: f64,
    /// Present iff `match_type` is `Connected`
    pub route_match: Option<RouteMatch>,
    /// Per-seat fare for the matched segment, present iff `Connected`
    pub segment_fare: Option<f64>,
    /// Booking breakdown for the requested seats, when a seat count was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<FareQuote>,
}

impl SearchCandidate {
    fn other(ride: &RideCandidate) -> Self {
        Self {
            ride: ride.clone(),
            match_type: MatchType::Other,
            match_quality: 0.0,
            route_match: None,
            segment_fare: None,
            quote: None,
        }
    }

    /// The ride identifier.
    pub fn ride_id(&self) -> &str {
        &self.ride.ride_id
    }

    /// True for `Connected` candidates.
    pub fn is_connected(&self) -> bool {
        self.match_type == MatchType::Connected
    }
}

/// A contained failure tied to a single candidate.
#[derive(Debug)]
pub struct CandidateIssue {
    /// Ride the failure belongs to
    pub ride_id: String,
    /// What went wrong
    pub error: SearchError,
}

impl CandidateIssue {
    /// Contains `error` as an issue of one ride.
    ///
    /// Errors that concern the whole query are handed back so the caller can
    /// propagate them instead.
    pub(crate) fn contain(ride_id: &str, error: SearchError) -> Result<Self> {
        if !error.is_candidate_scoped() {
            return Err(error);
        }
        Ok(Self {
            ride_id: ride_id.to_string(),
            error,
        })
    }

    /// Serializable report for logs and API responses.
    pub fn report(&self) -> ErrorReport {
        CoreError::new(self.error.error_code(), self.error.to_string())
            .with_context(format!("ride {}", self.ride_id))
            .to_report()
    }
}

/// Output of [`classify`].
#[derive(Debug, Default)]
pub struct Classification {
    /// Connected candidates by quality, then other candidates in input order
    pub candidates: Vec<SearchCandidate>,
    /// Failures contained to single candidates, in input order
    pub issues: Vec<CandidateIssue>,
}

impl Classification {
    /// Number of connected candidates.
    pub fn connected_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_connected()).count()
    }
}

/// Tuning for a classification run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifyOptions {
    /// Maximum anchor distance
    pub tolerance_meters: f64,
    /// Precision for polylines that do not carry one
    pub default_precision: u32,
    /// Evaluate candidates on the rayon pool
    pub parallel: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            tolerance_meters: DEFAULT_TOLERANCE_METERS,
            default_precision: DEFAULT_PRECISION,
            parallel: true,
        }
    }
}

/// Classifies candidates against a journey.
///
/// Output length always equals input length.
pub fn classify(
    candidates: &[RideCandidate],
    origin: &GeoPoint,
    destination: &GeoPoint,
    tolerance_meters: f64,
) -> Classification {
    let options = ClassifyOptions {
        tolerance_meters,
        ..ClassifyOptions::default()
    };
    let evaluated = candidates
        .iter()
        .enumerate()
        .map(|(index, ride)| {
            evaluate(index, ride, origin, destination, &options).unwrap_or_else(|err| {
                warn!(ride_id = %ride.ride_id, error = %err, "unexpected failure, ride kept as other");
                Evaluated {
                    index,
                    candidate: SearchCandidate::other(ride),
                    issue: None,
                }
            })
        })
        .collect();
    rank(evaluated)
}

/// Classifies candidates, honouring `options.parallel` and `cancel`.
///
/// The cancellation flag is checked before each candidate; once it is set the
/// whole run fails with [`SearchError::Cancelled`].
pub fn classify_with(
    candidates: &[RideCandidate],
    origin: &GeoPoint,
    destination: &GeoPoint,
    options: &ClassifyOptions,
    cancel: &CancellationToken,
) -> Result<Classification> {
    let evaluated = evaluate_all(candidates, origin, destination, options, cancel)?;
    cancel.check()?;
    Ok(rank(evaluated))
}

struct Evaluated {
    index: usize,
    candidate: SearchCandidate,
    issue: Option<CandidateIssue>,
}

fn evaluate_all(
    candidates: &[RideCandidate],
    origin: &GeoPoint,
    destination: &GeoPoint,
    options: &ClassifyOptions,
    cancel: &CancellationToken,
) -> Result<Vec<Evaluated>> {
    #[cfg(feature = "parallel")]
    {
        if options.parallel {
            use rayon::prelude::*;
            return candidates
                .par_iter()
                .enumerate()
                .map(|(index, ride)| {
                    cancel.check()?;
                    evaluate(index, ride, origin, destination, options)
                })
                .collect();
        }
    }

    candidates
        .iter()
        .enumerate()
        .map(|(index, ride)| {
            cancel.check()?;
            evaluate(index, ride, origin, destination, options)
        })
        .collect()
}

fn evaluate(
    index: usize,
    ride: &RideCandidate,
    origin: &GeoPoint,
    destination: &GeoPoint,
    options: &ClassifyOptions,
) -> Result<Evaluated> {
    let other = |issue: Option<CandidateIssue>| Evaluated {
        index,
        candidate: SearchCandidate::other(ride),
        issue,
    };

    let points = match ride.route.points(options.default_precision) {
        Ok(points) => points,
        Err(err) => {
            warn!(ride_id = %ride.ride_id, error = %err, "route geometry could not be decoded");
            return Ok(other(Some(CandidateIssue::contain(&ride.ride_id, err.into())?)));
        }
    };

    let Some(route_match) = match_route(origin, destination, &points, options.tolerance_meters) else {
        debug!(ride_id = %ride.ride_id, points = points.len(), "no connecting match");
        return Ok(other(None));
    };

    match compute_segment_fare(&ride.route, &route_match) {
        Ok(fare) => {
            let quality = match_quality(&route_match, options.tolerance_meters);
            debug!(
                ride_id = %ride.ride_id,
                origin_index = route_match.origin_anchor.route_index,
                destination_index = route_match.destination_anchor.route_index,
                quality,
                fare,
                "connected"
            );
            Ok(Evaluated {
                index,
                candidate: SearchCandidate {
                    ride: ride.clone(),
                    match_type: MatchType::Connected,
                    match_quality: quality,
                    route_match: Some(route_match),
                    segment_fare: Some(fare),
                    quote: None,
                },
                issue: None,
            })
        }
        Err(err) => {
            warn!(ride_id = %ride.ride_id, error = %err, "fare could not be computed");
            Ok(other(Some(CandidateIssue::contain(&ride.ride_id, err)?)))
        }
    }
}

/// `1 - (origin + destination anchor distance) / (2 * tolerance)`, clamped to `[0, 1]`.
///
/// A NaN tolerance scores `0.0`.
pub fn match_quality(route_match: &RouteMatch, tolerance_meters: f64) -> f64 {
    if tolerance_meters.is_nan() {
        return 0.0;
    }
    if tolerance_meters <= 0.0 {
        return 1.0;
    }
    (1.0 - route_match.combined_anchor_distance() / (2.0 * tolerance_meters)).clamp(0.0, 1.0)
}

fn rank(evaluated: Vec<Evaluated>) -> Classification {
    let mut connected = Vec::new();
    let mut other = Vec::new();
    let mut issues = Vec::new();

    for Evaluated {
        index,
        candidate,
        issue,
    } in evaluated
    {
        if let Some(issue) = issue {
            issues.push((index, issue));
        }
        match candidate.match_type {
            MatchType::Connected => connected.push((index, candidate)),
            MatchType::Other => other.push((index, candidate)),
        }
    }

    connected.sort_by(|(ia, a), (ib, b)| {
        b.match_quality
            .total_cmp(&a.match_quality)
            .then_with(|| combined_distance(a).total_cmp(&combined_distance(b)))
            .then(ia.cmp(ib))
    });
    other.sort_by_key(|(index, _)| *index);
    issues.sort_by_key(|(index, _)| *index);

    Classification {
        candidates: connected
            .into_iter()
            .chain(other)
            .map(|(_, candidate)| candidate)
            .collect(),
        issues: issues.into_iter().map(|(_, issue)| issue).collect(),
    }
}

fn combined_distance(candidate: &SearchCandidate) -> f64 {
    candidate
        .route_match
        .as_ref()
        .map_or(f64::INFINITY, RouteMatch::combined_anchor_distance)
}

//! Route matching: does a driver's route carry the passenger from A to B?
//!
//! Each query point is anchored to the closest route point within the
//! tolerance. A route only connects the journey when the origin anchor comes
//! strictly before the destination anchor in travel order; equal or inverted
//! indices are rejected, never downgraded.

use crate::segment::{extract_segment, Segment};
use rideshare_geo::{distance_meters, GeoPoint};
use serde::Serialize;

/// Default maximum distance between a query point and its anchor.
pub const DEFAULT_TOLERANCE_METERS: f64 = 3000.0;

/// A query point pinned to a route point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchAnchor {
    /// The route point the query was pinned to
    pub point: GeoPoint,
    /// Distance from the query point, never above the tolerance used
    pub distance_meters: f64,
    /// Position of `point` in the route's coordinate sequence
    pub route_index: usize,
}

/// A validated connection between a passenger journey and a route.
///
/// `origin_anchor.route_index < destination_anchor.route_index` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch {
    /// Where the passenger boards
    pub origin_anchor: MatchAnchor,
    /// Where the passenger alights
    pub destination_anchor: MatchAnchor,
    /// Route points from origin anchor to destination anchor, inclusive
    pub segment: Vec<GeoPoint>,
    /// Cumulative path length of `segment`
    pub segment_distance_meters: f64,
}

impl RouteMatch {
    /// Sum of both anchors' distances from the query points.
    pub fn combined_anchor_distance(&self) -> f64 {
        self.origin_anchor.distance_meters + self.destination_anchor.distance_meters
    }
}

/// Finds the closest route point to `query` within `tolerance_meters`.
///
/// Scans every point. Among points at the minimal distance the lowest index
/// wins, so a route that passes the same place twice always anchors to its
/// first pass. Returns `None` when no point is within tolerance, and always
/// when the tolerance is NaN.
pub fn find_anchor(query: &GeoPoint, route: &[GeoPoint], tolerance_meters: f64) -> Option<MatchAnchor> {
    let mut best: Option<MatchAnchor> = None;

    for (route_index, point) in route.iter().enumerate() {
        let distance = distance_meters(query, point);
        if distance.is_nan() || tolerance_meters.is_nan() || distance > tolerance_meters {
            continue;
        }
        // Strict comparison keeps the earlier index on ties
        if best.is_none_or(|b| distance < b.distance_meters) {
            best = Some(MatchAnchor {
                point: *point,
                distance_meters: distance,
                route_index,
            });
        }
    }

    best
}

/// Matches a passenger journey against a route's ordered points.
///
/// Returns `None` when either end has no anchor within tolerance, or when the
/// origin anchor does not strictly precede the destination anchor.
///
/// ```
/// use rideshare_geo::GeoPoint;
/// use rideshare_search::match_route;
///
/// let route = [
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 1.0),
///     GeoPoint::new(0.0, 2.0),
///     GeoPoint::new(0.0, 3.0),
/// ];
///
/// let forward = match_route(&GeoPoint::new(0.0, 1.0001), &GeoPoint::new(0.0, 2.0001), &route, 500.0);
/// assert_eq!(forward.unwrap().segment.len(), 2);
///
/// let backward = match_route(&GeoPoint::new(0.0, 2.0001), &GeoPoint::new(0.0, 1.0001), &route, 500.0);
/// assert!(backward.is_none());
/// ```
pub fn match_route(
    origin: &GeoPoint,
    destination: &GeoPoint,
    route: &[GeoPoint],
    tolerance_meters: f64,
) -> Option<RouteMatch> {
    let origin_anchor = find_anchor(origin, route, tolerance_meters)?;
    let destination_anchor = find_anchor(destination, route, tolerance_meters)?;

    if origin_anchor.route_index >= destination_anchor.route_index {
        return None;
    }

    let Segment {
        points,
        distance_meters,
    } = extract_segment(route, &origin_anchor, &destination_anchor)?;

    Some(RouteMatch {
        origin_anchor,
        destination_anchor,
        segment: points,
        segment_distance_meters: distance_meters,
    })
}

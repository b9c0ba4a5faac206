//! The part of a driver's route the passenger actually travels.

use crate::matcher::MatchAnchor;
use rideshare_geo::{path_length_meters, GeoPoint};

/// A contiguous slice of a route with its path length.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Route points from the origin anchor to the destination anchor, inclusive
    pub points: Vec<GeoPoint>,
    /// Sum of consecutive-point distances along `points`
    pub distance_meters: f64,
}

/// Extracts the route points between two anchors, inclusive.
///
/// The length is the cumulative path along the route, not the straight line
/// between the anchors. Returns `None` unless `origin.route_index <
/// destination.route_index` and both indices lie inside `route`.
pub fn extract_segment(route: &[GeoPoint], origin: &MatchAnchor, destination: &MatchAnchor) -> Option<Segment> {
    if origin.route_index >= destination.route_index {
        return None;
    }

    let points = route.get(origin.route_index..=destination.route_index)?.to_vec();
    let distance_meters = path_length_meters(&points);

    Some(Segment {
        points,
        distance_meters,
    })
}

//! Geocoding collaborator seam and an in-memory gazetteer.

use crate::error::GeocodeError;
use crate::relevance::{place_relevance, PlaceRelevance};
use rideshare_geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Resolves free-text place names to coordinates.
///
/// Implementations wrap the geocoding provider. The search engine calls
/// [`resolve`](Geocoder::resolve) at most once per endpoint and never
/// retries; wrap the implementation to add retry or backoff.
pub trait Geocoder: Sync {
    /// Resolves `text`, failing with not-found, ambiguous, or unavailable.
    fn resolve(&self, text: &str) -> impl Future<Output = Result<GeoPoint, GeocodeError>> + Send;
}

/// A named place in a [`StaticGeocoder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name
    pub name: String,
    /// Where it is
    #[serde(flatten)]
    pub point: GeoPoint,
}

impl Place {
    /// A place at `point`.
    pub fn new(name: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }
}

/// Gazetteer-backed geocoder.
///
/// An exact (normalized) name wins outright. Otherwise the entries with the
/// best relevance are considered: one entry resolves, several distinct
/// entries are ambiguous. Fuzzy in-order matches are too weak to resolve on
/// their own.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: Vec<Place>,
}

impl StaticGeocoder {
    /// A gazetteer over `places`.
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Number of known places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// True when no places are known.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Synchronous lookup.
    pub fn lookup(&self, text: &str) -> Result<GeoPoint, GeocodeError> {
        let scored: Vec<(PlaceRelevance, &Place)> = self
            .places
            .iter()
            .map(|place| (place_relevance(&place.name, text), place))
            .filter(|(score, _)| *score > PlaceRelevance::Fuzzy)
            .collect();

        let Some(best) = scored.iter().map(|(score, _)| *score).max() else {
            return Err(GeocodeError::NotFound(text.to_string()));
        };

        // Duplicate entries for one location are not ambiguity
        let mut top: Vec<&Place> = Vec::new();
        for (score, place) in scored {
            if score == best && !top.iter().any(|seen| seen.point == place.point) {
                top.push(place);
            }
        }

        match top.as_slice() {
            [only] => Ok(only.point),
            _ => Err(GeocodeError::Ambiguous {
                text: text.to_string(),
                matches: top.iter().map(|place| place.name.clone()).collect(),
            }),
        }
    }
}

impl Geocoder for StaticGeocoder {
    fn resolve(&self, text: &str) -> impl Future<Output = Result<GeoPoint, GeocodeError>> + Send {
        std::future::ready(self.lookup(text))
    }
}

//! Error types for the search crate.

use rideshare_core::error::{Error as CoreError, ErrorCode};
use rideshare_geo::{GeoError, GeoErrorCode};
use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Which end of the journey a geocoding failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Where the passenger boards
    Origin,
    /// Where the passenger alights
    Destination,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Origin => write!(f, "origin"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

/// Failures reported by the geocoding collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// No place matches the text
    #[error("no place matches '{0}'")]
    NotFound(String),

    /// Several places match the text equally well
    #[error("'{text}' is ambiguous: {}", .matches.join(", "))]
    Ambiguous {
        /// The text as given
        text: String,
        /// Names of the equally good candidates
        matches: Vec<String>,
    },

    /// The provider could not be reached
    #[error("geocoder unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Origin or destination text could not be resolved
    #[error("could not resolve {endpoint}: {source}")]
    Geocode {
        /// Which side of the query failed
        endpoint: Endpoint,
        /// Underlying geocoder failure
        #[source]
        source: GeocodeError,
    },

    /// A route's encoded polyline is malformed
    #[error("route geometry could not be decoded: {0}")]
    Decode(#[from] GeoError),

    /// A route lacks data required for fare computation
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// The query itself is unusable
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The candidate-loading collaborator failed
    #[error("could not load candidate rides: {0}")]
    CandidateSource(String),

    /// The caller abandoned the search
    #[error("search cancelled")]
    Cancelled,
}

/// Error code for integration with rideshare-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Geocoding failure
    Geocode = 11001,
    /// Malformed polyline
    Decode = 11002,
    /// Route unusable for fare computation
    InvalidRoute = 11003,
    /// Unusable query
    InvalidQuery = 11004,
    /// Candidate loading failure
    CandidateSource = 11005,
    /// Cancelled by caller
    Cancelled = 11006,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::Geocode { .. } => SearchErrorCode::Geocode,
            SearchError::Decode(_) => SearchErrorCode::Decode,
            SearchError::InvalidRoute(_) => SearchErrorCode::InvalidRoute,
            SearchError::InvalidQuery(_) => SearchErrorCode::InvalidQuery,
            SearchError::CandidateSource(_) => SearchErrorCode::CandidateSource,
            SearchError::Cancelled => SearchErrorCode::Cancelled,
        }
    }

    /// True when the error belongs to one candidate rather than the whole query.
    pub fn is_candidate_scoped(&self) -> bool {
        matches!(self, SearchError::Decode(_) | SearchError::InvalidRoute(_))
    }

    pub(crate) fn invalid_route(reason: impl Into<String>) -> Self {
        SearchError::InvalidRoute(reason.into())
    }
}

impl SearchError {
    /// The cross-crate error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SearchError::Geocode { source, .. } => match source {
                GeocodeError::NotFound(_) => ErrorCode::PlaceNotFound,
                GeocodeError::Ambiguous { .. } => ErrorCode::PlaceAmbiguous,
                GeocodeError::Unavailable(_) => ErrorCode::GeocoderUnavailable,
            },
            SearchError::Decode(geo) => match geo.code() {
                GeoErrorCode::Decode => ErrorCode::PolylineDecode,
                GeoErrorCode::InvalidPrecision => ErrorCode::InvalidPrecision,
                GeoErrorCode::InvalidCoordinate => ErrorCode::InvalidInput,
            },
            SearchError::InvalidRoute(_) => ErrorCode::InvalidRoute,
            SearchError::InvalidQuery(_) => ErrorCode::InvalidInput,
            SearchError::CandidateSource(_) => ErrorCode::CandidateSourceUnavailable,
            SearchError::Cancelled => ErrorCode::Cancelled,
        }
    }
}

impl From<SearchError> for CoreError {
    fn from(err: SearchError) -> Self {
        let code = err.error_code();
        let message = err.to_string();
        match err {
            SearchError::Geocode { endpoint, source } => CoreError::geocode(code, message)
                .with_context(format!("Resolving {endpoint}"))
                .with_source(source),
            SearchError::Decode(geo) => CoreError::route(code, message).with_source(geo),
            SearchError::InvalidRoute(_) => CoreError::route(code, message),
            SearchError::Cancelled => CoreError::cancelled(),
            SearchError::InvalidQuery(_) | SearchError::CandidateSource(_) => {
                CoreError::new(code, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_error_message() {
        let err = SearchError::Geocode {
            endpoint: Endpoint::Destination,
            source: GeocodeError::Ambiguous {
                text: "Central".into(),
                matches: vec!["Central Station".into(), "Central Mall".into()],
            },
        };
        let message = err.to_string();
        assert!(message.contains("destination"));
        assert!(message.contains("Central Station, Central Mall"));
    }

    #[test]
    fn test_candidate_scope() {
        assert!(SearchError::invalid_route("no distance").is_candidate_scoped());
        assert!(!SearchError::Cancelled.is_candidate_scoped());
    }

    #[test]
    fn test_into_core_error() {
        let err: CoreError = SearchError::Geocode {
            endpoint: Endpoint::Origin,
            source: GeocodeError::NotFound("Atlantis".into()),
        }
        .into();
        assert_eq!(err.code, ErrorCode::PlaceNotFound);
        assert_eq!(err.context.as_deref(), Some("Resolving origin"));

        let err: CoreError = SearchError::Cancelled.into();
        assert_eq!(err.code, ErrorCode::Cancelled);

        let err: CoreError = SearchError::from(GeoError::InvalidPrecision(12)).into();
        assert_eq!(err.code, ErrorCode::InvalidPrecision);
    }
}

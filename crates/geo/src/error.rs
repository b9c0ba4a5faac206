//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    /// Malformed encoded polyline
    #[error("Invalid polyline at byte {position}: {reason}")]
    Decode {
        /// Byte offset where decoding stopped
        position: usize,
        /// What was wrong with the input
        reason: DecodeFailure,
    },

    /// Precision outside the supported range
    #[error("Invalid polyline precision {0} (expected 0..=10)")]
    InvalidPrecision(u32),

    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Why a polyline could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The string ended in the middle of a variable-length integer
    UnterminatedValue,
    /// A latitude delta was not followed by a longitude delta
    TruncatedPair,
    /// A byte outside the polyline alphabet (`?`..=`~`)
    InvalidByte(u8),
    /// A value needed more bits than fit in an `i64`
    Overflow,
}

impl std::fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedValue => write!(f, "unterminated value"),
            Self::TruncatedPair => write!(f, "latitude without longitude"),
            Self::InvalidByte(b) => write!(f, "byte 0x{b:02x} is not a polyline character"),
            Self::Overflow => write!(f, "value overflows 64 bits"),
        }
    }
}

/// Error code for integration with rideshare-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Malformed polyline
    Decode = 10001,
    /// Unsupported precision
    InvalidPrecision = 10002,
    /// Invalid coordinate values
    InvalidCoordinate = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::Decode { .. } => GeoErrorCode::Decode,
            GeoError::InvalidPrecision(_) => GeoErrorCode::InvalidPrecision,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
        }
    }

    pub(crate) fn decode(position: usize, reason: DecodeFailure) -> Self {
        GeoError::Decode { position, reason }
    }
}

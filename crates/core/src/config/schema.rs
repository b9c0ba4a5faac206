//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EngineConfig {
    /// Route matching policy
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Fare and booking fee policy
    #[serde(default)]
    pub fare: FareConfig,

    /// Search orchestration behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Check every section for out-of-range values
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.matching.tolerance_meters;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(Error::config_invalid(format!(
                "matching.tolerance_meters must be a positive number, got {tolerance}"
            )));
        }

        if self.matching.polyline_precision > MAX_POLYLINE_PRECISION {
            return Err(Error::config_invalid(format!(
                "matching.polyline_precision must be at most {MAX_POLYLINE_PRECISION}, got {}",
                self.matching.polyline_precision
            )));
        }

        let fee = self.fare.platform_fee_per_seat;
        if !fee.is_finite() || fee < 0.0 {
            return Err(Error::config_invalid(format!(
                "fare.platform_fee_per_seat must not be negative, got {fee}"
            )));
        }

        let gst = self.fare.gst_rate;
        if !(0.0..=1.0).contains(&gst) {
            return Err(Error::config_invalid(format!(
                "fare.gst_rate must be between 0 and 1, got {gst}"
            )));
        }

        Ok(())
    }
}

const MAX_POLYLINE_PRECISION: u32 = 10;

/// Route matching configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    /// Maximum distance between a query point and its on-route anchor
    #[serde(default = "default_tolerance_meters")]
    pub tolerance_meters: f64,

    /// Decimal places of encoded polylines from the routing provider
    #[serde(default = "default_polyline_precision")]
    pub polyline_precision: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerance_meters: default_tolerance_meters(),
            polyline_precision: default_polyline_precision(),
        }
    }
}

fn default_tolerance_meters() -> f64 {
    3000.0
}

fn default_polyline_precision() -> u32 {
    5
}

/// Fare and booking fee configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FareConfig {
    /// Flat platform fee charged to the passenger per booked seat
    #[serde(default = "default_platform_fee")]
    pub platform_fee_per_seat: f64,

    /// GST rate applied to the platform fee
    #[serde(default = "default_gst_rate")]
    pub gst_rate: f64,

    /// ISO currency code used when presenting amounts
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            platform_fee_per_seat: default_platform_fee(),
            gst_rate: default_gst_rate(),
            currency: default_currency(),
        }
    }
}

fn default_platform_fee() -> f64 {
    10.0
}

fn default_gst_rate() -> f64 {
    0.18
}

fn default_currency() -> String {
    "INR".to_string()
}

/// What to do with candidates that have no geometric route match
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OtherResults {
    /// Return every unmatched candidate after the connected ones
    #[default]
    KeepAll,
    /// Keep unmatched candidates only when their city names match the query text
    SameCityPair,
    /// Return connected candidates only
    Drop,
}

/// Search orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Classify candidates on the thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Fallback handling for unmatched candidates
    #[serde(default)]
    pub other_results: OtherResults,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            other_results: OtherResults::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.matching.tolerance_meters, 3000.0);
        assert_eq!(config.matching.polyline_precision, 5);
        assert_eq!(config.fare.platform_fee_per_seat, 10.0);
        assert_eq!(config.search.other_results, OtherResults::KeepAll);
        assert!(config.search.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [matching]
            tolerance_meters = 500.0

            [search]
            other_results = "same_city_pair"
            "#,
        )
        .unwrap();

        assert_eq!(config.matching.tolerance_meters, 500.0);
        assert_eq!(config.matching.polyline_precision, 5);
        assert_eq!(config.search.other_results, OtherResults::SameCityPair);
        assert_eq!(config.fare.gst_rate, 0.18);
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        let mut config = EngineConfig::default();
        config.matching.tolerance_meters = 0.0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut config = EngineConfig::default();
        config.matching.polyline_precision = 11;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.fare.gst_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.fare.platform_fee_per_seat = -1.0;
        assert!(config.validate().is_err());
    }
}

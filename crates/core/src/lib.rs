//! Core utilities for the rideshare route-match engine
//!
//! This crate provides shared functionality used by the search library and its front ends:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based engine configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use rideshare_core::config::Config;
//!
//! let config = Config::load(None).expect("valid configuration");
//! println!("matching tolerance: {} m", config.engine.matching.tolerance_meters);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, EngineConfig, FareConfig, MatchingConfig, OtherResults};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}

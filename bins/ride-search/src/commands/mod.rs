//! Subcommand implementations

pub mod polyline;
pub mod search;

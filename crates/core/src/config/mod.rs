//! Configuration loading and schema definitions
//!
//! Engine policy knobs (matching tolerance, fare policy, search behaviour,
//! logging) shared by the library and its front ends.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;

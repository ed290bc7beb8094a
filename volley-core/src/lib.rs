//! Core data types shared by the Volley engine, CLI and test suites.
mod config;
mod constants;
mod outcome;
mod stats;

pub use config::*;
pub use constants::*;
pub use outcome::*;
pub use stats::*;

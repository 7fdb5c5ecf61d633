//! Core utilities: errors, logging, calendar math.

pub mod error;
pub mod logging;
pub mod time;

pub use error::Error;

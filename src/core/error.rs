//! Error types for the skycycle crate

use thiserror::Error;

/// Main error type for the simulation
#[derive(Debug, Error)]
pub enum Error {
    #[error("sun light sink is not configured")]
    MissingSunLight,

    #[error("monthly sunny percentage table must have exactly 12 entries, got {0}")]
    MonthlyTableLength(usize),

    #[error("weather change span must be positive, got {0} minutes")]
    InvalidWeatherSpan(i32),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

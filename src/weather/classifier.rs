//! Deterministic weather classification.
//!
//! Weather is a pure function of (minute-quantized UTC instant, seed, monthly
//! sunny-probability table). Independent clients evaluating the same instant
//! with the same seed always agree, which is the whole synchronization story.
//!
//! The xorshift constants and the +256/+512 draw offsets are the
//! compatibility baseline; changing either changes every deployed instance's
//! weather history.

use chrono::{DateTime, Datelike, Utc};

use crate::core::time::days_in_month;

/// Discrete weather condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

/// Seed offset for the cloudy-or-precipitation draw.
pub const CLOUD_DRAW_OFFSET: u32 = 256;
/// Seed offset for the December/March snow ramp draw.
pub const SNOW_DRAW_OFFSET: u32 = 512;

/// Deterministic pseudo-random value in `[0, 1]` from a unix timestamp and
/// seed.
///
/// The timestamp is quantized to whole minutes, packed with the low seed bits
/// into a 32-bit word, and mixed with a fixed xorshift sequence. Same minute
/// and seed always produce the same value; no allocation, O(1).
pub fn minute_hash(unix_seconds: i64, seed: u32) -> f32 {
    let minute = ((unix_seconds / 60) & 0xFFFF) as u32;
    let mut x = (minute << 16) | (seed & 0xFFFF);
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    (x & 0xFFFF) as f32 / 65535.0
}

/// Classify the weather at `at` with the given seed and monthly table.
pub fn classify(at: DateTime<Utc>, seed: u32, monthly_sunny: &[u32; 12]) -> Weather {
    classify_with(at, seed, monthly_sunny, minute_hash)
}

/// Classification core with an injectable random draw, for testing.
pub fn classify_with<F>(
    at: DateTime<Utc>,
    seed: u32,
    monthly_sunny: &[u32; 12],
    rand: F,
) -> Weather
where
    F: Fn(i64, u32) -> f32,
{
    let unix = at.timestamp();
    let month = at.month();

    let r = rand(unix, seed);
    let p = (monthly_sunny[(month - 1) as usize] as f32 / 100.0).clamp(0.0, 1.0);
    if r < p {
        return Weather::Sunny;
    }

    // Half of the non-sunny outcomes are plain clouds
    if rand(unix, seed.wrapping_add(CLOUD_DRAW_OFFSET)) < 0.5 {
        return Weather::Cloudy;
    }

    // Midwinter precipitation is always snow
    if month <= 2 {
        return Weather::Snowy;
    }

    if month == 12 || month == 3 {
        // December trends toward snow as the month progresses, March away
        let month_progress = at.day() as f32 / days_in_month(at.year(), month) as f32;
        let snow_roll = rand(unix, seed.wrapping_add(SNOW_DRAW_OFFSET));
        if (month == 12 && snow_roll < month_progress)
            || (month == 3 && snow_roll > month_progress)
        {
            return Weather::Snowy;
        }
    }

    Weather::Rainy
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Moon position and phase.
//!
//! The moon is modeled as the sun's antipode rather than with an independent
//! lunar ephemeris; that keeps moonrise pinned to sunset, which is what the
//! night lighting wants. The phase, on the other hand, follows the real
//! synodic cycle from a Julian-date lunar age.

use chrono::{Datelike, NaiveDate};

use crate::atmosphere::solar::SkyPosition;

/// Length of the synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.53059;

/// Julian date of a reference new moon (2000-01-06).
const NEW_MOON_EPOCH: f64 = 2451550.1;

/// Moon position: the antipode of the sun.
pub fn moon_position(sun: SkyPosition) -> SkyPosition {
    SkyPosition {
        azimuth: (sun.azimuth + 180.0).rem_euclid(360.0),
        altitude: -sun.altitude,
    }
}

/// Moon phase fraction in `[0, 1)`: 0 = new, 0.5 = full.
///
/// Purely a function of the UTC calendar date; time of day does not matter.
/// The century terms use integer arithmetic on purpose, matching the
/// Gregorian Julian-date formula.
pub fn moon_phase(date: NaiveDate) -> f64 {
    let mut year = date.year();
    let mut month = date.month() as i32;
    let day = date.day() as f64;

    if month <= 2 {
        year -= 1;
        month += 12;
    }

    let century = year / 100;
    let julian_date = (365.25 * (year as f64 + 4716.0)).floor()
        + (30.6001 * (month as f64 + 1.0)).floor()
        + day
        + (2 - century + century / 4) as f64
        - 1524.5;

    let mut age = (julian_date - NEW_MOON_EPOCH) % SYNODIC_MONTH;
    if age < 0.0 {
        age += SYNODIC_MONTH;
    }
    age / SYNODIC_MONTH
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

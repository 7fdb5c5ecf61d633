//! Solar position calculation.
//!
//! Low-order Fourier approximations of declination and the equation of time,
//! evaluated once per day, plus the per-tick horizontal-coordinate transform.
//! The series coefficients are reproduced exactly so that every client
//! computes bit-identical angles from the same clock.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::atmosphere::config::DayCycleConfig;
use crate::core::time::days_in_year;

/// Position of a celestial body in horizontal coordinates, degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyPosition {
    /// Compass bearing after +180 normalization and fixed-angle correction,
    /// wrapped into `[0, 360)`.
    pub azimuth: f64,
    /// Angle above the horizon, `[-90, 90]`.
    pub altitude: f64,
}

// ---------------------------------------------------------------------------
// Daily constants
// ---------------------------------------------------------------------------

/// Solar quantities that only depend on the calendar date.
///
/// Computed once at startup from the current UTC date and cached for the
/// lifetime of the system; a day-boundary refresh is deliberately not
/// performed (the host restarts instances far more often than once per day).
#[derive(Clone, Copy, Debug)]
pub struct SolarConstants {
    /// Solar declination, radians.
    pub declination: f64,
    /// Equation of time, hours.
    pub equation_of_time: f64,
    /// Latitude, radians.
    pub latitude_rad: f64,
    /// Half-day arc, degrees: hour-angle distance from noon to sunset.
    pub half_day_arc: f64,
}

impl SolarConstants {
    /// Derive the constants for the given UTC date and latitude.
    pub fn for_date(date: NaiveDate, latitude_deg: f64) -> Self {
        let a = std::f64::consts::TAU / days_in_year(date.year()) as f64
            * (date.ordinal() as f64 + 0.5);

        let declination = (0.33281
            - 22.984 * a.cos()
            - 0.3499 * (2.0 * a).cos()
            - 0.1398 * (3.0 * a).cos()
            + 3.7872 * a.sin()
            + 0.0325 * (2.0 * a).sin()
            + 0.07187 * (3.0 * a).sin())
        .to_radians();

        let equation_of_time = 0.0072 * a.cos() - 0.0528 * (2.0 * a).cos()
            - 0.0012 * (3.0 * a).cos()
            - 0.1229 * a.sin()
            - 0.1565 * (2.0 * a).sin()
            - 0.0041 * (3.0 * a).sin();

        let latitude_rad = latitude_deg.to_radians();

        // Clamp keeps polar day/night at the horizon instead of producing NaN
        let half_day_arc = (-declination.tan() * latitude_rad.tan())
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees();

        Self {
            declination,
            equation_of_time,
            latitude_rad,
            half_day_arc,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tick position
// ---------------------------------------------------------------------------

/// Compute the sun position for the given UTC instant.
pub fn sun_position(
    constants: &SolarConstants,
    config: &DayCycleConfig,
    utc: DateTime<Utc>,
) -> SkyPosition {
    // The fixed timezone offset turns the UTC instant into the local wall
    // clock the formulas are written against.
    let local = utc + chrono::Duration::hours(config.timezone as i64);
    let local_hour = local.hour() as f64
        + local.minute() as f64 / 60.0
        + local.second() as f64 / 3600.0
        + (local.nanosecond() / 1_000_000) as f64 / 3_600_000.0;

    // True solar time, hours
    let t_hours = local_hour
        + (config.longitude - 135.0) / 15.0
        + constants.equation_of_time
        + config.debug_time_offset;

    let hour_angle = (15.0 * t_hours - 180.0).to_radians();

    let phi = constants.latitude_rad;
    let delta = constants.declination;

    let h = (phi.sin() * delta.sin() + phi.cos() * delta.cos() * hour_angle.cos()).asin();
    let sin_a = delta.cos() * hour_angle.sin() / h.cos();
    let cos_a = (h.sin() * phi.sin() - delta.sin()) / h.cos() / phi.cos();

    let azimuth =
        ((sin_a.atan2(cos_a) + std::f64::consts::PI).to_degrees() + config.fixed_angle)
            .rem_euclid(360.0);

    SkyPosition {
        azimuth,
        altitude: h.to_degrees(),
    }
}

/// Sunrise, in local wall-clock hours.
pub fn sunrise_hour(constants: &SolarConstants, longitude: f64) -> f64 {
    (-constants.half_day_arc + 180.0) / 15.0
        - (longitude - 135.0) / 15.0
        - constants.equation_of_time
}

/// Sunset, in local wall-clock hours.
pub fn sunset_hour(constants: &SolarConstants, longitude: f64) -> f64 {
    (constants.half_day_arc + 180.0) / 15.0
        - (longitude - 135.0) / 15.0
        - constants.equation_of_time
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

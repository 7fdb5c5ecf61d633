//! Day cycle configuration.
//!
//! Defaults reproduce the reference deployment: Tokyo coordinates, UTC+9,
//! light channels mapped over the first ten degrees above the horizon.

use serde::{Deserialize, Serialize};

/// One controllable light parameter (intensity or color temperature).
///
/// When `enabled` is false the channel is never written to the light, so the
/// host keeps whatever value it had.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub enabled: bool,
    /// Value at (and below) the standard minimum altitude.
    pub min: f64,
    /// Value at (and above) the standard maximum altitude.
    pub max: f64,
}

/// Full day cycle configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DayCycleConfig {
    /// Latitude in degrees, -90..90.
    pub latitude: f64,
    /// Longitude in degrees, -180..180.
    pub longitude: f64,
    /// Fixed timezone offset in whole hours.
    pub timezone: i32,
    /// Constant correction added to the computed azimuth, degrees.
    pub fixed_angle: f64,
    /// Seconds between solar ticks.
    pub update_frequency_secs: u32,

    /// Altitude (degrees) at which light channels reach their `min` value.
    pub standard_min_height_angle: f64,
    /// Altitude (degrees) at which light channels reach their `max` value.
    pub standard_max_height_angle: f64,

    pub sun_intensity: ChannelConfig,
    pub sun_temperature: ChannelConfig,
    pub moon_intensity: ChannelConfig,
    pub moon_temperature: ChannelConfig,

    /// Re-arm the solar tick on the next frame instead of `update_frequency_secs`.
    pub debug_mode: bool,
    /// Extra hours added to the true solar time, for scrubbing in debug mode.
    pub debug_time_offset: f64,
}

impl Default for DayCycleConfig {
    fn default() -> Self {
        Self {
            latitude: 35.68,
            longitude: 139.75,
            timezone: 9,
            fixed_angle: 0.0,
            update_frequency_secs: 1,

            standard_min_height_angle: 0.0,
            standard_max_height_angle: 10.0,

            sun_intensity: ChannelConfig {
                enabled: true,
                min: 0.0,
                max: 1.0,
            },
            sun_temperature: ChannelConfig {
                enabled: true,
                min: 2000.0,
                max: 6500.0,
            },
            moon_intensity: ChannelConfig {
                enabled: true,
                min: 0.0,
                max: 0.5,
            },
            moon_temperature: ChannelConfig {
                enabled: true,
                min: 6500.0,
                max: 15000.0,
            },

            debug_mode: false,
            debug_time_offset: 0.0,
        }
    }
}

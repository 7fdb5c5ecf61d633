//! Day cycle system: time-of-day driven sun and moon lighting.
//!
//! Computes astronomical sun/moon positions from the wall clock and pushes
//! orientation, intensity, and color temperature into the host's light sinks.
//! The main entry point is [`DayCycleSystem`]; call
//! [`update`](DayCycleSystem::update) on the cadence reported by
//! [`next_update_delay`](DayCycleSystem::next_update_delay).

pub mod config;
pub mod lighting;
pub mod moon;
pub mod solar;
pub mod state;

// Re-exports
pub use config::{ChannelConfig, DayCycleConfig};
pub use state::CelestialState;

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::Error;
use crate::scene::{LightOrientation, LightSink, SkySink, MOON_PHASE_PARAMETER, PHYSICAL_SKYBOX_ID};
use lighting::LightMapper;
use moon::{moon_phase, moon_position};
use solar::{sun_position, sunrise_hour, sunset_hour, SolarConstants};

/// Delay used between ticks in debug fast-forward mode (one frame at 60 Hz).
const DEBUG_FRAME_DELAY: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// DayCycleSystem
// ---------------------------------------------------------------------------

/// Main day cycle system. Owns the light sinks and the cached daily solar
/// constants; recomputes and applies [`CelestialState`] on every tick.
pub struct DayCycleSystem {
    config: DayCycleConfig,
    constants: SolarConstants,
    mapper: LightMapper,
    sun_light: Box<dyn LightSink>,
    moon_light: Option<Box<dyn LightSink>>,
    state: CelestialState,
}

impl DayCycleSystem {
    /// Create the system and run the first tick at `now`.
    ///
    /// The sun light is mandatory; without it the system refuses to start.
    /// A missing moon light only degrades the output (lunar values are not
    /// applied anywhere). The daily solar constants are derived from `now`'s
    /// UTC date and kept for the lifetime of the system.
    pub fn new(
        config: DayCycleConfig,
        sun_light: Option<Box<dyn LightSink>>,
        moon_light: Option<Box<dyn LightSink>>,
        mut sky: Option<Box<dyn SkySink>>,
        now: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let Some(sun_light) = sun_light else {
            log::error!("sun light sink is not configured, day cycle will not run");
            return Err(Error::MissingSunLight);
        };
        if moon_light.is_none() {
            log::warn!("moon light sink is not configured, lunar lighting will not be applied");
        }

        let constants = SolarConstants::for_date(now.date_naive(), config.latitude);
        log::debug!(
            "solar constants for {}: declination={:.4} rad, equation_of_time={:.4} h, half_day_arc={:.2} deg",
            now.date_naive(),
            constants.declination,
            constants.equation_of_time,
            constants.half_day_arc
        );

        // The physical skybox renders its own moon and wants the phase once
        if let Some(sky) = sky.as_mut() {
            if sky.renderer_id() == PHYSICAL_SKYBOX_ID {
                sky.set_parameter(MOON_PHASE_PARAMETER, moon_phase(now.date_naive()) as f32);
            }
        }

        let mapper = LightMapper {
            min_angle: config.standard_min_height_angle,
            max_angle: config.standard_max_height_angle,
        };

        let mut sys = Self {
            config,
            constants,
            mapper,
            sun_light,
            moon_light,
            state: CelestialState::default(),
        };
        sys.update(now);
        Ok(sys)
    }

    /// Recompute the celestial state for `now` and apply it to the sinks.
    pub fn update(&mut self, now: DateTime<Utc>) {
        let sun = sun_position(&self.constants, &self.config, now);
        let moon = moon_position(sun);
        let phase = moon_phase(now.date_naive());

        self.state = CelestialState {
            sun_azimuth: sun.azimuth,
            sun_altitude: sun.altitude,
            sun_intensity: self.mapper.map(&self.config.sun_intensity, sun.altitude),
            sun_temperature: self.mapper.map(&self.config.sun_temperature, sun.altitude),
            moon_azimuth: moon.azimuth,
            moon_altitude: moon.altitude,
            moon_intensity: self.mapper.map(&self.config.moon_intensity, moon.altitude),
            moon_temperature: self.mapper.map(&self.config.moon_temperature, moon.altitude),
            moon_phase: phase,
        };

        self.sun_light.apply_light(
            LightOrientation {
                azimuth_deg: sun.azimuth as f32,
                altitude_deg: sun.altitude as f32,
            },
            self.state.sun_intensity.map(|v| v as f32),
            self.state.sun_temperature.map(|v| v as f32),
        );

        if let Some(moon_light) = self.moon_light.as_mut() {
            moon_light.apply_light(
                LightOrientation {
                    azimuth_deg: moon.azimuth as f32,
                    altitude_deg: moon.altitude as f32,
                },
                self.state.moon_intensity.map(|v| v as f32),
                self.state.moon_temperature.map(|v| v as f32),
            );
        }
    }

    /// How long the scheduler should wait before the next tick.
    pub fn next_update_delay(&self) -> Duration {
        if self.config.debug_mode {
            DEBUG_FRAME_DELAY
        } else {
            Duration::from_secs(self.config.update_frequency_secs.max(1) as u64)
        }
    }

    /// Current celestial state.
    #[inline]
    pub fn state(&self) -> &CelestialState {
        &self.state
    }

    /// Immutable reference to the configuration.
    #[inline]
    pub fn config(&self) -> &DayCycleConfig {
        &self.config
    }

    /// Today's sunrise in local wall-clock hours.
    pub fn sunrise_time(&self) -> f64 {
        sunrise_hour(&self.constants, self.config.longitude)
    }

    /// Today's sunset in local wall-clock hours.
    pub fn sunset_time(&self) -> f64 {
        sunset_hour(&self.constants, self.config.longitude)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

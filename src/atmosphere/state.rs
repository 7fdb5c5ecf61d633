//! Celestial runtime state.

/// Full day cycle state recomputed on every solar tick.
///
/// Intensity and temperature values are `None` when the corresponding control
/// channel is disabled in the configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct CelestialState {
    // Sun
    pub sun_azimuth: f64,
    pub sun_altitude: f64,
    pub sun_intensity: Option<f64>,
    pub sun_temperature: Option<f64>,

    // Moon (antipode of the sun)
    pub moon_azimuth: f64,
    pub moon_altitude: f64,
    pub moon_intensity: Option<f64>,
    pub moon_temperature: Option<f64>,

    /// Synodic phase fraction, 0 = new, 0.5 = full.
    pub moon_phase: f64,
}

//! Sink interfaces implemented by the host scene layer.
//!
//! The simulation core never talks to a renderer directly. Hosts adapt their
//! light objects, skybox material, and weather prop containers to these
//! traits; the core pushes computed values through them on every tick.

use glam::Vec3;

// ---------------------------------------------------------------------------
// Light sink
// ---------------------------------------------------------------------------

/// Horizontal-coordinate orientation of a directional light, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightOrientation {
    /// Compass bearing, clockwise, `[0, 360)`.
    pub azimuth_deg: f32,
    /// Angle above the horizon, negative when below.
    pub altitude_deg: f32,
}

impl LightOrientation {
    /// Unit vector pointing from the scene toward the celestial body.
    pub fn direction(&self) -> Vec3 {
        let az = self.azimuth_deg.to_radians();
        let alt = self.altitude_deg.to_radians();
        Vec3::new(az.sin() * alt.cos(), alt.sin(), az.cos() * alt.cos()).normalize()
    }
}

/// An orientable, tintable directional light (sun or moon).
///
/// `intensity` and `temperature` are `None` when the corresponding control
/// channel is disabled; the host must leave the current value untouched.
pub trait LightSink {
    fn apply_light(
        &mut self,
        orientation: LightOrientation,
        intensity: Option<f32>,
        temperature: Option<f32>,
    );
}

// ---------------------------------------------------------------------------
// Sky sink
// ---------------------------------------------------------------------------

/// A sky/cloud rendering surface accepting named float parameters.
pub trait SkySink {
    /// Identity of the active sky renderer, used to select parameter names.
    fn renderer_id(&self) -> &str;

    /// Set a named float parameter on the sky material.
    fn set_parameter(&mut self, name: &str, value: f32);
}

/// Renderer id of the physical skybox that also consumes the moon phase.
pub const PHYSICAL_SKYBOX_ID: &str = "CaminoVR/Skybox";

/// Parameter name for the moon phase on the physical skybox.
pub const MOON_PHASE_PARAMETER: &str = "_MoonPhase";

/// Cloud-coverage parameter name for a given sky renderer.
///
/// Unrecognized renderers return `None`; the caller skips the forward and
/// surfaces a one-time advisory.
pub fn cloud_parameter(renderer_id: &str) -> Option<&'static str> {
    match renderer_id {
        "CaminoVR/Skybox" => Some("_CloudCoverage"),
        "Typhon/SkyBox1.1" => Some("_CloudDensity"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Visibility sink
// ---------------------------------------------------------------------------

/// A scene object group that can be shown or hidden as a unit.
pub trait VisibilityToggle {
    fn set_visible(&mut self, visible: bool);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

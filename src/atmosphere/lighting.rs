//! Altitude-driven light parameter mapping.
//!
//! Intensity and color temperature are linear in the altitude between two
//! configured threshold angles and saturate outside them. The mapping never
//! extrapolates.

use crate::atmosphere::config::ChannelConfig;

/// Saturating inverse lerp: where `v` sits between `a` and `b`, in `[0, 1]`.
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    if (b - a).abs() < f64::EPSILON {
        return 0.0;
    }
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}

/// Linear interpolation with a clamped parameter.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Maps altitudes into light parameters through the standard angle window.
#[derive(Clone, Copy, Debug)]
pub struct LightMapper {
    pub min_angle: f64,
    pub max_angle: f64,
}

impl LightMapper {
    /// Map an altitude through the channel, or `None` when disabled.
    pub fn map(&self, channel: &ChannelConfig, altitude: f64) -> Option<f64> {
        if !channel.enabled {
            return None;
        }
        let t = inverse_lerp(self.min_angle, self.max_angle, altitude);
        Some(lerp(channel.min, channel.max, t))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Post-processing parameters
//!
//! Derived once per frame from the animation snapshot; the renderer only
//! uploads them.

use crate::constants::SCREEN_FX_MIN_INTENSITY;
use crate::math::Rgb;

/// Bloom added to the bloom channel per unit of pulse
pub const PULSE_BLOOM_BOOST: f32 = 0.35;

/// Bright-pass, blur and composite controls
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl BloomSettings {
    /// Settings for bloom channel `bloom`, pulse level `pulse` and overlay gate `m`
    pub fn derive(bloom: f32, pulse: f32, m: f32) -> Self {
        Self {
            strength: bloom + PULSE_BLOOM_BOOST * pulse,
            radius: 0.75 + m * 0.20,
            threshold: 0.12 - m * 0.02,
        }
    }
}

/// Full-screen scanline/vignette overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenFxSettings {
    /// `0..=1`; the pass is skipped below [`SCREEN_FX_MIN_INTENSITY`]
    pub intensity: f32,
    pub time: f32,
    pub tint: Rgb,
}

impl ScreenFxSettings {
    pub fn derive(m: f32, time: f32, tint: Rgb) -> Self {
        Self {
            intensity: m.clamp(0.0, 1.0),
            time,
            tint,
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.intensity >= SCREEN_FX_MIN_INTENSITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bloom_without_overlay() {
        let bloom = BloomSettings::derive(0.55, 0.0, 0.0);
        assert_eq!(bloom.strength, 0.55);
        assert_eq!(bloom.radius, 0.75);
        assert_eq!(bloom.threshold, 0.12);
    }

    #[test]
    fn test_bloom_with_overlay_and_pulse() {
        let bloom = BloomSettings::derive(0.85, 1.0, 1.0);
        assert!((bloom.strength - 1.2).abs() < 1e-6);
        assert!((bloom.radius - 0.95).abs() < 1e-6);
        assert!((bloom.threshold - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_screen_fx_early_out() {
        assert!(!ScreenFxSettings::derive(0.0005, 0.0, Rgb::WHITE).enabled());
        assert!(ScreenFxSettings::derive(0.5, 0.0, Rgb::WHITE).enabled());
        assert_eq!(ScreenFxSettings::derive(3.0, 0.0, Rgb::WHITE).intensity, 1.0);
    }
}

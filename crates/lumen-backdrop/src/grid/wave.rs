//! Grid waveforms
//!
//! Three families are sampled per anchor and cross-faded by the continuous
//! wave-shape channel: 0 → wave, 1 → wave/jitter combo, 2 → ridges.

use crate::transition::{lerp, smoothstep};

/// The three waveform families at one anchor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSample {
    /// Smooth travelling sine/cosine field
    pub wave: f32,
    /// High-frequency jitter (driven by raw time, not frequency)
    pub jitter: f32,
    /// Cubed product field with hard ridges
    pub ridges: f32,
}

impl WaveSample {
    /// Sample all families at anchor `(x, z)`
    pub fn at(x: f32, z: f32, t: f32, frequency: f32) -> Self {
        let phase = t * frequency;
        let wave = (x * 0.2 + phase).sin() + (z * 0.15 + phase * 0.8).cos();
        let jitter = (x * 10.0 + t * 10.0).sin() * (z * 10.0 + t * 10.0).cos();
        let raw = (x * 0.3 + phase).sin() * (z * 0.3 + phase).cos();
        Self {
            wave,
            jitter,
            ridges: raw * raw * raw * 4.0,
        }
    }

    /// Blend by the continuous shape ordinal
    pub fn blend(&self, shape: f32) -> f32 {
        let combo = self.wave * 0.2 + self.jitter * 0.8;
        let first = lerp(self.wave, combo, smoothstep(shape, 0.0, 1.0));
        lerp(first, self.ridges, smoothstep(shape, 1.0, 2.0))
    }
}

/// Undamped vertical displacement at `(x, z)`
#[inline]
pub fn height(x: f32, z: f32, t: f32, frequency: f32, shape: f32, amplitude: f32) -> f32 {
    WaveSample::at(x, z, t, frequency).blend(shape) * amplitude
}

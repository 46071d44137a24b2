use serde::Serialize;

use super::PresetState;
use crate::math::Rgb;

/// Number of scalar channels in an [`AnimationVector`]
pub const CHANNEL_COUNT: usize = 16;

/// The continuously interpolated visual state
///
/// Same shape as [`PresetState`], but every channel is continuous: the wave
/// shape is a real-valued ordinal and the flags are `0..=1` weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationVector {
    pub color: Rgb,
    pub emissive: Rgb,
    pub roughness: f32,
    pub metalness: f32,
    pub wave_shape: f32,
    pub frequency: f32,
    pub amplitude: f32,
    pub bloom: f32,
    pub particles: f32,
    pub overlay: f32,
    pub suppress_grid: f32,
    pub show_network: f32,
}

impl AnimationVector {
    /// The exact continuous image of a preset
    pub fn from_preset(preset: &PresetState) -> Self {
        Self {
            color: preset.color.to_rgb(),
            emissive: preset.emissive.to_rgb(),
            roughness: preset.roughness,
            metalness: preset.metalness,
            wave_shape: preset.wave_shape.ordinal(),
            frequency: preset.frequency,
            amplitude: preset.amplitude,
            bloom: preset.bloom,
            particles: preset.particles,
            overlay: preset.overlay,
            suppress_grid: flag(preset.suppress_grid),
            show_network: flag(preset.show_network),
        }
    }

    /// Move toward `target`.
    ///
    /// `state` applies to colors, material and intensities; `shape` applies to
    /// wave shape, frequency and amplitude.
    pub fn approach(&mut self, target: &AnimationVector, state: f32, shape: f32) {
        self.color.approach(target.color, state);
        self.emissive.approach(target.emissive, state);
        step(&mut self.roughness, target.roughness, state);
        step(&mut self.metalness, target.metalness, state);

        step(&mut self.wave_shape, target.wave_shape, shape);
        step(&mut self.frequency, target.frequency, shape);
        step(&mut self.amplitude, target.amplitude, shape);

        step(&mut self.bloom, target.bloom, state);
        step(&mut self.particles, target.particles, state);
        step(&mut self.overlay, target.overlay, state);
        step(&mut self.suppress_grid, target.suppress_grid, state);
        step(&mut self.show_network, target.show_network, state);
    }

    /// All scalar channels in a fixed order
    pub fn channels(&self) -> [f32; CHANNEL_COUNT] {
        let [r, g, b] = self.color.channels();
        let [er, eg, eb] = self.emissive.channels();
        [
            r,
            g,
            b,
            er,
            eg,
            eb,
            self.roughness,
            self.metalness,
            self.wave_shape,
            self.frequency,
            self.amplitude,
            self.bloom,
            self.particles,
            self.overlay,
            self.suppress_grid,
            self.show_network,
        ]
    }
}

#[inline]
fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

#[inline]
fn step(value: &mut f32, target: f32, factor: f32) {
    *value += (target - *value) * factor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PresetId;

    #[test]
    fn test_from_preset_flags() {
        let v = AnimationVector::from_preset(PresetId::Value.state());
        assert_eq!(v.suppress_grid, 1.0);
        assert_eq!(v.show_network, 1.0);
        assert_eq!(v.wave_shape, 1.0);
    }

    #[test]
    fn test_approach_full_factor_snaps() {
        let mut v = AnimationVector::from_preset(PresetId::Hero.state());
        let target = AnimationVector::from_preset(PresetId::Medical.state());
        v.approach(&target, 1.0, 1.0);
        assert_eq!(v, target);
    }

    #[test]
    fn test_shape_channels_use_shape_factor() {
        let mut v = AnimationVector::from_preset(PresetId::Hero.state());
        let target = AnimationVector::from_preset(PresetId::Semi.state());
        v.approach(&target, 0.5, 0.0);
        assert_eq!(v.wave_shape, 0.0);
        assert_eq!(v.frequency, PresetId::Hero.state().frequency);
        assert!((v.bloom - (0.55 + (0.62 - 0.55) * 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_channel_count() {
        let v = AnimationVector::from_preset(PresetId::Hero.state());
        assert_eq!(v.channels().len(), CHANNEL_COUNT);
        assert_eq!(v.channels()[8], v.wave_shape);
    }
}

use super::{AnimationVector, PresetId, PresetState};
use crate::transition::damp;

/// Damped approach of the current vector toward the selected preset
///
/// Owns the single mutable [`AnimationVector`]; renderers only ever see a
/// copy taken once per frame.
#[derive(Clone, Debug)]
pub struct Interpolator {
    current: AnimationVector,
    target_id: PresetId,
    target: &'static PresetState,
    target_vector: AnimationVector,
    state_decay: f32,
    shape_factor: f32,
}

impl Interpolator {
    /// Start at rest on `initial`
    pub fn new(initial: PresetId, state_decay: f32, shape_factor: f32) -> Self {
        let target = initial.state();
        let target_vector = AnimationVector::from_preset(target);
        Self {
            current: target_vector,
            target_id: initial,
            target,
            target_vector,
            state_decay,
            shape_factor,
        }
    }

    /// Select a target by name. Unknown names select the default preset.
    pub fn set_target_by_name(&mut self, name: &str) -> PresetId {
        let id = PresetId::resolve(name);
        self.set_target(id);
        id
    }

    pub fn set_target(&mut self, id: PresetId) {
        if id == self.target_id {
            return;
        }
        self.target_id = id;
        self.target = id.state();
        self.target_vector = AnimationVector::from_preset(self.target);
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let state = damp(self.state_decay, dt);
        let shape = state * self.shape_factor;
        self.current.approach(&self.target_vector, state, shape);
    }

    #[inline]
    pub fn current(&self) -> &AnimationVector {
        &self.current
    }

    #[inline]
    pub fn target_id(&self) -> PresetId {
        self.target_id
    }

    #[inline]
    pub fn target(&self) -> &'static PresetState {
        self.target
    }

    /// Continuous image of the target preset
    #[inline]
    pub fn target_vector(&self) -> &AnimationVector {
        &self.target_vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SHAPE_DECAY_FACTOR, STATE_DECAY};

    fn interpolator() -> Interpolator {
        Interpolator::new(PresetId::Hero, STATE_DECAY, SHAPE_DECAY_FACTOR)
    }

    #[test]
    fn test_starts_at_rest() {
        let interp = interpolator();
        assert_eq!(interp.current(), interp.target_vector());
    }

    #[test]
    fn test_unknown_name_selects_hero() {
        let mut interp = interpolator();
        interp.set_target(PresetId::Quantum);
        assert_eq!(interp.set_target_by_name("nope"), PresetId::Hero);
        assert_eq!(interp.target_id(), PresetId::Hero);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut interp = interpolator();
        interp.set_target(PresetId::Extreme);
        let before = *interp.current();
        interp.advance(0.0);
        assert_eq!(*interp.current(), before);
    }

    #[test]
    fn test_never_snaps() {
        let mut interp = interpolator();
        interp.set_target(PresetId::Extreme);
        interp.advance(1.0 / 60.0);
        let amp = interp.current().amplitude;
        assert!(amp > 1.0 && amp < 2.5);
    }

    #[test]
    fn test_shape_is_slower_than_color() {
        let mut interp = interpolator();
        interp.set_target(PresetId::Semi);
        for _ in 0..30 {
            interp.advance(1.0 / 60.0);
        }
        let current = interp.current();
        let target = interp.target_vector();
        let bloom_progress = (current.bloom - 0.55) / (target.bloom - 0.55);
        let shape_progress = current.wave_shape / target.wave_shape;
        assert!(shape_progress < bloom_progress);
    }
}

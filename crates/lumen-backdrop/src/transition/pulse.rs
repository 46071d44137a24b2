//! Decaying pulse impulse
//!
//! External UI events (a modal opening or closing) kick the pulse; it then
//! decays exponentially and boosts bloom and particle intensity meanwhile.

use crate::constants::{PULSE_DECAY, PULSE_MAX};

/// Exponentially decaying scalar in `0..=PULSE_MAX`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    level: f32,
    decay: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new(PULSE_DECAY)
    }
}

impl Pulse {
    pub fn new(decay: f32) -> Self {
        Self { level: 0.0, decay }
    }

    /// Raise the level to at least `strength`
    pub fn trigger(&mut self, strength: f32) {
        if !strength.is_finite() {
            return;
        }
        self.level = self.level.max(strength).clamp(0.0, PULSE_MAX);
    }

    /// Decay by `e^(-decay * dt)`
    pub fn advance(&mut self, dt: f32) {
        self.level *= (-self.decay * dt).exp();
        if self.level < 1e-4 {
            self.level = 0.0;
        }
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

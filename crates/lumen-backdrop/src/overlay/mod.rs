//! Volumetric overlay
//!
//! - `bubbles`: billboarded bubble field with size tiers and depth drift
//! - `stencil`: per-frame decision on how the overlay is clipped

mod bubbles;
mod stencil;

pub use bubbles::{BubbleField, BubbleInstance, BubbleTier};
pub use stencil::StencilDecision;

use crate::constants::{OVERLAY_GATE_HIGH, OVERLAY_GATE_LOW, OVERLAY_VISIBLE_THRESHOLD};
use crate::transition::smoothstep;

/// Overlay gate `m` for an overlay channel value
#[inline]
pub fn overlay_gate(overlay: f32) -> f32 {
    smoothstep(overlay, OVERLAY_GATE_LOW, OVERLAY_GATE_HIGH)
}

/// Whether the overlay group is simulated and drawn at gate `m`
#[inline]
pub fn overlay_visible(m: f32) -> bool {
    m > OVERLAY_VISIBLE_THRESHOLD
}

/// Uniform values for the bubble shader at gate `m`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleStyle {
    pub opacity: f32,
    pub glow: f32,
}

impl BubbleStyle {
    pub fn for_gate(m: f32) -> Self {
        Self {
            opacity: 0.85 * m,
            glow: 0.95 + m * 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_edges() {
        assert_eq!(overlay_gate(0.0), 0.0);
        assert_eq!(overlay_gate(0.05), 0.0);
        assert_eq!(overlay_gate(0.35), 1.0);
        assert_eq!(overlay_gate(1.0), 1.0);
        assert!((overlay_gate(0.2) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_visibility_threshold() {
        assert!(!overlay_visible(0.0));
        assert!(!overlay_visible(0.001));
        assert!(overlay_visible(0.01));
    }

    #[test]
    fn test_bubble_style() {
        let style = BubbleStyle::for_gate(1.0);
        assert!((style.opacity - 0.85).abs() < 1e-6);
        assert!((style.glow - 1.1).abs() < 1e-6);
    }
}

//! Pointer suppression well

use glam::{Vec2, Vec3};

use crate::constants::{POINTER_REST, POINTER_WELL_RADIUS};
use crate::math::{PerspectiveCamera, Size};
use crate::transition::{damp, smoothstep01};

/// Damped ground-plane target that flattens the grid around the cursor
#[derive(Clone, Debug)]
pub struct PointerWell {
    /// Latest cursor position in NDC
    ndc: Vec2,
    target: Vec3,
    decay: f32,
    radius: f32,
}

impl PointerWell {
    pub fn new(decay: f32) -> Self {
        Self {
            ndc: Vec2::ZERO,
            target: Vec3::from_array(POINTER_REST),
            decay,
            radius: POINTER_WELL_RADIUS,
        }
    }

    /// Record a cursor position in CSS pixels
    pub fn set_screen_position(&mut self, x: f32, y: f32, viewport: Size) {
        if viewport.is_empty() || !x.is_finite() || !y.is_finite() {
            return;
        }
        self.ndc = Vec2::new(
            (x / viewport.width) * 2.0 - 1.0,
            -(y / viewport.height) * 2.0 + 1.0,
        );
    }

    /// Damp the target toward the cursor ray's ground hit.
    ///
    /// A ray that misses the ground leaves the target where it is.
    pub fn update(&mut self, camera: &PerspectiveCamera, dt: f32) {
        if let Some(hit) = camera.intersect_ground(self.ndc) {
            self.target = self.target.lerp(hit, damp(self.decay, dt));
        }
    }

    /// Park the target off-screen
    pub fn reset(&mut self) {
        self.target = Vec3::from_array(POINTER_REST);
    }

    /// Smoothed `0..=1` influence at anchor `(x, z)`
    pub fn influence(&self, x: f32, z: f32) -> f32 {
        let dx = x - self.target.x;
        let dz = z - self.target.z;
        let distance = (dx * dx + dz * dz).sqrt();
        smoothstep01((1.0 - distance / self.radius).max(0.0))
    }

    #[inline]
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POINTER_DECAY;

    #[test]
    fn test_screen_to_ndc() {
        let mut well = PointerWell::new(POINTER_DECAY);
        well.set_screen_position(0.0, 0.0, Size::new(800.0, 600.0));
        assert_eq!(well.ndc(), Vec2::new(-1.0, 1.0));
        well.set_screen_position(400.0, 300.0, Size::new(800.0, 600.0));
        assert_eq!(well.ndc(), Vec2::ZERO);
    }

    #[test]
    fn test_target_is_damped_toward_hit() {
        let camera = PerspectiveCamera::default();
        let mut well = PointerWell::new(POINTER_DECAY);
        let start = well.target();
        well.update(&camera, 1.0 / 60.0);
        let after = well.target();
        // Moves toward the origin hit but does not snap
        assert!(after.distance(Vec3::ZERO) < start.distance(Vec3::ZERO));
        assert!(after.distance(Vec3::ZERO) > 1.0);
    }

    #[test]
    fn test_reset_parks_target() {
        let camera = PerspectiveCamera::default();
        let mut well = PointerWell::new(POINTER_DECAY);
        for _ in 0..200 {
            well.update(&camera, 1.0 / 45.0);
        }
        assert!(well.target().length() < 0.01);
        well.reset();
        assert_eq!(well.target(), Vec3::from_array(POINTER_REST));
    }

    #[test]
    fn test_influence_falloff() {
        let camera = PerspectiveCamera::default();
        let mut well = PointerWell::new(POINTER_DECAY);
        for _ in 0..500 {
            well.update(&camera, 1.0 / 45.0);
        }
        assert!(well.influence(0.0, 0.0) > 0.99);
        assert!(well.influence(7.5, 0.0) > 0.0 && well.influence(7.5, 0.0) < 1.0);
        assert_eq!(well.influence(20.0, 0.0), 0.0);
    }

    #[test]
    fn test_invalid_pointer_is_ignored() {
        let mut well = PointerWell::new(POINTER_DECAY);
        well.set_screen_position(f32::NAN, 10.0, Size::new(800.0, 600.0));
        well.set_screen_position(10.0, 10.0, Size::ZERO);
        assert_eq!(well.ndc(), Vec2::ZERO);
    }
}

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::constants::{BUBBLE_LARGE, BUBBLE_MEDIUM, BUBBLE_REFERENCE_DISTANCE};
use crate::math::PerspectiveCamera;
use crate::particles::AxisRange;

const X: AxisRange = AxisRange::new(-62.5, 62.5);
const Y: AxisRange = AxisRange::new(-17.0, 45.0);
const Z: AxisRange = AxisRange::new(-110.0, 110.0);
const SPEED: AxisRange = AxisRange::new(0.35, 1.4);

/// Size class assigned at creation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleTier {
    Large,
    Medium,
    Small,
}

impl BubbleTier {
    /// Tier of the bubble at `index`: a few large, some medium, the rest small
    pub fn for_index(index: usize) -> Self {
        if index < BUBBLE_LARGE {
            BubbleTier::Large
        } else if index < BUBBLE_LARGE + BUBBLE_MEDIUM {
            BubbleTier::Medium
        } else {
            BubbleTier::Small
        }
    }

    pub fn size_range(self) -> AxisRange {
        match self {
            BubbleTier::Large => AxisRange::new(9.0, 22.0),
            BubbleTier::Medium => AxisRange::new(4.0, 11.0),
            BubbleTier::Small => AxisRange::new(1.6, 5.8),
        }
    }
}

/// Per-instance data for the bubble pipeline
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "wasm", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct BubbleInstance {
    pub model: [[f32; 4]; 4],
    pub seed: f32,
    /// `0` far, `1` near
    pub depth: f32,
    pub _pad: [f32; 2],
}

#[derive(Clone, Copy, Debug)]
struct Bubble {
    x: f32,
    y: f32,
    z: f32,
    size: f32,
    phase: f32,
    speed: f32,
    depth: f32,
}

/// Billboarded bubbles drifting toward the camera
pub struct BubbleField {
    bubbles: Vec<Bubble>,
    instances: Vec<BubbleInstance>,
    rng: Pcg32,
}

impl BubbleField {
    pub fn new(count: usize, mut rng: Pcg32) -> Self {
        let mut bubbles = Vec::with_capacity(count);
        let mut instances = Vec::with_capacity(count);
        for i in 0..count {
            let depth = rng.random::<f32>();
            let size = BubbleTier::for_index(i).size_range().sample(&mut rng);
            bubbles.push(Bubble {
                x: X.sample(&mut rng),
                y: Y.sample(&mut rng),
                z: Z.min + depth * (Z.max - Z.min),
                size,
                phase: rng.random::<f32>() * TAU,
                speed: SPEED.sample(&mut rng),
                depth,
            });
            instances.push(BubbleInstance {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                seed: rng.random::<f32>(),
                depth,
                _pad: [0.0; 2],
            });
        }
        Self {
            bubbles,
            instances,
            rng,
        }
    }

    /// Advance along depth, recycle at the far bound and rebuild transforms
    pub fn update(&mut self, t: f32, dt: f32, m: f32, camera: &PerspectiveCamera) {
        let rotation = camera.orientation();
        let drive = dt * (0.32 + m * 1.1);

        for (b, instance) in self.bubbles.iter_mut().zip(self.instances.iter_mut()) {
            let near = 1.0 - b.depth;
            b.z += drive * (6.4 + near * 6.0) * b.speed;

            if b.z > Z.max {
                b.z = Z.min;
                b.x = X.sample(&mut self.rng);
                b.y = Y.sample(&mut self.rng);
                b.phase = self.rng.random::<f32>() * TAU;
                b.speed = SPEED.sample(&mut self.rng);
            }

            let wobble_x = (t * 0.35 + b.phase).sin() * (0.7 + near * 0.9);
            let wobble_y = (t * 0.30 + b.phase).cos() * (0.55 + near * 0.75);
            let position = Vec3::new(b.x + wobble_x * 2.0, b.y + wobble_y * 1.6, b.z);

            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(apparent_scale(b.size, b.z, camera)),
                rotation,
                position,
            );
            instance.model = model.to_cols_array_2d();
        }
    }

    #[inline]
    pub fn instances(&self) -> &[BubbleInstance] {
        &self.instances
    }

    /// Current depth of every bubble
    pub fn depths(&self) -> impl Iterator<Item = f32> + '_ {
        self.bubbles.iter().map(|b| b.z)
    }

    /// Base size of every bubble
    pub fn sizes(&self) -> impl Iterator<Item = f32> + '_ {
        self.bubbles.iter().map(|b| b.size)
    }

    #[inline]
    pub fn depth_bounds() -> AxisRange {
        Z
    }
}

/// Scale that keeps apparent size constant as the bubble travels in depth
#[inline]
pub fn apparent_scale(size: f32, z: f32, camera: &PerspectiveCamera) -> f32 {
    size * ((camera.position.z - z).abs() / BUBBLE_REFERENCE_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BUBBLE_COUNT;
    use crate::particles::{system_rng, BUBBLE_RNG};

    fn field(seed: u64) -> BubbleField {
        BubbleField::new(BUBBLE_COUNT, system_rng(seed, BUBBLE_RNG))
    }

    #[test]
    fn test_tiers() {
        assert_eq!(BubbleTier::for_index(0), BubbleTier::Large);
        assert_eq!(BubbleTier::for_index(9), BubbleTier::Large);
        assert_eq!(BubbleTier::for_index(10), BubbleTier::Medium);
        assert_eq!(BubbleTier::for_index(29), BubbleTier::Medium);
        assert_eq!(BubbleTier::for_index(30), BubbleTier::Small);

        let f = field(1);
        for (i, size) in f.sizes().enumerate() {
            assert!(BubbleTier::for_index(i).size_range().contains(size));
        }
    }

    #[test]
    fn test_depth_stays_in_bounds() {
        let camera = PerspectiveCamera::default();
        let mut f = field(2);
        let mut t = 0.0;
        for _ in 0..5000 {
            t += 1.0 / 45.0;
            f.update(t, 1.0 / 45.0, 1.0, &camera);
            assert!(f.depths().all(|z| Z.contains(z)));
        }
    }

    #[test]
    fn test_scale_tracks_depth_distance() {
        let camera = PerspectiveCamera::default();
        assert!((apparent_scale(10.0, 50.0 - 75.0, &camera) - 10.0).abs() < 1e-5);
        assert!((apparent_scale(10.0, 50.0 - 150.0, &camera) - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_billboards_face_camera() {
        let camera = PerspectiveCamera::default();
        let mut f = field(3);
        f.update(0.0, 1.0 / 60.0, 1.0, &camera);
        let forward = (camera.target - camera.position).normalize();
        for instance in f.instances() {
            let model = Mat4::from_cols_array_2d(&instance.model);
            let normal = model.z_axis.truncate().normalize();
            assert!(normal.dot(-forward) > 0.999);
        }
    }

    #[test]
    fn test_instance_seeds() {
        let f = field(4);
        for instance in f.instances() {
            assert!((0.0..1.0).contains(&instance.seed));
            assert!((0.0..1.0).contains(&instance.depth));
        }
    }
}

//! Procedural grid
//!
//! A fixed lattice of anchors, each mapped every frame to an instance
//! transform from the animation vector and the pointer well.
//!
//! - `wave`: the three waveform families and their blend
//! - `pointer`: cursor raycast target and suppression falloff
//! - `mesh`: instance geometry

mod mesh;
mod pointer;
mod wave;

pub use mesh::{tetrahedron, MeshVertex};
pub use pointer::PointerWell;
pub use wave::{height, WaveSample};

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::constants::{GRID_COLS, GRID_ROWS, GRID_SPACING, GRID_SUPPRESS_THRESHOLD};
use crate::state::AnimationVector;

/// Per-instance transform uploaded to the GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "wasm", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct GridInstance {
    pub model: [[f32; 4]; 4],
}

impl Default for GridInstance {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

/// Instanced lattice surface
pub struct Grid {
    anchors: Vec<Vec2>,
    instances: Vec<GridInstance>,
    visible: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS, GRID_SPACING)
    }
}

impl Grid {
    /// Lattice of `rows × cols` anchors centred on the origin
    pub fn new(rows: usize, cols: usize, spacing: f32) -> Self {
        let mut anchors = Vec::with_capacity(rows * cols);
        for i in 0..cols {
            for j in 0..rows {
                anchors.push(Vec2::new(
                    (i as f32 - cols as f32 / 2.0) * spacing,
                    (j as f32 - rows as f32 / 2.0) * spacing,
                ));
            }
        }
        let instances = vec![GridInstance::default(); anchors.len()];
        Self {
            anchors,
            instances,
            visible: true,
        }
    }

    /// Recompute every instance transform.
    ///
    /// Returns false, leaving the buffer untouched, while grid suppression is
    /// active.
    pub fn update(&mut self, t: f32, current: &AnimationVector, pointer: &PointerWell) -> bool {
        self.visible = current.suppress_grid <= GRID_SUPPRESS_THRESHOLD;
        if !self.visible {
            return false;
        }

        let amp = current.amplitude;
        for (anchor, instance) in self.anchors.iter().zip(self.instances.iter_mut()) {
            let (x, z) = (anchor.x, anchor.y);
            let influence = pointer.influence(x, z);
            let keep = 1.0 - influence;

            let y = height(x, z, t, current.frequency, current.wave_shape, amp) * keep;
            let rot_x = (x * 0.2 + t).cos() * 0.5 * keep * amp;
            let rot_z = (z * 0.2 + t).sin() * 0.5 * keep * amp;
            let scale = 1.0 + influence * 0.5;

            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(scale),
                Quat::from_euler(EulerRot::XYZ, rot_x, 0.0, rot_z),
                Vec3::new(x, y, z),
            );
            instance.model = model.to_cols_array_2d();
        }
        true
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn instances(&self) -> &[GridInstance] {
        &self.instances
    }

    #[inline]
    pub fn anchors(&self) -> &[Vec2] {
        &self.anchors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POINTER_DECAY;
    use crate::state::PresetId;

    fn vector(id: PresetId) -> AnimationVector {
        AnimationVector::from_preset(id.state())
    }

    fn translation(instance: &GridInstance) -> Vec3 {
        Mat4::from_cols_array_2d(&instance.model).w_axis.truncate()
    }

    #[test]
    fn test_lattice_layout() {
        let grid = Grid::default();
        assert_eq!(grid.len(), GRID_ROWS * GRID_COLS);
        assert_eq!(grid.anchors()[0], Vec2::new(-35.0, -35.0));
        // Column-major: index 1 is the next row
        assert!((grid.anchors()[1].y - (-35.0 + GRID_SPACING)).abs() < 1e-5);
    }

    #[test]
    fn test_update_writes_wave_height() {
        let mut grid = Grid::new(4, 4, 1.0);
        let pointer = PointerWell::new(POINTER_DECAY);
        let current = vector(PresetId::Hero);
        assert!(grid.update(0.5, &current, &pointer));

        for (anchor, instance) in grid.anchors().iter().zip(grid.instances()) {
            let pos = translation(instance);
            let expected = height(anchor.x, anchor.y, 0.5, 0.2, 0.0, 1.0);
            assert!((pos.y - expected).abs() < 1e-4);
            assert!((pos.x - anchor.x).abs() < 1e-5);
            assert!((pos.z - anchor.y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_suppressed_grid_is_skipped() {
        let mut grid = Grid::new(4, 4, 1.0);
        let pointer = PointerWell::new(POINTER_DECAY);
        let before = grid.instances().to_vec();
        assert!(!grid.update(1.0, &vector(PresetId::Medical), &pointer));
        assert!(!grid.visible());
        assert_eq!(grid.instances(), &before[..]);
    }

    #[test]
    fn test_pointer_well_flattens_and_scales() {
        let camera = crate::math::PerspectiveCamera::default();
        let mut pointer = PointerWell::new(POINTER_DECAY);
        for _ in 0..500 {
            pointer.update(&camera, 1.0 / 45.0);
        }
        let mut grid = Grid::new(1, 1, 1.0);
        // The single anchor sits at (-0.5, -0.5), inside the well
        let current = vector(PresetId::Extreme);
        grid.update(2.0, &current, &pointer);
        let model = Mat4::from_cols_array_2d(&grid.instances()[0].model);
        let (scale, _, pos) = model.to_scale_rotation_translation();
        let influence = pointer.influence(-0.5, -0.5);
        assert!(influence > 0.9);
        assert!(pos.y.abs() < 2.5 * 5.0 * (1.0 - influence) + 1e-3);
        assert!((scale.x - (1.0 + 0.5 * influence)).abs() < 1e-3);
    }
}

//! Fixed perspective camera

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::constants::{CAMERA_FAR, CAMERA_FOV_Y, CAMERA_NEAR, CAMERA_POSITION};

/// Perspective camera looking at a fixed target
///
/// Only the aspect ratio changes at runtime (on resize). Projection uses a
/// `0..1` depth range to match wgpu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(CAMERA_POSITION),
            target: Vec3::ZERO,
            fov_y: CAMERA_FOV_Y,
            aspect: 16.0 / 9.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl PerspectiveCamera {
    /// Default camera with the given aspect ratio
    pub fn with_aspect(aspect: f32) -> Self {
        let mut camera = Self::default();
        camera.set_aspect(aspect);
        camera
    }

    /// Update the aspect ratio, ignoring degenerate values
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World-space orientation of the camera (used to billboard quads)
    pub fn orientation(&self) -> Quat {
        let (_, rotation, _) = self.view().inverse().to_scale_rotation_translation();
        rotation
    }

    /// Ray through an NDC point as `(origin, direction)`
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        (self.position, (far - near).normalize_or_zero())
    }

    /// Intersection of the NDC ray with the `y = 0` ground plane
    pub fn intersect_ground(&self, ndc: Vec2) -> Option<Vec3> {
        let (origin, dir) = self.ray_from_ndc(ndc);
        if dir.y.abs() < 1e-6 {
            return None;
        }
        let t = -origin.y / dir.y;
        if !t.is_finite() || t < 0.0 {
            return None;
        }
        Some(origin + dir * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_hits_look_target() {
        let camera = PerspectiveCamera::with_aspect(16.0 / 9.0);
        let hit = camera.intersect_ground(Vec2::ZERO).unwrap();
        assert!(hit.length() < 1e-3, "hit = {:?}", hit);
    }

    #[test]
    fn test_ray_above_horizon_misses() {
        let camera = PerspectiveCamera::default();
        // Well past the top edge the ray points at the sky
        assert!(camera.intersect_ground(Vec2::new(0.0, 3.0)).is_none());
    }

    #[test]
    fn test_lower_screen_hits_nearer_ground() {
        let camera = PerspectiveCamera::default();
        let hit = camera.intersect_ground(Vec2::new(0.0, -0.8)).unwrap();
        assert!(hit.z > 0.0);
        assert!(hit.y.abs() < 1e-3);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate() {
        let mut camera = PerspectiveCamera::with_aspect(2.0);
        camera.set_aspect(0.0);
        camera.set_aspect(f32::NAN);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_orientation_faces_target() {
        let camera = PerspectiveCamera::default();
        let forward = camera.orientation() * Vec3::NEG_Z;
        let expected = (camera.target - camera.position).normalize();
        assert!(forward.dot(expected) > 0.999);
    }
}

//! Instance geometry for the grid

use glam::{Mat3, Vec3};

use crate::constants::{GRID_TETRA_RADIUS, GRID_TETRA_STRETCH};

/// Vertex with a flat face normal
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "wasm", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

const CORNERS: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];

const FACES: [[usize; 3]; 4] = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

/// Elongated tetrahedron lying along Z, as a non-indexed triangle list
///
/// Radius 0.15, stretched 5× along Y, then rotated a quarter turn about X.
pub fn tetrahedron() -> Vec<MeshVertex> {
    let shape = Mat3::from_rotation_x(std::f32::consts::FRAC_PI_2)
        * Mat3::from_diagonal(Vec3::new(1.0, GRID_TETRA_STRETCH, 1.0));
    let corners: Vec<Vec3> = CORNERS
        .iter()
        .map(|c| shape * (Vec3::from_array(*c).normalize() * GRID_TETRA_RADIUS))
        .collect();

    let mut vertices = Vec::with_capacity(FACES.len() * 3);
    for [a, b, c] in FACES {
        let (a, b, c) = (corners[a], corners[b], corners[c]);
        let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
        for position in [a, b, c] {
            vertices.push(MeshVertex {
                position: position.to_array(),
                normal,
            });
        }
    }
    vertices
}

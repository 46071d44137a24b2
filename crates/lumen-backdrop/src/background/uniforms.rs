//! Uniform blocks shared with the WGSL shaders
//!
//! Every struct here must match WGSL alignment: fields are `vec4`-sized so
//! the Rust and WGSL layouts line up without implicit padding.

use glam::Vec3;

use crate::constants::{
    AMBIENT_INTENSITY, BACKGROUND_HEX, FOG_DENSITY, KEY_LIGHT_INTENSITY, KEY_LIGHT_POSITION,
};
use crate::engine::FrameReport;
use crate::math::{Hex, NdcRect, PerspectiveCamera, Rgb};
use crate::postfx::{BloomSettings, ScreenFxSettings};

/// Camera, lighting, fog and grid material. 208 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],  // offset 0
    pub camera_position: [f32; 4], // offset 64  (xyz, time)
    pub camera_right: [f32; 4],    // offset 80
    pub camera_up: [f32; 4],       // offset 96
    pub viewport: [f32; 4],        // offset 112 (width, height, 1/width, 1/height)
    pub fog: [f32; 4],             // offset 128 (rgb, density)
    pub light: [f32; 4],           // offset 144 (direction to light, intensity)
    pub ambient: [f32; 4],         // offset 160 (rgb * intensity)
    pub base_color: [f32; 4],      // offset 176 (rgb, roughness)
    pub emissive: [f32; 4],        // offset 192 (rgb, metalness)
}

impl SceneUniforms {
    pub fn new(camera: &PerspectiveCamera, width: u32, height: u32, report: &FrameReport) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let orientation = camera.orientation();
        let right = orientation * Vec3::X;
        let up = orientation * Vec3::Y;
        let light = Vec3::from_array(KEY_LIGHT_POSITION).normalize();
        let snapshot = &report.snapshot;

        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_position: camera.position.extend(report.time).to_array(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            viewport: [w, h, 1.0 / w, 1.0 / h],
            fog: Hex(BACKGROUND_HEX).to_rgb().with_alpha(FOG_DENSITY),
            light: light.extend(KEY_LIGHT_INTENSITY).to_array(),
            ambient: [AMBIENT_INTENSITY, AMBIENT_INTENSITY, AMBIENT_INTENSITY, 0.0],
            base_color: snapshot.color.with_alpha(snapshot.roughness),
            emissive: snapshot.emissive.with_alpha(snapshot.metalness),
        }
    }
}

/// Per-draw color and point parameters. 32 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StyleUniforms {
    pub color: [f32; 4],  // offset 0  (rgb, opacity)
    pub params: [f32; 4], // offset 16 (point size, glow, time, 0)
}

impl StyleUniforms {
    pub fn points(tint: Rgb, opacity: f32, size: f32) -> Self {
        Self {
            color: tint.with_alpha(opacity),
            params: [size, 0.0, 0.0, 0.0],
        }
    }

    pub fn lines(tint: Rgb, opacity: f32) -> Self {
        Self::points(tint, opacity, 0.0)
    }

    pub fn bubbles(report: &FrameReport) -> Self {
        Self {
            color: report.snapshot.emissive.with_alpha(report.bubble_style.opacity),
            params: [0.0, report.bubble_style.glow, report.time, 0.0],
        }
    }
}

/// Stencil mask quad. 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaskUniforms {
    pub rect: [f32; 4], // offset 0 (center.xy, size.xy in NDC)
}

impl From<NdcRect> for MaskUniforms {
    fn from(rect: NdcRect) -> Self {
        Self { rect: rect.to_array() }
    }
}

/// Bright pass, blur and composite controls. 32 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub bloom: [f32; 4], // offset 0  (threshold, strength, radius, 0)
    pub step: [f32; 4],  // offset 16 (blur step in uv, 0, 0)
}

impl PostUniforms {
    pub fn new(bloom: &BloomSettings) -> Self {
        Self {
            bloom: [bloom.threshold, bloom.strength, bloom.radius, 0.0],
            step: [0.0; 4],
        }
    }

    /// Blur along `direction` on a target of `width` x `height` texels
    ///
    /// The radius widens the tap spacing between one and three texels.
    pub fn blur(bloom: &BloomSettings, direction: [f32; 2], width: u32, height: u32) -> Self {
        let spread = 1.0 + 2.0 * bloom.radius.clamp(0.0, 1.0);
        let texel = [1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32];
        Self {
            step: [
                direction[0] * texel[0] * spread,
                direction[1] * texel[1] * spread,
                0.0,
                0.0,
            ],
            ..Self::new(bloom)
        }
    }
}

/// Screen-space scanline overlay. 32 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenFxUniforms {
    pub tint: [f32; 4],   // offset 0  (rgb, intensity)
    pub params: [f32; 4], // offset 16 (time, width, height, 0)
}

impl ScreenFxUniforms {
    pub fn new(fx: &ScreenFxSettings, width: u32, height: u32) -> Self {
        Self {
            tint: fx.tint.with_alpha(fx.intensity),
            params: [fx.time, width as f32, height as f32, 0.0],
        }
    }
}

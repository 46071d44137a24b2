//! wgpu renderer for the backdrop
//!
//! Draws what [`BackdropEngine`](crate::BackdropEngine) simulated into a
//! browser canvas (WebGPU, or WebGL2 through wgpu's GL backend):
//!
//! 1. Scene pass into an HDR target with a depth-stencil attachment: the
//!    stencil mask, the instanced grid, particle fields, network lines and
//!    the stencil-tested overlay
//! 2. Bright pass and a separable blur at half resolution
//! 3. Composite with ACES filmic tone mapping into the surface
//! 4. Optional additive screen fx, clipped by the same stencil plane

mod init;
mod render;
mod renderer;
mod shaders;
mod uniforms;

pub use render::ScenePlan;
pub use renderer::{BackgroundRenderer, GpuSurface};
pub use uniforms::{MaskUniforms, PostUniforms, SceneUniforms, ScreenFxUniforms, StyleUniforms};

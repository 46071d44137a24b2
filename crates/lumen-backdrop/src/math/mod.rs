//! Geometry and color types for the backdrop
//!
//! 3D vector math uses `glam`; these types cover what `glam` does not:
//! viewport sizes, DOM rectangles in CSS pixels, NDC rectangles, linear
//! colors and the fixed perspective camera.

mod camera;
mod color;
mod rect;
mod size;

pub use camera::PerspectiveCamera;
pub use color::{Hex, Rgb};
pub use rect::{NdcRect, ScreenRect};
pub use size::Size;

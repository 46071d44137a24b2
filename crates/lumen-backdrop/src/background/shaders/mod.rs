mod bloom;
mod bubble;
mod common;
mod composite;
mod grid;
mod lines;
mod mask;
mod points;
mod screen_fx;

pub use bloom::{BLUR_BODY, BRIGHT_BODY, POST_PRELUDE};
pub use bubble::BUBBLE_BODY;
pub use common::{FULLSCREEN_VERTEX, SCENE_PRELUDE};
pub use composite::COMPOSITE_BODY;
pub use grid::GRID_BODY;
pub use lines::LINES_BODY;
pub use mask::SHADER_MASK;
pub use points::POINTS_BODY;
pub use screen_fx::SCREEN_FX_BODY;

/// 3D pass source: scene bindings followed by `body`
pub fn scene_shader(body: &str) -> String {
    format!("{SCENE_PRELUDE}\n{body}")
}

/// Fullscreen pass source: the shared vertex stage followed by `body`
pub fn fullscreen_shader(body: &str) -> String {
    format!("{FULLSCREEN_VERTEX}\n{body}")
}

/// Bright pass and blur source
pub fn post_shader(body: &str) -> String {
    format!("{FULLSCREEN_VERTEX}\n{POST_PRELUDE}\n{body}")
}

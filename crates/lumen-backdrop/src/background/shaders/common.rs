/// Scene bindings shared by every 3D pass: camera, lighting, fog and the
/// per-draw style block
pub const SCENE_PRELUDE: &str = r#"
struct Scene {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    camera_right: vec4<f32>,
    camera_up: vec4<f32>,
    viewport: vec4<f32>,
    fog: vec4<f32>,
    light: vec4<f32>,
    ambient: vec4<f32>,
    base_color: vec4<f32>,
    emissive: vec4<f32>,
};

struct Style {
    color: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0) var<uniform> scene: Scene;
@group(1) @binding(0) var<uniform> style: Style;

// Exponential-squared fog factor, 0 at the camera
fn fog_factor(world: vec3<f32>) -> f32 {
    let d = distance(world, scene.camera_position.xyz) * scene.fog.w;
    return clamp(1.0 - exp(-d * d), 0.0, 1.0);
}

// Two triangles covering [-1, 1]^2
fn quad_corner(index: u32) -> vec2<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    return corners[index % 6u];
}
"#;

/// Oversized fullscreen triangle; `uv` has its origin at the top-left
pub const FULLSCREEN_VERTEX: &str = r#"
struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VsOut {
    var out: VsOut;

    // vertex 0: (-1, -1), vertex 1: (3, -1), vertex 2: (-1, 3)
    let x = f32(i32(vertex_index & 1u) * 4 - 1);
    let y = f32(i32(vertex_index >> 1u) * 4 - 1);

    out.position = vec4<f32>(x, y, 0.0, 1.0);
    out.uv = vec2<f32>((x + 1.0) * 0.5, (1.0 - y) * 0.5);
    return out;
}
"#;

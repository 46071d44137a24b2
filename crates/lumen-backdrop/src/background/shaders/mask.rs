/// Stencil mask quad; writes no color
pub const SHADER_MASK: &str = r#"
struct Mask {
    rect: vec4<f32>,
};

@group(0) @binding(0) var<uniform> mask: Mask;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> @builtin(position) vec4<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
    );
    let p = mask.rect.xy + corners[vertex_index % 6u] * mask.rect.zw;
    return vec4<f32>(p, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(0.0);
}
"#;

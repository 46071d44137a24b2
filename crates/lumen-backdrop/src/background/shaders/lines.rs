/// Network connections as a line list
pub const LINES_BODY: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) world: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VsOut {
    var out: VsOut;
    out.clip = scene.view_proj * vec4<f32>(position, 1.0);
    out.world = position;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let alpha = style.color.a * (1.0 - fog_factor(in.world));
    return vec4<f32>(style.color.rgb, alpha);
}
"#;

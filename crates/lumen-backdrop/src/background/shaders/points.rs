/// Size-attenuated round points drawn as instanced quads
///
/// Pixel size follows `size * (height / 2) / depth` with a one-pixel floor.
/// Fog fades the point out instead of tinting it, since points blend
/// additively.
pub const POINTS_BODY: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) corner: vec2<f32>,
    @location(1) world: vec3<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
) -> VsOut {
    let corner = quad_corner(vertex_index);
    var clip = scene.view_proj * vec4<f32>(position, 1.0);
    let w = max(clip.w, 0.0001);
    let pixels = max(style.params.x * scene.viewport.y * 0.5 / w, 1.0);
    clip.x += corner.x * pixels * scene.viewport.z * clip.w;
    clip.y += corner.y * pixels * scene.viewport.w * clip.w;

    var out: VsOut;
    out.clip = clip;
    out.corner = corner;
    out.world = position;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let r = length(in.corner);
    if (r > 1.0) {
        discard;
    }
    let soft = 1.0 - smoothstep(0.6, 1.0, r);
    let alpha = style.color.a * soft * (1.0 - fog_factor(in.world));
    return vec4<f32>(style.color.rgb, alpha);
}
"#;

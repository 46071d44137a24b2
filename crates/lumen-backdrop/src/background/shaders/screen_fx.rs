/// Scanlines, a slow sweep band and grain inside a radial vignette
pub const SCREEN_FX_BODY: &str = r#"
struct Fx {
    tint: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0) var<uniform> fx: Fx;

fn hash(q: vec2<f32>) -> f32 {
    var p = fract(q * vec2<f32>(123.34, 456.21));
    p += dot(p, p + 45.32);
    return fract(p.x * p.y);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let intensity = clamp(fx.tint.a, 0.0, 1.0);
    if (intensity < 0.001) {
        return vec4<f32>(0.0);
    }
    let time = fx.params.x;
    // Bottom-left origin
    let uv = vec2<f32>(in.uv.x, 1.0 - in.uv.y);

    let scan = smoothstep(0.35, 0.65, sin(uv.y * 900.0 + time * 6.0) * 0.5 + 0.5);
    let sweep = smoothstep(0.80, 1.0, sin(uv.y * 6.0 - time * 1.2) * 0.5 + 0.5);
    let grain = hash(uv * vec2<f32>(800.0, 450.0) + time * vec2<f32>(0.3, 0.7)) - 0.5;

    let c = uv - 0.5;
    let vignette = 1.0 - smoothstep(0.12, 0.58, dot(c, c));

    let amount = (scan * 0.10 + sweep * 0.10 + grain * 0.05) * vignette;
    return vec4<f32>(fx.tint.rgb * amount, 0.45 * intensity);
}
"#;

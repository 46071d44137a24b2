/// Post bindings: one sampled texture plus the post block
pub const POST_PRELUDE: &str = r#"
struct Post {
    bloom: vec4<f32>,
    step: vec4<f32>,
};

@group(0) @binding(0) var source_texture: texture_2d<f32>;
@group(0) @binding(1) var source_sampler: sampler;
@group(1) @binding(0) var<uniform> post: Post;
"#;

/// Keeps pixels brighter than the threshold
pub const BRIGHT_BODY: &str = r#"
@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let color = textureSample(source_texture, source_sampler, in.uv).rgb;
    let luma = dot(color, vec3<f32>(0.2126, 0.7152, 0.0722));
    let threshold = post.bloom.x;
    let keep = smoothstep(threshold, threshold + 0.1, luma);
    return vec4<f32>(color * keep, 1.0);
}
"#;

/// Nine-tap separable gaussian along `post.step`
pub const BLUR_BODY: &str = r#"
@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    var weights = array<f32, 5>(0.227027, 0.1945946, 0.1216216, 0.054054, 0.016216);
    let step = post.step.xy;
    var color = textureSample(source_texture, source_sampler, in.uv).rgb * weights[0];
    for (var i = 1; i < 5; i++) {
        let offset = step * f32(i);
        color += textureSample(source_texture, source_sampler, in.uv + offset).rgb * weights[i];
        color += textureSample(source_texture, source_sampler, in.uv - offset).rgb * weights[i];
    }
    return vec4<f32>(color, 1.0);
}
"#;

/// Scene plus bloom, ACES filmic tone mapped
///
/// Group 0 is the scene, group 1 the blurred bloom, group 2 the post block.
pub const COMPOSITE_BODY: &str = r#"
struct Post {
    bloom: vec4<f32>,
    step: vec4<f32>,
};

@group(0) @binding(0) var scene_texture: texture_2d<f32>;
@group(0) @binding(1) var scene_sampler: sampler;
@group(1) @binding(0) var bloom_texture: texture_2d<f32>;
@group(1) @binding(1) var bloom_sampler: sampler;
@group(2) @binding(0) var<uniform> post: Post;

fn rrt_and_odt_fit(v: vec3<f32>) -> vec3<f32> {
    let a = v * (v + 0.0245786) - 0.000090537;
    let b = v * (0.983729 * v + 0.4329510) + 0.238081;
    return a / b;
}

fn aces_filmic(input: vec3<f32>) -> vec3<f32> {
    let aces_in = mat3x3<f32>(
        vec3<f32>(0.59719, 0.07600, 0.02840),
        vec3<f32>(0.35458, 0.90834, 0.13383),
        vec3<f32>(0.04823, 0.01566, 0.83777),
    );
    let aces_out = mat3x3<f32>(
        vec3<f32>(1.60475, -0.10208, -0.00327),
        vec3<f32>(-0.53108, 1.10813, -0.07276),
        vec3<f32>(-0.07367, -0.00605, 1.07602),
    );
    var color = input / 0.6;
    color = aces_in * color;
    color = rrt_and_odt_fit(color);
    color = aces_out * color;
    return clamp(color, vec3<f32>(0.0), vec3<f32>(1.0));
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let base = textureSample(scene_texture, scene_sampler, in.uv).rgb;
    let glow = textureSample(bloom_texture, bloom_sampler, in.uv).rgb;
    let hdr = base + glow * post.bloom.y;
    return vec4<f32>(aces_filmic(hdr), 1.0);
}
"#;

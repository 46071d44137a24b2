/// Billboarded glass bubbles: rim glow, liquid noise and a specular spot,
/// faded toward the screen edges
pub const BUBBLE_BODY: &str = r#"
struct VsIn {
    @builtin(vertex_index) vertex_index: u32,
    @location(0) model_0: vec4<f32>,
    @location(1) model_1: vec4<f32>,
    @location(2) model_2: vec4<f32>,
    @location(3) model_3: vec4<f32>,
    @location(4) seed_depth: vec2<f32>,
};

struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) corner: vec2<f32>,
    @location(1) screen: vec2<f32>,
    @location(2) seed: f32,
    @location(3) depth: f32,
};

@vertex
fn vs_main(in: VsIn) -> VsOut {
    let corner = quad_corner(in.vertex_index);
    let model = mat4x4<f32>(in.model_0, in.model_1, in.model_2, in.model_3);
    let clip = scene.view_proj * model * vec4<f32>(corner * 0.5, 0.0, 1.0);

    var out: VsOut;
    out.clip = clip;
    out.corner = corner;
    out.screen = clip.xy / clip.w * 0.5 + 0.5;
    out.seed = in.seed_depth.x;
    out.depth = in.seed_depth.y;
    return out;
}

fn hash(n: f32) -> f32 {
    return fract(sin(n) * 43758.5453123);
}

fn noise(x: vec2<f32>, seed: f32) -> f32 {
    let p = floor(x);
    var f = fract(x);
    f = f * f * (3.0 - 2.0 * f);
    let n = p.x + p.y * 57.0 + seed * 113.0;
    let a = hash(n);
    let b = hash(n + 1.0);
    let c = hash(n + 57.0);
    let d = hash(n + 58.0);
    return mix(mix(a, b, f.x), mix(c, d, f.x), f.y);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let uv = in.corner;
    let r = length(uv);

    let cut = 1.0 - smoothstep(0.99, 1.03, r);
    if (cut < 0.01) {
        discard;
    }
    let mask = 1.0 - smoothstep(0.92, 1.0, r);

    let rim = pow(smoothstep(0.62, 0.98, r), 2.3);

    let hl = uv - vec2<f32>(-0.24, 0.20);
    let spot = exp(-dot(hl, hl) * 10.0);

    let tint = style.color.rgb;
    let glow = style.params.y;
    let t = style.params.z * 0.30 + in.seed * 10.0;
    let w = uv * (2.2 + in.depth * 1.1);
    let n1 = noise(w * 3.2 + vec2<f32>(t, -t), in.seed);
    let n2 = noise(w * 6.0 + vec2<f32>(-t * 1.1, t * 0.9), in.seed);
    let liquid = smoothstep(0.35, 0.80, n1 * 0.55 + n2 * 0.45);

    let inner = (1.0 - smoothstep(0.0, 0.95, r)) * 0.35;
    let depth_fade = 0.60 + (1.0 - in.depth) * 0.55;

    var col = mix(vec3<f32>(0.02, 0.05, 0.03), tint * 0.18, 0.45);
    col += tint * (liquid * 0.16) * depth_fade;
    col += tint * (rim * 0.55) * glow * depth_fade;
    col += vec3<f32>(1.0) * (spot * 0.22) * depth_fade;
    col -= vec3<f32>(0.0, 0.06, 0.02) * inner;

    var alpha = (0.08 + rim * 0.25 + spot * 0.08 + liquid * 0.10) * mask;
    alpha *= style.color.a * depth_fade;

    let margin = 0.08;
    let ex = smoothstep(0.0, margin, in.screen.x) * smoothstep(0.0, margin, 1.0 - in.screen.x);
    let ey = smoothstep(0.0, margin, in.screen.y) * smoothstep(0.0, margin, 1.0 - in.screen.y);
    let top_cut = smoothstep(0.02, 0.14, in.screen.y);
    alpha *= ex * ey * top_cut;

    return vec4<f32>(clamp(col, vec3<f32>(0.0), vec3<f32>(0.95)), alpha);
}
"#;

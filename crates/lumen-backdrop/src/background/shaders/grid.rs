/// Instanced tetrahedra with a metallic-roughness approximation and fog
pub const GRID_BODY: &str = r#"
const RECIPROCAL_PI: f32 = 0.31830988618;

struct VsIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
};

struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) world: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(in: VsIn) -> VsOut {
    let model = mat4x4<f32>(in.model_0, in.model_1, in.model_2, in.model_3);
    let world = model * vec4<f32>(in.position, 1.0);

    var out: VsOut;
    out.clip = scene.view_proj * world;
    out.world = world.xyz;
    out.normal = (model * vec4<f32>(in.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VsOut, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.normal);
    if (!front) {
        n = -n;
    }
    let l = normalize(scene.light.xyz);
    let v = normalize(scene.camera_position.xyz - in.world);
    let h = normalize(l + v);

    let albedo = scene.base_color.rgb;
    let roughness = clamp(scene.base_color.w, 0.04, 1.0);
    let metalness = clamp(scene.emissive.w, 0.0, 1.0);
    let diffuse = albedo * (1.0 - metalness);
    let f0 = mix(vec3<f32>(0.04), albedo, metalness);

    let ndl = max(dot(n, l), 0.0);
    let shininess = exp2(10.0 * (1.0 - roughness) + 1.0);
    let specular = f0 * pow(max(dot(n, h), 0.0), shininess) * (shininess + 2.0) * 0.125;

    var color = (diffuse * RECIPROCAL_PI + specular) * ndl * scene.light.w;
    color += diffuse * RECIPROCAL_PI * scene.ambient.rgb;
    color += scene.emissive.rgb;

    color = mix(color, scene.fog.rgb, fog_factor(in.world));
    return vec4<f32>(color, 1.0);
}
"#;

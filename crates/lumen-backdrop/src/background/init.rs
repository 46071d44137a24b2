use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wgpu::util::DeviceExt;

use super::shaders::*;
use crate::error::BackdropError;
use crate::grid::{GridInstance, MeshVertex};
use crate::overlay::BubbleInstance;

/// Depth plus the stencil plane used to clip the overlay
pub const DEPTH_STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Additive blending used by points, lines and the screen fx
pub const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Create wgpu device and adapter
pub async fn create_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'static>,
) -> Result<(wgpu::Device, wgpu::Queue, wgpu::Adapter), BackdropError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(BackdropError::NoAdapter)?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Backdrop Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await
        .map_err(|e| BackdropError::Device(e.to_string()))?;

    Ok((device, queue, adapter))
}

/// Raised by the device-lost callback
///
/// WebGPU has no canvas event for a lost device, so the host polls this once
/// per frame. Our own `destroy()` on release does not count as a loss.
#[derive(Clone, Debug, Default)]
pub struct DeviceLoss(Arc<AtomicBool>);

impl DeviceLoss {
    pub fn watch(device: &wgpu::Device) -> Self {
        let loss = Self::default();
        let flag = loss.clone();
        device.set_device_lost_callback(move |reason, message| flag.record(reason, &message));
        loss
    }

    fn record(&self, reason: wgpu::DeviceLostReason, message: &str) {
        if matches!(reason, wgpu::DeviceLostReason::Destroyed) {
            return;
        }
        log::warn!("[renderer] device lost ({:?}): {}", reason, message);
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_lost(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Configure the surface
pub fn configure_surface(
    surface: &wgpu::Surface<'static>,
    adapter: &wgpu::Adapter,
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> Result<(wgpu::SurfaceConfiguration, wgpu::TextureFormat), BackdropError> {
    let surface_caps = surface.get_capabilities(adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .ok_or_else(|| BackdropError::Surface("no supported surface formats".to_string()))?;
    let alpha_mode = surface_caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(device, &surface_config);

    Ok((surface_config, surface_format))
}

/// HDR scene format when the adapter can render, blend and filter it
pub fn choose_scene_format(adapter: &wgpu::Adapter) -> wgpu::TextureFormat {
    let hdr = wgpu::TextureFormat::Rgba16Float;
    let features = adapter.get_texture_format_features(hdr);
    let usages = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
    let flags =
        wgpu::TextureFormatFeatureFlags::FILTERABLE | wgpu::TextureFormatFeatureFlags::BLENDABLE;
    let usable = features.allowed_usages.contains(usages) && features.flags.contains(flags);
    if usable {
        hdr
    } else {
        log::warn!("[renderer] Rgba16Float unavailable, scene falls back to Rgba8Unorm");
        wgpu::TextureFormat::Rgba8Unorm
    }
}

// =============================================================================
// Layouts and buffers
// =============================================================================

/// Bind group layouts shared by every pipeline
pub struct Layouts {
    /// A single uniform buffer at binding 0
    pub uniform: wgpu::BindGroupLayout,
    /// A sampled texture at binding 0 and its sampler at binding 1
    pub texture: wgpu::BindGroupLayout,
}

pub fn create_layouts(device: &wgpu::Device) -> Layouts {
    let uniform = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Uniform Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let texture = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Texture Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    Layouts { uniform, texture }
}

/// Uniform buffer initialized with `value`, plus its bind group
pub fn create_uniform<T: bytemuck::Pod>(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    value: &T,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(value),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });

    (buffer, bind_group)
}

/// Vertex buffer sized for `contents`, rewritten every frame
///
/// Empty systems still get a small buffer so binding never sees size zero.
pub fn create_vertex_buffer(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
    if contents.is_empty() {
        return device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: 16,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
    }
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Post Sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

// =============================================================================
// Render targets
// =============================================================================

/// A color texture, its view and a bind group sampling it
pub struct ColorTarget {
    #[allow(dead_code)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

/// Offscreen textures, recreated on resize
pub struct RenderTargets {
    pub scene: ColorTarget,
    #[allow(dead_code)]
    pub depth: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    /// Half-resolution ping-pong pair for the bloom chain
    pub bloom_a: ColorTarget,
    pub bloom_b: ColorTarget,
}

pub fn create_render_targets(
    device: &wgpu::Device,
    layouts: &Layouts,
    sampler: &wgpu::Sampler,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> RenderTargets {
    let (width, height) = (width.max(1), height.max(1));
    let (half_width, half_height) = ((width / 2).max(1), (height / 2).max(1));

    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Scene Depth Stencil"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_STENCIL_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

    RenderTargets {
        scene: create_color_target(device, layouts, sampler, "Scene", format, width, height),
        depth,
        depth_view,
        bloom_a: create_color_target(
            device, layouts, sampler, "Bloom A", format, half_width, half_height,
        ),
        bloom_b: create_color_target(
            device, layouts, sampler, "Bloom B", format, half_width, half_height,
        ),
    }
}

fn create_color_target(
    device: &wgpu::Device,
    layouts: &Layouts,
    sampler: &wgpu::Sampler,
    label: &str,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> ColorTarget {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &layouts.texture,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    ColorTarget {
        texture,
        view,
        bind_group,
        width,
        height,
    }
}

// =============================================================================
// Pipelines
// =============================================================================

/// Stencil behaviour of a scene pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilMode {
    /// Neither tests nor writes the stencil plane
    Ignore,
    /// Always passes and replaces the stencil value with the reference
    Write,
    /// Passes only where the stencil value differs from the reference
    OutsideMask,
}

pub fn depth_stencil_state(
    depth_write_enabled: bool,
    depth_compare: wgpu::CompareFunction,
    mode: StencilMode,
) -> wgpu::DepthStencilState {
    let (face, read_mask, write_mask) = match mode {
        StencilMode::Ignore => (wgpu::StencilFaceState::IGNORE, 0, 0),
        StencilMode::Write => (
            wgpu::StencilFaceState {
                compare: wgpu::CompareFunction::Always,
                fail_op: wgpu::StencilOperation::Keep,
                depth_fail_op: wgpu::StencilOperation::Keep,
                pass_op: wgpu::StencilOperation::Replace,
            },
            0xff,
            0xff,
        ),
        StencilMode::OutsideMask => (
            wgpu::StencilFaceState {
                compare: wgpu::CompareFunction::NotEqual,
                fail_op: wgpu::StencilOperation::Keep,
                depth_fail_op: wgpu::StencilOperation::Keep,
                pass_op: wgpu::StencilOperation::Keep,
            },
            0xff,
            0,
        ),
    };

    wgpu::DepthStencilState {
        format: DEPTH_STENCIL_FORMAT,
        depth_write_enabled,
        depth_compare,
        stencil: wgpu::StencilState {
            front: face,
            back: face,
            read_mask,
            write_mask,
        },
        bias: wgpu::DepthBiasState::default(),
    }
}

/// A pipeline drawn either clipped by the mask or unclipped
pub struct StencilPair {
    pub masked: wgpu::RenderPipeline,
    pub open: wgpu::RenderPipeline,
}

impl StencilPair {
    #[inline]
    pub fn select(&self, stencil_test: bool) -> &wgpu::RenderPipeline {
        if stencil_test {
            &self.masked
        } else {
            &self.open
        }
    }
}

/// Every render pipeline of the backdrop
pub struct Pipelines {
    pub mask: wgpu::RenderPipeline,
    pub grid: wgpu::RenderPipeline,
    pub points: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
    pub bubbles: StencilPair,
    pub dust: StencilPair,
    pub bright: wgpu::RenderPipeline,
    pub blur: wgpu::RenderPipeline,
    pub composite: wgpu::RenderPipeline,
    pub screen_fx: StencilPair,
}

const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const GRID_INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4
];
const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];
const BUBBLE_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    0 => Float32x4, 1 => Float32x4, 2 => Float32x4, 3 => Float32x4, 4 => Float32x2
];

fn mesh_layout() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GridInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &GRID_INSTANCE_ATTRIBUTES,
        },
    ]
}

fn position_layout(step_mode: wgpu::VertexStepMode) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode,
        attributes: &POSITION_ATTRIBUTES,
    }
}

fn bubble_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<BubbleInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &BUBBLE_ATTRIBUTES,
    }
}

/// Create render pipelines for the scene, post chain and screen fx
pub fn create_pipelines(
    device: &wgpu::Device,
    layouts: &Layouts,
    scene_format: wgpu::TextureFormat,
    surface_format: wgpu::TextureFormat,
) -> Pipelines {
    let single_layout =
        create_pipeline_layout(device, "Single Uniform Layout", &[&layouts.uniform]);
    let styled_layout = create_pipeline_layout(
        device,
        "Styled Scene Layout",
        &[&layouts.uniform, &layouts.uniform],
    );
    let post_layout =
        create_pipeline_layout(device, "Post Layout", &[&layouts.texture, &layouts.uniform]);
    let composite_layout = create_pipeline_layout(
        device,
        "Composite Layout",
        &[&layouts.texture, &layouts.texture, &layouts.uniform],
    );

    let mask_shader = create_shader(device, "Mask Shader", SHADER_MASK.to_string());
    let grid_shader = create_shader(device, "Grid Shader", scene_shader(GRID_BODY));
    let points_shader = create_shader(device, "Points Shader", scene_shader(POINTS_BODY));
    let lines_shader = create_shader(device, "Lines Shader", scene_shader(LINES_BODY));
    let bubble_shader = create_shader(device, "Bubble Shader", scene_shader(BUBBLE_BODY));
    let bright_shader = create_shader(device, "Bright Pass Shader", post_shader(BRIGHT_BODY));
    let blur_shader = create_shader(device, "Blur Shader", post_shader(BLUR_BODY));
    let composite_shader =
        create_shader(device, "Composite Shader", fullscreen_shader(COMPOSITE_BODY));
    let fx_shader = create_shader(device, "Screen Fx Shader", fullscreen_shader(SCREEN_FX_BODY));

    let scene_target = |blend| TargetDesc {
        format: scene_format,
        blend,
        write_mask: wgpu::ColorWrites::ALL,
    };
    let overlay_depth = |mode| Some(depth_stencil_state(false, wgpu::CompareFunction::Less, mode));
    let fx_depth = |mode| Some(depth_stencil_state(false, wgpu::CompareFunction::Always, mode));

    let mask = create_single_pipeline(
        device,
        PipelineDesc {
            label: "Mask Pipeline",
            layout: &single_layout,
            shader: &mask_shader,
            buffers: &[],
            target: TargetDesc {
                format: scene_format,
                blend: None,
                write_mask: wgpu::ColorWrites::empty(),
            },
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth_stencil: Some(depth_stencil_state(
                false,
                wgpu::CompareFunction::Always,
                StencilMode::Write,
            )),
        },
    );

    let grid = create_single_pipeline(
        device,
        PipelineDesc {
            label: "Grid Pipeline",
            layout: &single_layout,
            shader: &grid_shader,
            buffers: &mesh_layout(),
            target: scene_target(None),
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth_stencil: Some(depth_stencil_state(
                true,
                wgpu::CompareFunction::Less,
                StencilMode::Ignore,
            )),
        },
    );

    let points = create_single_pipeline(
        device,
        PipelineDesc {
            label: "Points Pipeline",
            layout: &styled_layout,
            shader: &points_shader,
            buffers: &[position_layout(wgpu::VertexStepMode::Instance)],
            target: scene_target(Some(ADDITIVE_BLENDING)),
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth_stencil: overlay_depth(StencilMode::Ignore),
        },
    );

    let lines = create_single_pipeline(
        device,
        PipelineDesc {
            label: "Lines Pipeline",
            layout: &styled_layout,
            shader: &lines_shader,
            buffers: &[position_layout(wgpu::VertexStepMode::Vertex)],
            target: scene_target(Some(ADDITIVE_BLENDING)),
            topology: wgpu::PrimitiveTopology::LineList,
            depth_stencil: overlay_depth(StencilMode::Ignore),
        },
    );

    let bubble_pipeline = |label, mode| {
        create_single_pipeline(
            device,
            PipelineDesc {
                label,
                layout: &styled_layout,
                shader: &bubble_shader,
                buffers: &[bubble_layout()],
                target: scene_target(Some(wgpu::BlendState::ALPHA_BLENDING)),
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_stencil: overlay_depth(mode),
            },
        )
    };
    let bubbles = StencilPair {
        masked: bubble_pipeline("Bubble Pipeline (masked)", StencilMode::OutsideMask),
        open: bubble_pipeline("Bubble Pipeline", StencilMode::Ignore),
    };

    let dust_pipeline = |label, mode| {
        create_single_pipeline(
            device,
            PipelineDesc {
                label,
                layout: &styled_layout,
                shader: &points_shader,
                buffers: &[position_layout(wgpu::VertexStepMode::Instance)],
                target: scene_target(Some(ADDITIVE_BLENDING)),
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_stencil: overlay_depth(mode),
            },
        )
    };
    let dust = StencilPair {
        masked: dust_pipeline("Dust Pipeline (masked)", StencilMode::OutsideMask),
        open: dust_pipeline("Dust Pipeline", StencilMode::Ignore),
    };

    let fullscreen = |label, layout, shader, target| {
        create_single_pipeline(
            device,
            PipelineDesc {
                label,
                layout,
                shader,
                buffers: &[],
                target,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_stencil: None,
            },
        )
    };
    let bright = fullscreen(
        "Bright Pass Pipeline",
        &post_layout,
        &bright_shader,
        scene_target(None),
    );
    let blur = fullscreen("Blur Pipeline", &post_layout, &blur_shader, scene_target(None));
    let composite = fullscreen(
        "Composite Pipeline",
        &composite_layout,
        &composite_shader,
        TargetDesc {
            format: surface_format,
            blend: None,
            write_mask: wgpu::ColorWrites::ALL,
        },
    );

    let fx_pipeline = |label, mode| {
        create_single_pipeline(
            device,
            PipelineDesc {
                label,
                layout: &single_layout,
                shader: &fx_shader,
                buffers: &[],
                target: TargetDesc {
                    format: surface_format,
                    blend: Some(ADDITIVE_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                },
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_stencil: fx_depth(mode),
            },
        )
    };
    let screen_fx = StencilPair {
        masked: fx_pipeline("Screen Fx Pipeline (masked)", StencilMode::OutsideMask),
        open: fx_pipeline("Screen Fx Pipeline", StencilMode::Ignore),
    };

    Pipelines {
        mask,
        grid,
        points,
        lines,
        bubbles,
        dust,
        bright,
        blur,
        composite,
        screen_fx,
    }
}

fn create_pipeline_layout(
    device: &wgpu::Device,
    label: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts,
        push_constant_ranges: &[],
    })
}

fn create_shader(device: &wgpu::Device, label: &str, source: String) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

#[derive(Clone, Copy)]
struct TargetDesc {
    format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    write_mask: wgpu::ColorWrites,
}

struct PipelineDesc<'a> {
    label: &'a str,
    layout: &'a wgpu::PipelineLayout,
    shader: &'a wgpu::ShaderModule,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    target: TargetDesc,
    topology: wgpu::PrimitiveTopology,
    depth_stencil: Option<wgpu::DepthStencilState>,
}

/// Create a single render pipeline
fn create_single_pipeline(device: &wgpu::Device, desc: PipelineDesc<'_>) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            buffers: desc.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.target.format,
                blend: desc.target.blend,
                write_mask: desc.target.write_mask,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: desc.depth_stencil,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

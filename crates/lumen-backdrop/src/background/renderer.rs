use super::init::*;
use super::render::*;
use super::uniforms::*;
use crate::constants::{BACKGROUND_HEX, DUST_POINT_SIZE, NETWORK_POINT_SIZE, STREAM_POINT_SIZE};
use crate::engine::{BackdropEngine, FrameReport};
use crate::error::{BackdropError, FrameSkipped};
use crate::grid::tetrahedron;
use crate::math::Hex;
use crate::particles::Network;

/// Intermediate struct for GPU resources during initialization
struct GpuResources {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    surface_format: wgpu::TextureFormat,
    scene_format: wgpu::TextureFormat,
    loss: DeviceLoss,
}

/// Adapter, device and configured surface, before any scene resources exist
pub struct GpuSurface {
    surface: wgpu::Surface<'static>,
    gpu: GpuResources,
}

/// Uniform buffers and their bind groups
struct UniformSet {
    scene: (wgpu::Buffer, wgpu::BindGroup),
    mask: (wgpu::Buffer, wgpu::BindGroup),
    stream: (wgpu::Buffer, wgpu::BindGroup),
    nodes: (wgpu::Buffer, wgpu::BindGroup),
    lines: (wgpu::Buffer, wgpu::BindGroup),
    bubbles: (wgpu::Buffer, wgpu::BindGroup),
    dust: (wgpu::Buffer, wgpu::BindGroup),
    post: (wgpu::Buffer, wgpu::BindGroup),
    blur_h: (wgpu::Buffer, wgpu::BindGroup),
    blur_v: (wgpu::Buffer, wgpu::BindGroup),
    screen_fx: (wgpu::Buffer, wgpu::BindGroup),
}

/// Per-frame geometry, sized once from the engine's particle counts
struct GeometryBuffers {
    mesh: wgpu::Buffer,
    mesh_vertices: u32,
    grid: wgpu::Buffer,
    stream: wgpu::Buffer,
    nodes: wgpu::Buffer,
    lines: wgpu::Buffer,
    bubbles: wgpu::Buffer,
    dust: wgpu::Buffer,
}

/// Intermediate struct for render resources during initialization
struct RenderResources {
    layouts: Layouts,
    sampler: wgpu::Sampler,
    targets: RenderTargets,
    pipelines: Pipelines,
    uniforms: UniformSet,
    geometry: GeometryBuffers,
}

/// wgpu renderer for the backdrop scene, bloom chain and screen fx
///
/// Owns every GPU object. The simulation lives in [`BackdropEngine`]; each
/// frame the renderer uploads what the engine computed and encodes:
/// scene pass (mask, grid, stream, network, bubbles, dust), bright pass,
/// horizontal and vertical blur, tone-mapped composite and the optional
/// screen fx.
pub struct BackgroundRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    #[allow(dead_code)]
    surface_format: wgpu::TextureFormat,
    scene_format: wgpu::TextureFormat,
    loss: DeviceLoss,
    layouts: Layouts,
    sampler: wgpu::Sampler,
    targets: RenderTargets,
    pipelines: Pipelines,
    uniforms: UniformSet,
    geometry: GeometryBuffers,
    clear_color: wgpu::Color,
    viewport_revision: u64,
}

impl BackgroundRenderer {
    /// Create a renderer drawing into `canvas`, sized from the engine's viewport
    pub async fn new(
        canvas: web_sys::HtmlCanvasElement,
        engine: &BackdropEngine,
    ) -> Result<Self, BackdropError> {
        let (width, height) = engine.viewport().physical_size();
        let connected = Self::connect(canvas, width, height).await?;
        Ok(Self::build(connected, engine))
    }

    /// Acquire adapter, device and surface. The only asynchronous step.
    pub async fn connect(
        canvas: web_sys::HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<GpuSurface, BackdropError> {
        let (instance, surface) = Self::create_surface(canvas)?;
        let gpu = Self::setup_gpu(&instance, &surface, width, height).await?;
        Ok(GpuSurface { surface, gpu })
    }

    /// Create pipelines, targets and buffers for the engine's systems
    pub fn build(connected: GpuSurface, engine: &BackdropEngine) -> Self {
        let GpuSurface { surface, gpu } = connected;
        let (width, height) = (gpu.surface_config.width, gpu.surface_config.height);
        let resources = Self::setup_render_resources(&gpu, engine, width, height);

        log::info!(
            "[renderer] ready: {}x{}, scene {:?}, surface {:?}",
            width,
            height,
            gpu.scene_format,
            gpu.surface_format
        );

        let mut renderer = Self::assemble(surface, gpu, resources, engine.viewport_revision());
        let (width, height) = engine.viewport().physical_size();
        renderer.resize(width, height);
        renderer
    }

    /// Create the wgpu instance and surface from canvas
    #[cfg(target_arch = "wasm32")]
    fn create_surface(
        canvas: web_sys::HtmlCanvasElement,
    ) -> Result<(wgpu::Instance, wgpu::Surface<'static>), BackdropError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| BackdropError::Surface(e.to_string()))?;

        Ok((instance, surface))
    }

    /// Create the wgpu instance and surface from canvas (non-WASM stub)
    #[cfg(not(target_arch = "wasm32"))]
    fn create_surface(
        _canvas: web_sys::HtmlCanvasElement,
    ) -> Result<(wgpu::Instance, wgpu::Surface<'static>), BackdropError> {
        Err(BackdropError::UnsupportedTarget)
    }

    /// Setup GPU device, queue, and surface configuration
    async fn setup_gpu(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<GpuResources, BackdropError> {
        let (device, queue, adapter) = create_device(instance, surface).await?;
        let (surface_config, surface_format) =
            configure_surface(surface, &adapter, &device, width, height)?;
        let scene_format = choose_scene_format(&adapter);
        let loss = DeviceLoss::watch(&device);

        Ok(GpuResources {
            loss,
            device,
            queue,
            surface_config,
            surface_format,
            scene_format,
        })
    }

    /// Setup rendering resources (pipelines, targets, buffers)
    fn setup_render_resources(
        gpu: &GpuResources,
        engine: &BackdropEngine,
        width: u32,
        height: u32,
    ) -> RenderResources {
        let device = &gpu.device;
        let layouts = create_layouts(device);
        let sampler = create_sampler(device);
        let targets =
            create_render_targets(device, &layouts, &sampler, gpu.scene_format, width, height);
        let pipelines = create_pipelines(device, &layouts, gpu.scene_format, gpu.surface_format);

        let scene: SceneUniforms = bytemuck::Zeroable::zeroed();
        let uniform = |label: &str, style: StyleUniforms| {
            create_uniform(device, &layouts.uniform, label, &style)
        };
        let post = |label: &str| {
            create_uniform(device, &layouts.uniform, label, &PostUniforms::default())
        };
        let mask = MaskUniforms::default();
        let uniforms = UniformSet {
            scene: create_uniform(device, &layouts.uniform, "Scene Uniforms", &scene),
            mask: create_uniform(device, &layouts.uniform, "Mask Uniforms", &mask),
            stream: uniform("Stream Style", StyleUniforms::default()),
            nodes: uniform("Network Node Style", StyleUniforms::default()),
            lines: uniform("Network Line Style", StyleUniforms::default()),
            bubbles: uniform("Bubble Style", StyleUniforms::default()),
            dust: uniform("Dust Style", StyleUniforms::default()),
            post: post("Post Uniforms"),
            blur_h: post("Blur H Uniforms"),
            blur_v: post("Blur V Uniforms"),
            screen_fx: create_uniform(
                device,
                &layouts.uniform,
                "Screen Fx Uniforms",
                &ScreenFxUniforms::default(),
            ),
        };

        let mesh = tetrahedron();
        let geometry = GeometryBuffers {
            mesh: create_vertex_buffer(device, "Tetrahedron Vertices", bytemuck::cast_slice(&mesh)),
            mesh_vertices: mesh.len() as u32,
            grid: create_vertex_buffer(
                device,
                "Grid Instances",
                bytemuck::cast_slice(engine.grid().instances()),
            ),
            stream: create_vertex_buffer(
                device,
                "Stream Points",
                bytemuck::cast_slice(engine.stream().positions()),
            ),
            nodes: create_vertex_buffer(
                device,
                "Network Nodes",
                bytemuck::cast_slice(engine.network().positions()),
            ),
            lines: create_vertex_buffer(
                device,
                "Network Lines",
                bytemuck::cast_slice(engine.network().lines()),
            ),
            bubbles: create_vertex_buffer(
                device,
                "Bubble Instances",
                bytemuck::cast_slice(engine.bubbles().instances()),
            ),
            dust: create_vertex_buffer(
                device,
                "Dust Points",
                bytemuck::cast_slice(engine.dust().positions()),
            ),
        };

        RenderResources {
            layouts,
            sampler,
            targets,
            pipelines,
            uniforms,
            geometry,
        }
    }

    /// Assemble the final renderer from surface, GPU and render resources
    fn assemble(
        surface: wgpu::Surface<'static>,
        gpu: GpuResources,
        resources: RenderResources,
        viewport_revision: u64,
    ) -> Self {
        let clear = Hex(BACKGROUND_HEX).to_rgb();
        Self {
            device: gpu.device,
            queue: gpu.queue,
            surface,
            surface_config: gpu.surface_config,
            surface_format: gpu.surface_format,
            scene_format: gpu.scene_format,
            loss: gpu.loss,
            layouts: resources.layouts,
            sampler: resources.sampler,
            targets: resources.targets,
            pipelines: resources.pipelines,
            uniforms: resources.uniforms,
            geometry: resources.geometry,
            clear_color: wgpu::Color {
                r: clear.r as f64,
                g: clear.g as f64,
                b: clear.b as f64,
                a: 1.0,
            },
            viewport_revision,
        }
    }

    /// Resize the surface and recreate the offscreen targets
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.surface_config.width && height == self.surface_config.height {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.targets = create_render_targets(
            &self.device,
            &self.layouts,
            &self.sampler,
            self.scene_format,
            width,
            height,
        );
        log::debug!("[renderer] resized to {}x{}", width, height);
    }

    /// Render one frame from the engine state and its frame report
    pub fn render(
        &mut self,
        engine: &BackdropEngine,
        report: &FrameReport,
    ) -> Result<(), FrameSkipped> {
        if engine.viewport_revision() != self.viewport_revision {
            let (width, height) = engine.viewport().physical_size();
            self.resize(width, height);
            self.viewport_revision = engine.viewport_revision();
        }

        let plan = ScenePlan::from_report(report);
        self.upload(engine, report, &plan);

        let output = self.get_surface_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        self.encode_scene(&mut encoder, engine, &plan);
        self.encode_bloom(&mut encoder);

        render_fullscreen_pass(
            &mut encoder,
            "Composite Pass",
            &self.pipelines.composite,
            &[
                &self.targets.scene.bind_group,
                &self.targets.bloom_a.bind_group,
                &self.uniforms.post.1,
            ],
            &view,
        );

        if plan.screen_fx {
            render_screen_fx_pass(
                &mut encoder,
                self.pipelines.screen_fx.select(plan.stencil_test),
                &self.uniforms.screen_fx.1,
                &view,
                &self.targets.depth_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Whether the device was lost since this renderer was built
    #[inline]
    pub fn is_device_lost(&self) -> bool {
        self.loss.is_lost()
    }

    /// Release GPU memory immediately instead of waiting for garbage collection
    pub fn release(self) {
        self.device.destroy();
        log::info!("[renderer] released");
    }

    /// Write uniforms and the geometry of every visible system
    fn upload(&self, engine: &BackdropEngine, report: &FrameReport, plan: &ScenePlan) {
        let queue = &self.queue;
        let (width, height) = (self.surface_config.width, self.surface_config.height);
        let tint = report.snapshot.emissive;

        let scene = SceneUniforms::new(engine.camera(), width, height, report);
        queue.write_buffer(&self.uniforms.scene.0, 0, bytemuck::bytes_of(&scene));

        if let Some(region) = report.stencil.region() {
            let mask = MaskUniforms::from(region);
            queue.write_buffer(&self.uniforms.mask.0, 0, bytemuck::bytes_of(&mask));
        }

        if plan.grid {
            write_slice(queue, &self.geometry.grid, engine.grid().instances());
        }

        let stream = StyleUniforms::points(tint, report.stream_opacity, STREAM_POINT_SIZE);
        queue.write_buffer(&self.uniforms.stream.0, 0, bytemuck::bytes_of(&stream));
        write_slice(queue, &self.geometry.stream, engine.stream().positions());

        if plan.network {
            let (node_opacity, line_opacity) = Network::opacities(report.snapshot.show_network);
            let nodes = StyleUniforms::points(tint, node_opacity, NETWORK_POINT_SIZE);
            let lines = StyleUniforms::lines(tint, line_opacity);
            queue.write_buffer(&self.uniforms.nodes.0, 0, bytemuck::bytes_of(&nodes));
            queue.write_buffer(&self.uniforms.lines.0, 0, bytemuck::bytes_of(&lines));
            write_slice(queue, &self.geometry.nodes, engine.network().positions());
            write_slice(queue, &self.geometry.lines, engine.network().lines());
        }

        if plan.overlay {
            let bubbles = StyleUniforms::bubbles(report);
            let dust = StyleUniforms::points(tint, report.dust_opacity, DUST_POINT_SIZE);
            queue.write_buffer(&self.uniforms.bubbles.0, 0, bytemuck::bytes_of(&bubbles));
            queue.write_buffer(&self.uniforms.dust.0, 0, bytemuck::bytes_of(&dust));
            write_slice(queue, &self.geometry.bubbles, engine.bubbles().instances());
            write_slice(queue, &self.geometry.dust, engine.dust().positions());
        }

        let bloom = &self.targets.bloom_a;
        let post = PostUniforms::new(&report.bloom);
        let blur_h = PostUniforms::blur(&report.bloom, [1.0, 0.0], bloom.width, bloom.height);
        let blur_v = PostUniforms::blur(&report.bloom, [0.0, 1.0], bloom.width, bloom.height);
        queue.write_buffer(&self.uniforms.post.0, 0, bytemuck::bytes_of(&post));
        queue.write_buffer(&self.uniforms.blur_h.0, 0, bytemuck::bytes_of(&blur_h));
        queue.write_buffer(&self.uniforms.blur_v.0, 0, bytemuck::bytes_of(&blur_v));

        if plan.screen_fx {
            let fx = ScreenFxUniforms::new(&report.screen_fx, width, height);
            queue.write_buffer(&self.uniforms.screen_fx.0, 0, bytemuck::bytes_of(&fx));
        }
    }

    /// Mask first, then opaque grid, then blended layers back to front
    fn encode_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        engine: &BackdropEngine,
        plan: &ScenePlan,
    ) {
        let pipelines = &self.pipelines;
        let geometry = &self.geometry;
        let scene = &self.uniforms.scene.1;

        let mut pass = begin_scene_pass(
            encoder,
            &self.targets.scene.view,
            &self.targets.depth_view,
            self.clear_color,
        );

        if plan.mask {
            draw_mask(&mut pass, &pipelines.mask, &self.uniforms.mask.1);
        }

        if plan.grid {
            draw_instanced(
                &mut pass,
                &pipelines.grid,
                &[scene],
                &[&geometry.mesh, &geometry.grid],
                geometry.mesh_vertices,
                engine.grid().len() as u32,
            );
        }

        draw_instanced(
            &mut pass,
            &pipelines.points,
            &[scene, &self.uniforms.stream.1],
            &[&geometry.stream],
            6,
            engine.stream().positions().len() as u32,
        );

        if plan.network {
            draw_instanced(
                &mut pass,
                &pipelines.points,
                &[scene, &self.uniforms.nodes.1],
                &[&geometry.nodes],
                6,
                engine.network().positions().len() as u32,
            );
            draw_instanced(
                &mut pass,
                &pipelines.lines,
                &[scene, &self.uniforms.lines.1],
                &[&geometry.lines],
                engine.network().lines().len() as u32,
                1,
            );
        }

        if plan.overlay {
            draw_instanced(
                &mut pass,
                pipelines.bubbles.select(plan.stencil_test),
                &[scene, &self.uniforms.bubbles.1],
                &[&geometry.bubbles],
                6,
                engine.bubbles().instances().len() as u32,
            );
            draw_instanced(
                &mut pass,
                pipelines.dust.select(plan.stencil_test),
                &[scene, &self.uniforms.dust.1],
                &[&geometry.dust],
                6,
                engine.dust().positions().len() as u32,
            );
        }
    }

    /// Bright pass into A, horizontal blur into B, vertical blur back into A
    fn encode_bloom(&self, encoder: &mut wgpu::CommandEncoder) {
        let targets = &self.targets;
        render_fullscreen_pass(
            encoder,
            "Bright Pass",
            &self.pipelines.bright,
            &[&targets.scene.bind_group, &self.uniforms.post.1],
            &targets.bloom_a.view,
        );
        render_fullscreen_pass(
            encoder,
            "Blur Pass (horizontal)",
            &self.pipelines.blur,
            &[&targets.bloom_a.bind_group, &self.uniforms.blur_h.1],
            &targets.bloom_b.view,
        );
        render_fullscreen_pass(
            encoder,
            "Blur Pass (vertical)",
            &self.pipelines.blur,
            &[&targets.bloom_b.bind_group, &self.uniforms.blur_v.1],
            &targets.bloom_a.view,
        );
    }

    /// Get surface texture with error handling
    fn get_surface_texture(&mut self) -> Result<wgpu::SurfaceTexture, FrameSkipped> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                Err(FrameSkipped::Reconfigured)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(FrameSkipped::OutOfMemory),
            Err(wgpu::SurfaceError::Timeout) => Err(FrameSkipped::Timeout),
        }
    }
}

fn write_slice<T: bytemuck::Pod>(queue: &wgpu::Queue, buffer: &wgpu::Buffer, data: &[T]) {
    if !data.is_empty() {
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
    }
}

use crate::constants::STENCIL_REFERENCE;
use crate::engine::FrameReport;

/// Layers drawn for one frame, read off the frame report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScenePlan {
    /// Write the stencil mask before anything else
    pub mask: bool,
    pub grid: bool,
    pub network: bool,
    /// Bubbles and dust
    pub overlay: bool,
    /// Clip the overlay and screen fx to outside the mask
    pub stencil_test: bool,
    pub screen_fx: bool,
}

impl ScenePlan {
    pub fn from_report(report: &FrameReport) -> Self {
        let overlay = report.overlay_visible && report.stencil.overlay_allowed();
        Self {
            mask: report.stencil.region().is_some(),
            grid: report.grid_visible,
            network: report.network_visible,
            overlay,
            stencil_test: report.stencil.stencil_test(),
            screen_fx: report.screen_fx.enabled(),
        }
    }
}

/// Begin the offscreen scene pass, clearing color, depth and stencil
pub fn begin_scene_pass<'a>(
    encoder: &'a mut wgpu::CommandEncoder,
    color_view: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
    clear: wgpu::Color,
) -> wgpu::RenderPass<'a> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Scene Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(0),
                store: wgpu::StoreOp::Store,
            }),
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}

/// Write the stencil reference inside the mask rectangle
pub fn draw_mask(
    pass: &mut wgpu::RenderPass<'_>,
    pipeline: &wgpu::RenderPipeline,
    mask_bind_group: &wgpu::BindGroup,
) {
    pass.set_pipeline(pipeline);
    pass.set_stencil_reference(STENCIL_REFERENCE);
    pass.set_bind_group(0, mask_bind_group, &[]);
    pass.draw(0..6, 0..1);
}

/// Draw `instances` copies of a `vertices`-long primitive
///
/// Bind groups are set in order starting at group 0, vertex buffers starting
/// at slot 0. Nothing is drawn for an empty system.
pub fn draw_instanced(
    pass: &mut wgpu::RenderPass<'_>,
    pipeline: &wgpu::RenderPipeline,
    bind_groups: &[&wgpu::BindGroup],
    buffers: &[&wgpu::Buffer],
    vertices: u32,
    instances: u32,
) {
    if vertices == 0 || instances == 0 {
        return;
    }
    pass.set_pipeline(pipeline);
    pass.set_stencil_reference(STENCIL_REFERENCE);
    for (index, bind_group) in bind_groups.iter().enumerate() {
        pass.set_bind_group(index as u32, *bind_group, &[]);
    }
    for (slot, buffer) in buffers.iter().enumerate() {
        pass.set_vertex_buffer(slot as u32, buffer.slice(..));
    }
    pass.draw(0..vertices, 0..instances);
}

/// Render a fullscreen triangle into `target`
pub fn render_fullscreen_pass(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    pipeline: &wgpu::RenderPipeline,
    bind_groups: &[&wgpu::BindGroup],
    target: &wgpu::TextureView,
) {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    render_pass.set_pipeline(pipeline);
    for (index, bind_group) in bind_groups.iter().enumerate() {
        render_pass.set_bind_group(index as u32, *bind_group, &[]);
    }
    render_pass.draw(0..3, 0..1);
}

/// Blend the screen fx over the composited frame
///
/// Loads the scene's depth-stencil so the masked variant sees the same
/// stencil plane as the overlay.
pub fn render_screen_fx_pass(
    encoder: &mut wgpu::CommandEncoder,
    pipeline: &wgpu::RenderPipeline,
    bind_group: &wgpu::BindGroup,
    target: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
) {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Screen Fx Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            }),
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    render_pass.set_pipeline(pipeline);
    render_pass.set_stencil_reference(STENCIL_REFERENCE);
    render_pass.set_bind_group(0, bind_group, &[]);
    render_pass.draw(0..3, 0..1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BackdropEngine;
    use crate::math::ScreenRect;
    use crate::{BackdropConfig, MissingAnchorPolicy, Viewport};

    fn engine(policy: MissingAnchorPolicy) -> BackdropEngine {
        let config = BackdropConfig {
            missing_anchor: policy,
            stream_count: 10,
            network_nodes: 10,
            dust_count: 10,
            bubble_count: 5,
            seed: Some(3),
            ..Default::default()
        };
        BackdropEngine::new(config, Viewport::new(1000.0, 800.0, 1.0))
    }

    fn settle(engine: &mut BackdropEngine, anchor: Option<ScreenRect>) -> FrameReport {
        let mut report = engine.step(1.0 / 60.0, || anchor);
        for _ in 0..600 {
            report = engine.step(1.0 / 60.0, || anchor);
        }
        report
    }

    #[test]
    fn test_hero_plan_draws_grid_only() {
        let mut engine = engine(MissingAnchorPolicy::DrawUnclipped);
        let plan = ScenePlan::from_report(&settle(&mut engine, None));
        assert!(plan.grid);
        assert!(!plan.network);
        assert!(!plan.overlay);
        assert!(!plan.mask);
        assert!(!plan.screen_fx);
    }

    #[test]
    fn test_medical_plan_masks_overlay() {
        let mut engine = engine(MissingAnchorPolicy::DrawUnclipped);
        engine.set_target_state("medical");
        let card = ScreenRect {
            left: 300.0,
            top: 200.0,
            width: 400.0,
            height: 300.0,
        };
        let plan = ScenePlan::from_report(&settle(&mut engine, Some(card)));
        assert!(plan.mask);
        assert!(plan.stencil_test);
        assert!(plan.overlay);
        assert!(plan.screen_fx);
        assert!(!plan.grid);
    }

    #[test]
    fn test_hidden_policy_skips_overlay_and_fx() {
        let mut engine = engine(MissingAnchorPolicy::HideOverlay);
        engine.set_target_state("medical");
        let plan = ScenePlan::from_report(&settle(&mut engine, None));
        assert!(!plan.overlay);
        assert!(!plan.screen_fx);
        assert!(!plan.mask);
    }

    #[test]
    fn test_value_plan_shows_network() {
        let mut engine = engine(MissingAnchorPolicy::DrawUnclipped);
        engine.set_target_state("value");
        let plan = ScenePlan::from_report(&settle(&mut engine, None));
        assert!(plan.network);
        assert!(!plan.grid);
    }
}

//! Backdrop engine coordinating all simulation components
//!
//! This module is split into focused submodules:
//! - `lifecycle`: Lifecycle states and the single transition function
//! - `scheduler`: Injectable clock and frame scheduler, delta-time clamping
//! - `controller`: Frame loop driver that ties the engine to the governor

mod controller;
mod lifecycle;
mod scheduler;

pub use controller::{BackdropController, InputEvent};
pub use lifecycle::{
    transition, Effects, Governor, GovernorContext, LifecycleEvent, LifecycleState, PauseReason,
};
pub use scheduler::{Clock, FrameClock, FrameScheduler, ManualClock, ManualScheduler};

use crate::config::BackdropConfig;
use crate::constants::NETWORK_VISIBLE_THRESHOLD;
use crate::grid::{Grid, PointerWell};
use crate::math::{PerspectiveCamera, ScreenRect};
use crate::overlay::{overlay_gate, overlay_visible, BubbleField, BubbleStyle, StencilDecision};
use crate::particles::{
    system_rng, Dust, Network, NetworkParams, Stream, BUBBLE_RNG, DUST_RNG, NETWORK_RNG,
    STREAM_RNG,
};
use crate::postfx::{BloomSettings, ScreenFxSettings};
use crate::state::{AnimationVector, Interpolator, PresetId};
use crate::transition::Pulse;
use crate::viewport::Viewport;

/// Seed used when the host does not provide one
pub const DEFAULT_SEED: u64 = 0x5eed_ba5e;

/// Particle intensity added per unit of pulse
const PULSE_PARTICLE_BOOST: f32 = 0.5;

/// Everything the renderer needs from one simulated frame
///
/// All fields derive from the same [`AnimationVector`] snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Delta time actually applied (after clamping)
    pub dt: f32,
    /// Simulation time driving waves and drift
    pub time: f32,
    pub snapshot: AnimationVector,
    /// Overlay gate `m`
    pub gate: f32,
    pub pulse: f32,
    pub grid_visible: bool,
    pub network_visible: bool,
    /// Overlay group simulated and drawn
    pub overlay_visible: bool,
    pub stencil: StencilDecision,
    pub bloom: BloomSettings,
    pub screen_fx: ScreenFxSettings,
    /// Stream point opacity
    pub stream_opacity: f32,
    pub bubble_style: BubbleStyle,
    pub dust_opacity: f32,
}

/// Host-independent simulation of the whole backdrop
///
/// Owns the interpolator (and with it the only mutable animation vector),
/// the pointer well and every particle system. [`step`](Self::step) advances
/// all of them from one snapshot.
pub struct BackdropEngine {
    config: BackdropConfig,
    viewport: Viewport,
    /// Bumped whenever viewport-dependent GPU state must be rebuilt
    viewport_revision: u64,
    camera: PerspectiveCamera,
    interpolator: Interpolator,
    pointer: PointerWell,
    pulse: Pulse,
    grid: Grid,
    stream: Stream,
    network: Network,
    dust: Dust,
    bubbles: BubbleField,
    time: f32,
    frames: u64,
}

impl BackdropEngine {
    pub fn new(config: BackdropConfig, viewport: Viewport) -> Self {
        let config = config.sanitized();
        let viewport = viewport.with_ceiling(config.pixel_ratio_ceiling);
        let seed = config.seed.unwrap_or(DEFAULT_SEED);

        log::info!("[backdrop] engine created (seed {:#x})", seed);

        Self {
            camera: PerspectiveCamera::with_aspect(viewport.aspect_ratio()),
            interpolator: Interpolator::new(
                PresetId::default(),
                config.state_decay,
                config.shape_decay_factor,
            ),
            pointer: PointerWell::new(config.pointer_decay),
            pulse: Pulse::new(config.pulse_decay),
            grid: Grid::default(),
            stream: Stream::new(config.stream_count, system_rng(seed, STREAM_RNG)),
            network: Network::new(
                config.network_nodes,
                NetworkParams::default(),
                system_rng(seed, NETWORK_RNG),
            ),
            dust: Dust::new(config.dust_count, system_rng(seed, DUST_RNG)),
            bubbles: BubbleField::new(config.bubble_count, system_rng(seed, BUBBLE_RNG)),
            time: 0.0,
            frames: 0,
            viewport_revision: 0,
            viewport,
            config,
        }
    }

    /// Select the blend target by name; unknown names select the default preset
    pub fn set_target_state(&mut self, name: &str) -> PresetId {
        let previous = self.interpolator.target_id();
        let id = self.interpolator.set_target_by_name(name);
        if id != previous {
            log::debug!("[backdrop] target {} -> {} ({:?})", previous.id(), id.id(), name);
        }
        id
    }

    /// Kick the decaying pulse
    pub fn pulse(&mut self, strength: f32) {
        self.pulse.trigger(strength);
    }

    /// Cursor moved to `(x, y)` CSS pixels
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.set_screen_position(x, y, self.viewport.css_size);
    }

    /// Apply new window dimensions. Returns true if anything changed.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        let changed = self.viewport.resize(width, height, device_pixel_ratio);
        if changed {
            self.camera.set_aspect(self.viewport.aspect_ratio());
            self.viewport_revision += 1;
        }
        changed
    }

    /// Park the pointer target and force viewport-dependent state to rebuild
    pub fn reset_after_sleep(&mut self) {
        self.pointer.reset();
        self.camera.set_aspect(self.viewport.aspect_ratio());
        self.viewport_revision += 1;
    }

    /// Simulate one frame.
    ///
    /// `anchor` is queried for the stencil anchor's bounding box only while
    /// the overlay is strong enough to be clipped.
    pub fn step(&mut self, dt: f32, anchor: impl FnOnce() -> Option<ScreenRect>) -> FrameReport {
        let dt = clamp_dt(dt, self.config.max_frame_dt);
        let motion_dt = if self.config.reduced_motion { 0.0 } else { dt };
        self.time += motion_dt;
        self.frames += 1;
        let t = self.time;

        self.interpolator.advance(dt);
        self.pulse.advance(dt);
        let snapshot = *self.interpolator.current();
        let pulse = self.pulse.level();
        let m = overlay_gate(snapshot.overlay);

        self.pointer.update(&self.camera, dt);
        let grid_visible = self.grid.update(t, &snapshot, &self.pointer);

        let intensity = snapshot.particles + PULSE_PARTICLE_BOOST * pulse;
        self.stream.update(t, motion_dt, intensity);

        let network_visible = snapshot.show_network > NETWORK_VISIBLE_THRESHOLD;
        if network_visible {
            self.network.update(t);
        }

        let mut stencil = StencilDecision::Disabled;
        let mut overlay = overlay_visible(m);
        if overlay {
            stencil = StencilDecision::resolve(
                m,
                anchor,
                self.viewport.css_size,
                self.config.stencil_padding,
                self.config.missing_anchor,
            );
            self.bubbles.update(t, motion_dt, m, &self.camera);
            self.dust.update(t, motion_dt, m);
            overlay = stencil.overlay_allowed();
        }

        let fx_intensity = if stencil.overlay_allowed() { m } else { 0.0 };

        FrameReport {
            dt,
            time: t,
            snapshot,
            gate: m,
            pulse,
            grid_visible,
            network_visible,
            overlay_visible: overlay,
            stencil,
            bloom: BloomSettings::derive(snapshot.bloom, pulse, m),
            screen_fx: ScreenFxSettings::derive(fx_intensity, t, snapshot.emissive),
            stream_opacity: Stream::opacity(intensity),
            bubble_style: BubbleStyle::for_gate(m),
            dust_opacity: Dust::opacity(m),
        }
    }

    #[inline]
    pub fn target(&self) -> PresetId {
        self.interpolator.target_id()
    }

    #[inline]
    pub fn current(&self) -> &AnimationVector {
        self.interpolator.current()
    }

    #[inline]
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn viewport_revision(&self) -> u64 {
        self.viewport_revision
    }

    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[inline]
    pub fn pointer(&self) -> &PointerWell {
        &self.pointer
    }

    #[inline]
    pub fn pulse_level(&self) -> f32 {
        self.pulse.level()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn stream(&self) -> &Stream {
        &self.stream
    }

    #[inline]
    pub fn network(&self) -> &Network {
        &self.network
    }

    #[inline]
    pub fn dust(&self) -> &Dust {
        &self.dust
    }

    #[inline]
    pub fn bubbles(&self) -> &BubbleField {
        &self.bubbles
    }

    /// Simulation time in seconds
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames simulated so far
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Clamp a raw delta to `0..=max`; non-finite or negative deltas become zero
#[inline]
pub fn clamp_dt(dt: f32, max: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        0.0
    } else {
        dt.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_FRAME_DT;

    fn small_config() -> BackdropConfig {
        BackdropConfig {
            seed: Some(7),
            stream_count: 64,
            network_nodes: 40,
            dust_count: 64,
            bubble_count: 40,
            ..Default::default()
        }
    }

    fn engine() -> BackdropEngine {
        BackdropEngine::new(small_config(), Viewport::new(1280.0, 720.0, 1.0))
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(1.0, MAX_FRAME_DT), MAX_FRAME_DT);
        assert_eq!(clamp_dt(-1.0, MAX_FRAME_DT), 0.0);
        assert_eq!(clamp_dt(f32::NAN, MAX_FRAME_DT), 0.0);
        assert_eq!(clamp_dt(0.01, MAX_FRAME_DT), 0.01);
    }

    #[test]
    fn test_step_clamps_large_dt() {
        let mut engine = engine();
        let report = engine.step(5.0, || None);
        assert_eq!(report.dt, MAX_FRAME_DT);
        assert_eq!(engine.time(), MAX_FRAME_DT);
    }

    #[test]
    fn test_unknown_target_defaults_to_hero() {
        let mut engine = engine();
        assert_eq!(engine.set_target_state("medical"), PresetId::Medical);
        assert_eq!(engine.set_target_state("implantes"), PresetId::Hero);
    }

    #[test]
    fn test_hero_frame_has_no_overlay() {
        let mut engine = engine();
        let mut polled = false;
        let report = engine.step(1.0 / 60.0, || {
            polled = true;
            None
        });
        assert!(!polled);
        assert!(report.grid_visible);
        assert!(!report.network_visible);
        assert!(!report.overlay_visible);
        assert!(!report.screen_fx.enabled());
    }

    #[test]
    fn test_value_shows_network_and_hides_grid() {
        let mut engine = engine();
        engine.set_target_state("value");
        let mut report = engine.step(1.0 / 60.0, || None);
        for _ in 0..300 {
            report = engine.step(1.0 / 60.0, || None);
        }
        assert!(report.network_visible);
        assert!(!report.grid_visible);
        assert!(!report.overlay_visible);
    }

    #[test]
    fn test_medical_masks_overlay() {
        let mut engine = engine();
        engine.set_target_state("medical");
        let card = ScreenRect::new(100.0, 100.0, 400.0, 300.0);
        let mut report = engine.step(0.0, || None);
        for _ in 0..300 {
            report = engine.step(1.0 / 60.0, || Some(card));
        }
        assert!(report.overlay_visible);
        assert!(report.stencil.stencil_test());
        assert!(report.screen_fx.enabled());
        assert!(report.gate > 0.99);
    }

    #[test]
    fn test_hide_overlay_policy() {
        let config = BackdropConfig {
            missing_anchor: crate::MissingAnchorPolicy::HideOverlay,
            ..small_config()
        };
        let mut engine = BackdropEngine::new(config, Viewport::default());
        engine.set_target_state("medical");
        let mut report = engine.step(0.0, || None);
        for _ in 0..300 {
            report = engine.step(1.0 / 60.0, || None);
        }
        assert_eq!(report.stencil, StencilDecision::Hidden);
        assert!(!report.overlay_visible);
        assert!(!report.screen_fx.enabled());
    }

    #[test]
    fn test_pulse_boosts_bloom() {
        let mut engine = engine();
        let calm = engine.step(1.0 / 60.0, || None);
        engine.pulse(1.0);
        let pulsed = engine.step(1.0 / 60.0, || None);
        assert!(pulsed.bloom.strength > calm.bloom.strength + 0.3);
        assert!(pulsed.stream_opacity > calm.stream_opacity);
    }

    #[test]
    fn test_reduced_motion_freezes_time() {
        let config = BackdropConfig {
            reduced_motion: true,
            ..small_config()
        };
        let mut engine = BackdropEngine::new(config, Viewport::default());
        engine.set_target_state("quantum");
        let before = *engine.current();
        engine.step(1.0 / 60.0, || None);
        assert_eq!(engine.time(), 0.0);
        assert_ne!(*engine.current(), before);
    }

    #[test]
    fn test_resize_bumps_revision_once() {
        let mut engine = engine();
        let revision = engine.viewport_revision();
        assert!(engine.resize(800.0, 600.0, 2.0));
        assert!(!engine.resize(800.0, 600.0, 2.0));
        assert_eq!(engine.viewport_revision(), revision + 1);
        assert!((engine.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_after_sleep_parks_pointer() {
        let mut engine = engine();
        for _ in 0..60 {
            engine.step(1.0 / 60.0, || None);
        }
        engine.reset_after_sleep();
        assert_eq!(engine.pointer().target().y, -100.0);
    }
}

//! Integration tests for the backdrop engine
//!
//! These tests drive the full frame workflow through a manual clock and
//! scheduler:
//! - Preset switching and damped convergence
//! - Delta-time clamping across pauses
//! - Particle recycle bounds and network graph bounds
//! - Resize idempotence
//! - Lifecycle transitions and disposal

use lumen_backdrop::particles::{Dust, Stream};
use lumen_backdrop::{
    AnimationVector, BackdropConfig, BackdropController, BackdropEngine, InputEvent,
    LifecycleState, ManualClock, ManualScheduler, PauseReason, PresetId, ScreenRect, Viewport,
};
use proptest::prelude::*;

const FRAME: f64 = 1.0 / 60.0;

type Controller = BackdropController<ManualScheduler, ManualClock>;

fn config(seed: u64) -> BackdropConfig {
    BackdropConfig {
        seed: Some(seed),
        stream_count: 200,
        network_nodes: 170,
        dust_count: 200,
        bubble_count: 95,
        ..Default::default()
    }
}

fn setup(seed: u64) -> (Controller, ManualScheduler, ManualClock) {
    let engine = BackdropEngine::new(config(seed), Viewport::new(1440.0, 900.0, 2.0));
    let scheduler = ManualScheduler::new();
    let clock = ManualClock::new(0.0);
    let mut controller = BackdropController::new(engine, scheduler.clone(), clock.clone());
    controller.start();
    (controller, scheduler, clock)
}

/// Fire `n` frames `dt` apart; returns how many actually ran
fn pump(
    controller: &mut Controller,
    scheduler: &ManualScheduler,
    clock: &ManualClock,
    n: usize,
    dt: f64,
) -> usize {
    let mut ran = 0;
    for _ in 0..n {
        clock.advance(dt);
        if scheduler.fire() && controller.on_animation_frame(card).is_some() {
            ran += 1;
        }
    }
    ran
}

fn card() -> Option<ScreenRect> {
    Some(ScreenRect::new(320.0, 180.0, 800.0, 540.0))
}

fn distances(current: &AnimationVector, target: &AnimationVector) -> Vec<f32> {
    current
        .channels()
        .iter()
        .zip(target.channels().iter())
        .map(|(c, t)| (c - t).abs())
        .collect()
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_medical_after_500_frames() {
    let (mut controller, scheduler, clock) = setup(1);
    controller.set_target_state("medical");
    assert_eq!(pump(&mut controller, &scheduler, &clock, 500, FRAME), 500);

    let medical = PresetId::Medical.state();
    let current = controller.engine().current();
    assert!((current.overlay - medical.overlay).abs() < 1e-3);
    assert!((current.suppress_grid - 1.0).abs() < 1e-3);
    assert!(medical.suppress_grid);

    clock.advance(FRAME);
    assert!(scheduler.fire());
    let report = controller.on_animation_frame(card).unwrap();
    assert!(!report.grid_visible);
    assert!(report.overlay_visible);
    assert!(report.stencil.stencil_test());
}

#[test]
fn test_set_target_before_first_frame() {
    let engine = BackdropEngine::new(config(2), Viewport::default());
    let scheduler = ManualScheduler::new();
    let clock = ManualClock::new(0.0);
    let mut controller = BackdropController::new(engine, scheduler.clone(), clock.clone());

    controller.set_target_state("quantum");
    controller.dispatch(InputEvent::ModalOpened);
    assert_eq!(controller.engine().frames(), 0);

    controller.start();
    pump(&mut controller, &scheduler, &clock, 3, FRAME);
    assert_eq!(controller.engine().target(), PresetId::Quantum);
}

#[test]
fn test_every_preset_name_resolves() {
    let (mut controller, _, _) = setup(3);
    for id in PresetId::all() {
        assert_eq!(controller.set_target_state(id.id()), *id);
    }
    assert_eq!(controller.set_target_state("  MEDICAL "), PresetId::Medical);
    assert_eq!(controller.set_target_state("implantes"), PresetId::Hero);
    assert_eq!(controller.set_target_state(""), PresetId::Hero);
}

// =============================================================================
// Time and lifecycle
// =============================================================================

#[test]
fn test_dt_never_exceeds_ceiling_after_pause() {
    let (mut controller, scheduler, clock) = setup(4);
    let max = controller.engine().config().max_frame_dt;
    pump(&mut controller, &scheduler, &clock, 10, FRAME);

    // Stalled tab: the loop kept running but the callback was late
    clock.advance(12.0);
    assert!(scheduler.fire());
    let report = controller.on_animation_frame(card).unwrap();
    assert!(report.dt <= max);

    // Hidden then visible: first frame after resume has zero delta
    controller.dispatch(InputEvent::VisibilityChanged { hidden: true });
    clock.advance(900.0);
    controller.dispatch(InputEvent::VisibilityChanged { hidden: false });
    assert!(scheduler.fire());
    assert_eq!(controller.on_animation_frame(card).unwrap().dt, 0.0);
}

#[test]
fn test_context_loss_cycle() {
    let (mut controller, scheduler, clock) = setup(5);
    pump(&mut controller, &scheduler, &clock, 5, FRAME);

    let fx = controller.dispatch(InputEvent::ContextLost);
    assert!(fx.prevent_default);
    assert_eq!(controller.lifecycle(), LifecycleState::ContextLost);
    assert_eq!(pump(&mut controller, &scheduler, &clock, 5, FRAME), 0);

    controller.dispatch(InputEvent::ContextRestored);
    assert_eq!(controller.lifecycle(), LifecycleState::Running);
    assert_eq!(pump(&mut controller, &scheduler, &clock, 5, FRAME), 5);
}

#[test]
fn test_hidden_tab_withholds_frames() {
    let (mut controller, scheduler, clock) = setup(6);
    controller.dispatch(InputEvent::VisibilityChanged { hidden: true });
    assert_eq!(controller.lifecycle(), LifecycleState::Paused(PauseReason::Hidden));
    assert_eq!(pump(&mut controller, &scheduler, &clock, 20, FRAME), 0);
    assert_eq!(controller.engine().frames(), 0);
}

#[test]
fn test_no_mutation_after_dispose() {
    let (mut controller, scheduler, clock) = setup(7);
    pump(&mut controller, &scheduler, &clock, 30, FRAME);
    controller.dispose();

    let snapshot = *controller.engine().current();
    let viewport = *controller.engine().viewport();
    let requests = scheduler.request_count();

    let events = [
        InputEvent::PointerMoved { x: 1.0, y: 2.0 },
        InputEvent::Resized {
            width: 640.0,
            height: 480.0,
            device_pixel_ratio: 1.0,
        },
        InputEvent::VisibilityChanged { hidden: true },
        InputEvent::VisibilityChanged { hidden: false },
        InputEvent::FocusGained,
        InputEvent::FocusLost,
        InputEvent::ContextLost,
        InputEvent::ContextRestored,
        InputEvent::ModalOpened,
        InputEvent::ModalClosed,
    ];
    for event in events {
        assert!(controller.dispatch(event).is_empty());
    }
    controller.set_target_state("value");
    assert_eq!(pump(&mut controller, &scheduler, &clock, 10, FRAME), 0);

    assert_eq!(*controller.engine().current(), snapshot);
    assert_eq!(*controller.engine().viewport(), viewport);
    assert_eq!(scheduler.request_count(), requests);
    assert_eq!(controller.lifecycle(), LifecycleState::Disposed);
}

#[test]
fn test_reduced_motion_keeps_particles_in_spawn_boxes() {
    let config = BackdropConfig {
        reduced_motion: true,
        ..config(12)
    };
    let mut engine = BackdropEngine::new(config, Viewport::new(1440.0, 900.0, 1.0));
    engine.set_target_state("medical");
    let initial_spread = max_abs_x(engine.stream().positions());

    for _ in 0..18_000 {
        engine.step(1.0 / 60.0, card);
    }

    let inside = |p: &[f32; 3], bounds: &[lumen_backdrop::particles::AxisRange; 3]| {
        (0..3).all(|axis| bounds[axis].contains(p[axis]))
    };
    let stream_box = Stream::spawn_box();
    assert!(engine.stream().positions().iter().all(|p| inside(p, &stream_box)));
    let dust_box = Dust::spawn_box();
    assert!(engine.dust().positions().iter().all(|p| inside(p, &dust_box)));
    assert_eq!(max_abs_x(engine.stream().positions()), initial_spread);
}

fn max_abs_x(positions: &[[f32; 3]]) -> f32 {
    positions.iter().map(|p| p[0].abs()).fold(0.0, f32::max)
}

// =============================================================================
// Resize
// =============================================================================

#[test]
fn test_resize_is_idempotent() {
    let (mut once, _, _) = setup(8);
    let (mut twice, _, _) = setup(8);
    let resize = InputEvent::Resized {
        width: 1920.0,
        height: 1080.0,
        device_pixel_ratio: 3.0,
    };

    once.dispatch(resize);
    twice.dispatch(resize);
    twice.dispatch(resize);

    assert_eq!(once.engine().viewport(), twice.engine().viewport());
    assert_eq!(once.engine().camera(), twice.engine().camera());
    assert_eq!(once.engine().viewport_revision(), twice.engine().viewport_revision());
    assert_eq!(twice.engine().viewport().physical_size(), (2400, 1350));
}

// =============================================================================
// Property tests
// =============================================================================

fn arb_preset() -> impl Strategy<Value = PresetId> {
    prop::sample::select(PresetId::all().to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_convergence_is_monotone(
        start in arb_preset(),
        target in arb_preset(),
        dt in 0.0f32..0.05,
        frames in 1usize..120,
    ) {
        let mut engine = BackdropEngine::new(config(9), Viewport::default());
        engine.set_target_state(start.id());
        for _ in 0..60 {
            engine.step(1.0 / 45.0, || None);
        }
        engine.set_target_state(target.id());
        let goal = AnimationVector::from_preset(target.state());

        let mut previous = distances(engine.current(), &goal);
        for _ in 0..frames {
            engine.step(dt, || None);
            let now = distances(engine.current(), &goal);
            for (n, p) in now.iter().zip(previous.iter()) {
                prop_assert!(*n <= *p + 1e-6, "distance grew: {} -> {}", p, n);
            }
            previous = now;
        }
    }

    #[test]
    fn prop_dt_is_clamped(gaps in prop::collection::vec(0.0f64..1000.0, 1..40)) {
        let (mut controller, scheduler, clock) = setup(10);
        let max = controller.engine().config().max_frame_dt;
        for gap in gaps {
            clock.advance(gap);
            if scheduler.fire() {
                let report = controller.on_animation_frame(card).unwrap();
                prop_assert!(report.dt >= 0.0 && report.dt <= max);
            }
        }
    }

    #[test]
    fn prop_particles_stay_in_bounds(seed in any::<u64>(), frames in 1usize..400) {
        let (mut controller, scheduler, clock) = setup(seed);
        controller.set_target_state("medical");
        pump(&mut controller, &scheduler, &clock, frames, 1.0 / 30.0);

        let engine = controller.engine();
        let stream_z = Stream::depth_bounds();
        prop_assert!(engine.stream().positions().iter().all(|p| stream_z.contains(p[2])));
        let dust_z = Dust::depth_bounds();
        prop_assert!(engine.dust().positions().iter().all(|p| dust_z.contains(p[2])));
        let bubble_z = lumen_backdrop::overlay::BubbleField::depth_bounds();
        prop_assert!(engine.bubbles().depths().all(|z| bubble_z.contains(z)));
    }

    #[test]
    fn prop_network_respects_bounds(seed in any::<u64>()) {
        let engine = BackdropEngine::new(config(seed), Viewport::default());
        let network = engine.network();
        let base = network.base_positions();
        let mut degree = vec![0usize; base.len()];
        for &(a, b) in network.connections() {
            prop_assert!(base[a as usize].distance(base[b as usize]) <= 18.0);
            degree[a as usize] += 1;
            degree[b as usize] += 1;
        }
        prop_assert!(degree.iter().all(|&d| d <= 2));
    }
}

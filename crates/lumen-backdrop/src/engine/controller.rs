//! Frame loop driver

use super::{
    BackdropEngine, Clock, Effects, FrameClock, FrameReport, FrameScheduler, Governor,
    LifecycleEvent, LifecycleState,
};
use crate::constants::{MODAL_CLOSE_PULSE, MODAL_OPEN_PULSE};
use crate::math::ScreenRect;
use crate::state::PresetId;

/// Ambient input consumed by the backdrop
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Cursor position in CSS pixels
    PointerMoved { x: f32, y: f32 },
    Resized {
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    },
    VisibilityChanged { hidden: bool },
    FocusGained,
    FocusLost,
    ContextLost,
    ContextRestored,
    /// External modal opened (strong pulse)
    ModalOpened,
    /// External modal closed (soft pulse)
    ModalClosed,
}

/// Drives a [`BackdropEngine`] from a scheduler and clock under a [`Governor`]
///
/// One frame callback re-requests itself; the governor decides whether a
/// request stands. After disposal every call is ignored.
pub struct BackdropController<S: FrameScheduler, C: Clock> {
    engine: BackdropEngine,
    governor: Governor,
    scheduler: S,
    clock: C,
    frame_clock: FrameClock,
    started: bool,
}

impl<S: FrameScheduler, C: Clock> BackdropController<S, C> {
    pub fn new(engine: BackdropEngine, scheduler: S, clock: C) -> Self {
        let config = engine.config();
        Self {
            governor: Governor::new(config.pause_on_blur),
            frame_clock: FrameClock::new(config.max_frame_dt),
            engine,
            scheduler,
            clock,
            started: false,
        }
    }

    /// Request the first frame. Calling again has no effect.
    pub fn start(&mut self) {
        if self.started || !self.governor.is_running() {
            return;
        }
        self.started = true;
        self.frame_clock.restart();
        self.scheduler.request_frame();
        log::info!("[backdrop] loop started");
    }

    /// Select the blend target. Safe before the first frame.
    pub fn set_target_state(&mut self, name: &str) -> PresetId {
        if self.governor.is_disposed() {
            return self.engine.target();
        }
        self.engine.set_target_state(name)
    }

    /// Kick the decaying pulse
    pub fn pulse(&mut self, strength: f32) {
        if !self.governor.is_disposed() {
            self.engine.pulse(strength);
        }
    }

    /// Feed one input event; returns the lifecycle effects that were applied
    pub fn dispatch(&mut self, event: InputEvent) -> Effects {
        if self.governor.is_disposed() {
            return Effects::default();
        }
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.engine.pointer_moved(x, y);
                Effects::default()
            }
            InputEvent::Resized {
                width,
                height,
                device_pixel_ratio,
            } => {
                self.engine.resize(width, height, device_pixel_ratio);
                Effects::default()
            }
            InputEvent::ModalOpened => {
                self.engine.pulse(MODAL_OPEN_PULSE);
                Effects::default()
            }
            InputEvent::ModalClosed => {
                self.engine.pulse(MODAL_CLOSE_PULSE);
                Effects::default()
            }
            InputEvent::VisibilityChanged { hidden } => {
                let event = if hidden {
                    LifecycleEvent::Hidden
                } else {
                    LifecycleEvent::Visible
                };
                self.lifecycle_event(event)
            }
            InputEvent::FocusGained => self.lifecycle_event(LifecycleEvent::FocusGained),
            InputEvent::FocusLost => self.lifecycle_event(LifecycleEvent::FocusLost),
            InputEvent::ContextLost => self.lifecycle_event(LifecycleEvent::ContextLost),
            InputEvent::ContextRestored => self.lifecycle_event(LifecycleEvent::ContextRestored),
        }
    }

    /// Tear down. The host releases its own resources when the returned
    /// effects ask for it.
    pub fn dispose(&mut self) -> Effects {
        self.lifecycle_event(LifecycleEvent::Dispose)
    }

    /// Frame callback.
    ///
    /// Returns `None` without touching the engine unless the loop is running.
    pub fn on_animation_frame(
        &mut self,
        anchor: impl FnOnce() -> Option<ScreenRect>,
    ) -> Option<FrameReport> {
        if !self.governor.is_running() {
            return None;
        }
        self.scheduler.request_frame();
        let dt = self.frame_clock.tick(self.clock.now_seconds());
        Some(self.engine.step(dt, anchor))
    }

    fn lifecycle_event(&mut self, event: LifecycleEvent) -> Effects {
        let effects = self.governor.handle(event);
        self.apply(effects);
        effects
    }

    fn apply(&mut self, effects: Effects) {
        if effects.cancel_frame {
            self.scheduler.cancel_frame();
        }
        if effects.reset_after_sleep {
            self.frame_clock.restart();
            self.engine.reset_after_sleep();
        }
        if effects.schedule_frame {
            self.scheduler.request_frame();
        }
        if effects.release_resources {
            log::info!("[backdrop] disposed after {} frames", self.engine.frames());
        }
    }

    #[inline]
    pub fn lifecycle(&self) -> LifecycleState {
        self.governor.state()
    }

    #[inline]
    pub fn engine(&self) -> &BackdropEngine {
        &self.engine
    }

    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

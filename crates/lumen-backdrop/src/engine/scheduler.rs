//! Time source and frame scheduling
//!
//! The browser host implements these over `performance.now()` and
//! `requestAnimationFrame`; tests use the manual versions to step frames
//! synchronously.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Monotonic time source
pub trait Clock {
    /// Current time in seconds
    fn now_seconds(&self) -> f64;
}

/// Something that can request and revoke a single pending frame callback
pub trait FrameScheduler {
    fn request_frame(&mut self);
    fn cancel_frame(&mut self);
    fn is_pending(&self) -> bool;
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Default)]
struct ManualSchedulerState {
    pending: bool,
    requests: usize,
    cancels: usize,
}

/// Scheduler whose pending frame is fired by hand. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualSchedulerState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request. Returns true if there was one, in which
    /// case the caller should run the frame callback.
    pub fn fire(&self) -> bool {
        let mut state = self.state.borrow_mut();
        std::mem::replace(&mut state.pending, false)
    }

    pub fn pending(&self) -> bool {
        self.state.borrow().pending
    }

    /// Total frame requests seen
    pub fn request_count(&self) -> usize {
        self.state.borrow().requests
    }

    /// Total cancellations seen
    pub fn cancel_count(&self) -> usize {
        self.state.borrow().cancels
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        let mut state = self.state.borrow_mut();
        state.pending = true;
        state.requests += 1;
    }

    fn cancel_frame(&mut self) {
        let mut state = self.state.borrow_mut();
        state.pending = false;
        state.cancels += 1;
    }

    fn is_pending(&self) -> bool {
        self.pending()
    }
}

/// Turns clock readings into clamped frame deltas
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Delta since the previous tick, clamped to `0..=max_dt`.
    ///
    /// The first tick after a restart yields zero.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        self.last = Some(now);
        super::clamp_dt(dt, self.max_dt)
    }

    /// Forget the previous reading so the next delta is zero
    pub fn restart(&mut self) {
        self.last = None;
    }
}

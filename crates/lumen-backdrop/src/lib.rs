//! Section-reactive animated backdrop
//!
//! This crate provides the core of a full-viewport animated background that
//! cross-fades between named visual presets as page sections scroll into view:
//! - A fixed catalogue of presets and a damped interpolation engine
//! - A procedurally deformed instanced grid with a pointer "well"
//! - Three particle fields (ambient stream, network backdrop, dust)
//! - A billboarded bubble overlay clipped by a stencil region
//! - Bloom and screen-space overlay parameters
//! - A lifecycle governor and frame loop with injectable clock and scheduler
//!
//! ## Architecture
//!
//! - [`state`]: Presets, the animation vector and the interpolator
//! - [`transition`]: Easing, damping and the decaying pulse
//! - [`grid`]: Lattice, waveforms and pointer well
//! - [`particles`]: Stream, network backdrop and dust fields
//! - [`overlay`]: Bubble field and stencil mask region
//! - [`postfx`]: Bloom and screen-fx parameters derived per frame
//! - [`engine`]: Frame simulation, lifecycle governor, scheduler, controller
//!
//! ## Example
//!
//! ```rust
//! use lumen_backdrop::{
//!     BackdropConfig, BackdropController, BackdropEngine, ManualClock, ManualScheduler,
//!     PresetId, Viewport,
//! };
//!
//! let clock = ManualClock::new(0.0);
//! let scheduler = ManualScheduler::new();
//! let engine = BackdropEngine::new(BackdropConfig::default(), Viewport::new(1280.0, 720.0, 1.0));
//! let mut controller = BackdropController::new(engine, scheduler.clone(), clock.clone());
//! controller.start();
//!
//! controller.set_target_state("medical");
//! for _ in 0..10 {
//!     clock.advance(1.0 / 60.0);
//!     if scheduler.fire() {
//!         controller.on_animation_frame(|| None);
//!     }
//! }
//! assert_eq!(controller.engine().target(), PresetId::Medical);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All simulation is pure Rust, testable without a browser or GPU
//! 2. **Time Abstraction**: Frames are driven by an injectable clock and scheduler
//! 3. **One Snapshot Per Frame**: Every subsystem reads the same animation vector
//! 4. **Degrade, Never Throw**: Only GPU initialization can fail

pub mod config;
pub mod constants;
pub mod engine;
pub mod grid;
pub mod math;
pub mod overlay;
pub mod particles;
pub mod postfx;
pub mod state;
pub mod transition;

mod error;
mod viewport;

// Renderer (only available with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod background;

pub use config::{BackdropConfig, MissingAnchorPolicy};
pub use engine::{
    BackdropController, BackdropEngine, Clock, Effects, FrameReport, FrameScheduler,
    Governor, InputEvent, LifecycleEvent, LifecycleState, ManualClock, ManualScheduler,
    PauseReason,
};
pub use error::{BackdropError, FrameSkipped};
pub use math::{NdcRect, PerspectiveCamera, Rgb, ScreenRect, Size};
pub use overlay::StencilDecision;
pub use postfx::{BloomSettings, ScreenFxSettings};
pub use state::{AnimationVector, Interpolator, PresetId, PresetState, WaveShape};
pub use viewport::Viewport;

//! Frame-rate independent animation helpers
//!
//! - `easing`: smoothstep, lerp and the damped-approach factor
//! - `pulse`: exponentially decaying impulse driven by external events

mod easing;
mod pulse;

pub use easing::{damp, lerp, smoothstep, smoothstep01};
pub use pulse::Pulse;

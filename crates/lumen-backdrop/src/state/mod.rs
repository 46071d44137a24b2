//! Visual presets and the interpolated animation state
//!
//! - `preset`: the closed catalogue of named looks
//! - `vector`: the continuous animation vector every renderer reads
//! - `interpolator`: damped approach of the vector toward the target preset

mod interpolator;
mod preset;
mod vector;

pub use interpolator::Interpolator;
pub use preset::{PresetId, PresetState, WaveShape};
pub use vector::{AnimationVector, CHANNEL_COUNT};

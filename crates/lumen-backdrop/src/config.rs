//! Backdrop configuration
//!
//! Every field has a default (see [`crate::constants`]), so a host can pass a
//! partial JSON object and only override what it cares about.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// What to do when the overlay is active but the stencil anchor is missing
/// or has zero extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingAnchorPolicy {
    /// Disable the stencil test for the frame; the overlay draws unclipped
    #[default]
    DrawUnclipped,
    /// Skip the overlay and its screen fx for the frame
    HideOverlay,
}

/// Tunables for the backdrop engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
    /// Decay constant for preset channels
    pub state_decay: f32,
    /// Decay constant for the pointer target
    pub pointer_decay: f32,
    /// Factor applied to the state blend for wave shape, frequency and amplitude
    pub shape_decay_factor: f32,
    /// Delta-time ceiling in seconds
    pub max_frame_dt: f32,
    /// Device-pixel-ratio ceiling
    pub pixel_ratio_ceiling: f32,
    /// CSS selector of the element whose box defines the stencil region
    pub stencil_anchor: String,
    /// Padding added to the stencil region (NDC units)
    pub stencil_padding: f32,
    pub missing_anchor: MissingAnchorPolicy,
    /// Decay constant of the pulse impulse
    pub pulse_decay: f32,
    /// DOM event that triggers a strong pulse
    pub modal_open_event: String,
    /// DOM event that triggers a soft pulse
    pub modal_close_event: String,
    /// Freeze wave and drift time (damping still runs)
    pub reduced_motion: bool,
    /// Pause the loop while the window is blurred
    pub pause_on_blur: bool,
    /// Simulation seed; random when absent
    pub seed: Option<u64>,
    pub stream_count: usize,
    pub network_nodes: usize,
    pub dust_count: usize,
    pub bubble_count: usize,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            state_decay: STATE_DECAY,
            pointer_decay: POINTER_DECAY,
            shape_decay_factor: SHAPE_DECAY_FACTOR,
            max_frame_dt: MAX_FRAME_DT,
            pixel_ratio_ceiling: PIXEL_RATIO_CEILING,
            stencil_anchor: STENCIL_ANCHOR_SELECTOR.to_string(),
            stencil_padding: STENCIL_PADDING,
            missing_anchor: MissingAnchorPolicy::default(),
            pulse_decay: PULSE_DECAY,
            modal_open_event: MODAL_OPEN_EVENT.to_string(),
            modal_close_event: MODAL_CLOSE_EVENT.to_string(),
            reduced_motion: false,
            pause_on_blur: false,
            seed: None,
            stream_count: STREAM_COUNT,
            network_nodes: NETWORK_NODES,
            dust_count: DUST_COUNT,
            bubble_count: BUBBLE_COUNT,
        }
    }
}

impl BackdropConfig {
    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        if !self.max_frame_dt.is_finite() || self.max_frame_dt <= 0.0 {
            self.max_frame_dt = MAX_FRAME_DT;
        }
        if !self.pixel_ratio_ceiling.is_finite() || self.pixel_ratio_ceiling <= 0.0 {
            self.pixel_ratio_ceiling = PIXEL_RATIO_CEILING;
        }
        self.state_decay = self.state_decay.max(0.0);
        self.pointer_decay = self.pointer_decay.max(0.0);
        self.shape_decay_factor = self.shape_decay_factor.clamp(0.0, 1.0);
        self.pulse_decay = self.pulse_decay.max(0.0);
        self
    }
}

//! Default tuning constants
//!
//! These seed [`BackdropConfig::default`](crate::BackdropConfig) and the fixed
//! scene layout. Values are in world units and seconds unless noted.

use std::f32::consts::FRAC_PI_4;

/// Decay constant for preset channels (per second)
pub const STATE_DECAY: f32 = 4.5;

/// Decay constant for the pointer target (per second)
pub const POINTER_DECAY: f32 = 7.5;

/// Multiplier applied to the state blend factor for wave shape, frequency and amplitude
pub const SHAPE_DECAY_FACTOR: f32 = 0.45;

/// Upper bound for the per-frame delta time
pub const MAX_FRAME_DT: f32 = 1.0 / 45.0;

/// Device-pixel-ratio ceiling applied to the drawing buffer
pub const PIXEL_RATIO_CEILING: f32 = 1.25;

/// Decay constant of the external pulse impulse (per second)
pub const PULSE_DECAY: f32 = 3.0;

/// Upper bound of the pulse level
pub const PULSE_MAX: f32 = 1.5;

// =============================================================================
// Camera and scene
// =============================================================================

/// Vertical field of view (45 degrees)
pub const CAMERA_FOV_Y: f32 = FRAC_PI_4;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 220.0;
pub const CAMERA_POSITION: [f32; 3] = [0.0, 25.0, 50.0];

/// Clear and fog color (`#020202`)
pub const BACKGROUND_HEX: u32 = 0x020202;
pub const FOG_DENSITY: f32 = 0.02;
pub const AMBIENT_INTENSITY: f32 = 2.0;
pub const KEY_LIGHT_INTENSITY: f32 = 3.0;
pub const KEY_LIGHT_POSITION: [f32; 3] = [10.0, 20.0, 10.0];

// =============================================================================
// Grid
// =============================================================================

pub const GRID_ROWS: usize = 100;
pub const GRID_COLS: usize = 100;
pub const GRID_SPACING: f32 = 0.7;
pub const GRID_TETRA_RADIUS: f32 = 0.15;
pub const GRID_TETRA_STRETCH: f32 = 5.0;

/// Radius of the pointer suppression well
pub const POINTER_WELL_RADIUS: f32 = 15.0;

/// Where the pointer target rests when no pointer has been seen
pub const POINTER_REST: [f32; 3] = [0.0, -100.0, 0.0];

/// `noGrid` above this hides the grid entirely
pub const GRID_SUPPRESS_THRESHOLD: f32 = 0.5;

// =============================================================================
// Particles
// =============================================================================

pub const STREAM_COUNT: usize = 1800;
pub const NETWORK_NODES: usize = 170;
pub const NETWORK_ATTEMPTS_PER_NODE: usize = 5;
pub const NETWORK_MAX_CONNECTIONS: usize = 2;
pub const NETWORK_MAX_DISTANCE: f32 = 18.0;

/// `showValueBackdrop` above this shows the network backdrop
pub const NETWORK_VISIBLE_THRESHOLD: f32 = 0.01;

pub const DUST_COUNT: usize = 2600;

/// World-space point sizes (attenuated with depth)
pub const STREAM_POINT_SIZE: f32 = 0.08;
pub const NETWORK_POINT_SIZE: f32 = 0.07;
pub const DUST_POINT_SIZE: f32 = 0.055;

// =============================================================================
// Overlay
// =============================================================================

pub const BUBBLE_COUNT: usize = 95;
pub const BUBBLE_LARGE: usize = 10;
pub const BUBBLE_MEDIUM: usize = 20;

/// Depth distance at which a bubble renders at its base size
pub const BUBBLE_REFERENCE_DISTANCE: f32 = 75.0;

/// Overlay gate: `smoothstep(overlay, LOW, HIGH)`
pub const OVERLAY_GATE_LOW: f32 = 0.05;
pub const OVERLAY_GATE_HIGH: f32 = 0.35;

/// Gate value above which the overlay group is simulated and drawn
pub const OVERLAY_VISIBLE_THRESHOLD: f32 = 0.001;

/// Gate value above which the stencil anchor is polled
pub const STENCIL_ACTIVE_THRESHOLD: f32 = 0.02;

/// Padding added to the mask size, in NDC units
pub const STENCIL_PADDING: f32 = 0.06;

/// Stencil value written by the mask pass
pub const STENCIL_REFERENCE: u32 = 1;

pub const STENCIL_ANCHOR_SELECTOR: &str = "#sec-medical .card";

/// Screen fx intensity below which the pass is skipped
pub const SCREEN_FX_MIN_INTENSITY: f32 = 0.001;

// =============================================================================
// Events
// =============================================================================

pub const MODAL_OPEN_EVENT: &str = "backdrop:modal-open";
pub const MODAL_CLOSE_EVENT: &str = "backdrop:modal-close";
pub const MODAL_OPEN_PULSE: f32 = 1.0;
pub const MODAL_CLOSE_PULSE: f32 = 0.6;

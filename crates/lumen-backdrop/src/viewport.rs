//! Viewport for the full-window canvas

use crate::constants::PIXEL_RATIO_CEILING;
use crate::math::Size;

/// Window size in CSS pixels plus the device pixel ratio
///
/// The drawing buffer uses `min(device_pixel_ratio, ceiling)` so high-density
/// displays do not multiply GPU cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Window size in CSS pixels
    pub css_size: Size,
    /// Raw `window.devicePixelRatio`
    pub device_pixel_ratio: f32,
    /// Upper bound applied to the pixel ratio
    pub pixel_ratio_ceiling: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0, 1.0)
    }
}

impl Viewport {
    /// Create a viewport with the default pixel-ratio ceiling
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            css_size: Size::new(width, height),
            device_pixel_ratio: sanitize_ratio(device_pixel_ratio),
            pixel_ratio_ceiling: PIXEL_RATIO_CEILING,
        }
    }

    /// Replace the ceiling (from configuration)
    pub fn with_ceiling(mut self, ceiling: f32) -> Self {
        self.pixel_ratio_ceiling = ceiling;
        self
    }

    /// Apply new window dimensions. Empty sizes are ignored.
    ///
    /// Returns true if anything changed.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        let size = Size::new(width, height);
        if size.is_empty() {
            return false;
        }
        let ratio = sanitize_ratio(device_pixel_ratio);
        let changed = size != self.css_size || ratio != self.device_pixel_ratio;
        self.css_size = size;
        self.device_pixel_ratio = ratio;
        changed
    }

    /// Effective pixel ratio after clamping
    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio.min(self.pixel_ratio_ceiling)
    }

    /// Drawing-buffer size in device pixels
    #[inline]
    pub fn physical_size(&self) -> (u32, u32) {
        self.css_size.scale(self.pixel_ratio()).to_pixels()
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.css_size.aspect_ratio()
    }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_is_clamped() {
        let viewport = Viewport::new(1000.0, 500.0, 3.0);
        assert!((viewport.pixel_ratio() - PIXEL_RATIO_CEILING).abs() < 1e-6);
        assert_eq!(viewport.physical_size(), (1250, 625));
    }

    #[test]
    fn test_low_density_is_not_scaled_up() {
        let viewport = Viewport::new(1000.0, 500.0, 1.0);
        assert_eq!(viewport.physical_size(), (1000, 500));
    }

    #[test]
    fn test_resize_reports_changes() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0);
        assert!(!viewport.resize(800.0, 600.0, 1.0));
        assert!(viewport.resize(1024.0, 768.0, 1.0));
        assert!(!viewport.resize(1024.0, 768.0, 1.0));
        assert!(viewport.resize(1024.0, 768.0, 2.0));
    }

    #[test]
    fn test_resize_ignores_empty() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0);
        assert!(!viewport.resize(0.0, 600.0, 1.0));
        assert_eq!(viewport.css_size, Size::new(800.0, 600.0));
    }

    #[test]
    fn test_invalid_ratio_defaults_to_one() {
        let viewport = Viewport::new(800.0, 600.0, f32::NAN);
        assert_eq!(viewport.device_pixel_ratio, 1.0);
    }
}

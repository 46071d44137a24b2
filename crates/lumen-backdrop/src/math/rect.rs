//! Screen-space rectangles
//!
//! [`ScreenRect`] is a DOM bounding box in CSS pixels (origin top-left, y down).
//! [`NdcRect`] is the same region in normalized device coordinates
//! (origin center, y up), sized for a unit quad.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Size;

/// Bounding client rectangle of a DOM element, in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Zero or negative extent
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Convert to NDC for a viewport of `viewport` CSS pixels.
    ///
    /// `padding` is added to both NDC extents. Returns `None` for an empty
    /// rectangle or viewport.
    pub fn to_ndc(&self, viewport: Size, padding: f32) -> Option<NdcRect> {
        if self.is_empty() || viewport.is_empty() {
            return None;
        }

        let center_x = (self.left + self.width * 0.5) / viewport.width;
        let center_y = (self.top + self.height * 0.5) / viewport.height;

        Some(NdcRect {
            center: Vec2::new(center_x * 2.0 - 1.0, 1.0 - center_y * 2.0),
            size: Vec2::new(
                self.width / viewport.width * 2.0 + padding,
                self.height / viewport.height * 2.0 + padding,
            ),
        })
    }
}

/// Axis-aligned rectangle in normalized device coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NdcRect {
    pub center: Vec2,
    /// Full width and height (not half extents)
    pub size: Vec2,
}

impl NdcRect {
    /// `[center.x, center.y, size.x, size.y]` for uniform upload
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.center.x, self.center.y, self.size.x, self.size.y]
    }

    /// Whether an NDC point lies inside the rectangle
    pub fn contains(&self, p: Vec2) -> bool {
        let half = self.size * 0.5;
        (p.x - self.center.x).abs() <= half.x && (p.y - self.center.y).abs() <= half.y
    }
}

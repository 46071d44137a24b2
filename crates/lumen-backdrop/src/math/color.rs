//! Linear RGB color

use serde::{Deserialize, Serialize};

/// Packed sRGB color as `0xRRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex(pub u32);

impl Hex {
    /// Decode to linear RGB
    pub fn to_rgb(self) -> Rgb {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        Rgb::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }
}

/// Color in linear working space; channels are usually in `0..=1`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Move each channel toward `target` by `factor`
    #[inline]
    pub fn approach(&mut self, target: Rgb, factor: f32) {
        self.r += (target.r - self.r) * factor;
        self.g += (target.g - self.g) * factor;
        self.b += (target.b - self.b) * factor;
    }

    #[inline]
    pub fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// `[r, g, b, alpha]` for uniform upload
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<Hex> for Rgb {
    fn from(hex: Hex) -> Self {
        hex.to_rgb()
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

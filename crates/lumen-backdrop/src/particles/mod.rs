//! Particle fields
//!
//! - `stream`: ambient drift along +Z, recycled at the far bound
//! - `network`: oscillating nodes with a sparse connection graph
//! - `dust`: fine overlay dust, simulated only while the overlay is active
//!
//! Each system owns its own seeded generator so one system's recycling never
//! perturbs another's sequence.

mod dust;
mod network;
mod stream;

pub use dust::Dust;
pub use network::{Network, NetworkParams};
pub use stream::Stream;

use rand::Rng;
use rand_pcg::Pcg32;

/// Generator stream ids, one per system
pub(crate) const STREAM_RNG: u64 = 1;
pub(crate) const NETWORK_RNG: u64 = 2;
pub(crate) const DUST_RNG: u64 = 3;
pub(crate) const BUBBLE_RNG: u64 = 4;

/// Seeded generator for one particle system
pub fn system_rng(seed: u64, stream: u64) -> Pcg32 {
    Pcg32::new(seed, stream)
}

/// Closed interval along one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `±half_extent` around `center`
    pub fn centered(center: f32, half_extent: f32) -> Self {
        Self::new(center - half_extent, center + half_extent)
    }

    #[inline]
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range_sample_within_bounds() {
        let mut rng = system_rng(7, STREAM_RNG);
        let range = AxisRange::new(-3.0, 5.0);
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn test_centered() {
        assert_eq!(AxisRange::centered(14.0, 31.0), AxisRange::new(-17.0, 45.0));
    }

    #[test]
    fn test_system_rngs_are_independent() {
        let mut a = system_rng(42, STREAM_RNG);
        let mut b = system_rng(42, DUST_RNG);
        let xs: Vec<u32> = (0..4).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..4).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }
}

use rand_pcg::Pcg32;

use super::AxisRange;

const X: AxisRange = AxisRange::new(-40.0, 40.0);
const Y: AxisRange = AxisRange::new(2.0, 30.0);
const Z: AxisRange = AxisRange::new(-70.0, 70.0);
const SPEED: AxisRange = AxisRange::new(6.0, 24.0);

/// Ambient particle stream drifting toward the camera
pub struct Stream {
    positions: Vec<[f32; 3]>,
    speeds: Vec<f32>,
    rng: Pcg32,
}

impl Stream {
    pub fn new(count: usize, mut rng: Pcg32) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut speeds = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push([X.sample(&mut rng), Y.sample(&mut rng), Z.sample(&mut rng)]);
            speeds.push(SPEED.sample(&mut rng));
        }
        Self {
            positions,
            speeds,
            rng,
        }
    }

    /// Advance by `dt`; `intensity` is the particle channel (plus any pulse)
    ///
    /// A zero `dt` (reduced motion) leaves the field untouched.
    pub fn update(&mut self, t: f32, dt: f32, intensity: f32) {
        if dt <= 0.0 {
            return;
        }
        let drive = 0.45 + intensity * 0.9;
        for (i, (p, v)) in self.positions.iter_mut().zip(self.speeds.iter_mut()).enumerate() {
            p[0] *= 0.9996;
            p[1] += (t * 0.6 + i as f32).sin() * 0.0006;
            p[2] += *v * dt * drive;

            if p[2] > Z.max {
                p[2] = Z.min;
                p[0] = X.sample(&mut self.rng);
                p[1] = Y.sample(&mut self.rng);
                *v = SPEED.sample(&mut self.rng);
            }
        }
    }

    /// Point opacity for a particle intensity
    #[inline]
    pub fn opacity(intensity: f32) -> f32 {
        0.05 + intensity * 0.20
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Box new particles are spawned in (x, y, z)
    #[inline]
    pub fn spawn_box() -> [AxisRange; 3] {
        [X, Y, Z]
    }

    /// Bounds of the drift axis
    #[inline]
    pub fn depth_bounds() -> AxisRange {
        Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{system_rng, STREAM_RNG};

    #[test]
    fn test_initial_layout_within_box() {
        let stream = Stream::new(500, system_rng(1, STREAM_RNG));
        for p in stream.positions() {
            assert!(X.contains(p[0]) && Y.contains(p[1]) && Z.contains(p[2]));
        }
    }

    #[test]
    fn test_drift_moves_toward_camera() {
        let mut stream = Stream::new(1, system_rng(3, STREAM_RNG));
        let z0 = stream.positions()[0][2];
        stream.update(0.0, 1.0 / 60.0, 0.1);
        let z1 = stream.positions()[0][2];
        assert!(z1 > z0 || z1 == Z.min);
    }

    #[test]
    fn test_recycles_to_near_bound() {
        let mut stream = Stream::new(200, system_rng(9, STREAM_RNG));
        let mut t = 0.0;
        for _ in 0..2000 {
            t += 1.0 / 45.0;
            stream.update(t, 1.0 / 45.0, 1.0);
            assert!(stream.positions().iter().all(|p| Z.contains(p[2])));
        }
    }

    #[test]
    fn test_zero_dt_freezes_field() {
        let mut stream = Stream::new(50, system_rng(5, STREAM_RNG));
        let before = stream.positions().to_vec();
        for _ in 0..1000 {
            stream.update(2.0, 0.0, 1.0);
        }
        assert_eq!(stream.positions(), &before[..]);
    }

    #[test]
    fn test_opacity() {
        assert!((Stream::opacity(0.1) - 0.07).abs() < 1e-6);
    }
}

use rand_pcg::Pcg32;

use super::AxisRange;

const X: AxisRange = AxisRange::new(-105.0, 105.0);
const Y: AxisRange = AxisRange::new(-29.0, 61.0);
const Z: AxisRange = AxisRange::new(-120.0, 120.0);
const SPEED: AxisRange = AxisRange::new(0.6, 2.2);

/// Fine overlay dust
pub struct Dust {
    positions: Vec<[f32; 3]>,
    speeds: Vec<f32>,
    rng: Pcg32,
}

impl Dust {
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

    /// Advance by `dt` with overlay gate `m`. A zero `dt` leaves the field untouched.
    pub fn update(&mut self, t: f32, dt: f32, m: f32) {
        if dt <= 0.0 {
            return;
        }
        let drive = 9.2 * dt * (0.22 + m * 1.2);
        for (i, (p, v)) in self.positions.iter_mut().zip(self.speeds.iter_mut()).enumerate() {
            let phase = i as f32;
            p[2] += drive * *v;
            p[0] += (t * 0.6 + phase).sin() * 0.002;
            p[1] += (t * 0.5 + phase).cos() * 0.002;

            if p[2] > Z.max {
                p[2] = Z.min;
                p[0] = X.sample(&mut self.rng);
                p[1] = Y.sample(&mut self.rng);
                *v = SPEED.sample(&mut self.rng);
            }
        }
    }

    #[inline]
    pub fn opacity(m: f32) -> f32 {
        m * 0.22
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

    #[inline]
    pub fn depth_bounds() -> AxisRange {
        Z
    }
}

//! Easing functions for animations

/// Blend factor for a damped approach: `1 - e^(-lambda * dt)`
///
/// Moving a value toward its target by this factor every frame converges at
/// the same rate regardless of frame rate.
#[inline]
pub fn damp(lambda: f32, dt: f32) -> f32 {
    1.0 - (-lambda * dt).exp()
}

/// Linear interpolation (no clamping)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep of `x` between `edge0` and `edge1`, clamped to `0..=1`
#[inline]
pub fn smoothstep(x: f32, edge0: f32, edge1: f32) -> f32 {
    if x <= edge0 {
        return 0.0;
    }
    if x >= edge1 {
        return 1.0;
    }
    smoothstep01((x - edge0) / (edge1 - edge0))
}

/// Hermite smoothstep of an already normalized `t`
#[inline]
pub fn smoothstep01(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

//! Scalar helpers shared by the populators.

/// Linear interpolation written so that `t == 0` returns `a` and `t == 1`
/// returns `b` exactly.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Cubic ease `3t² - 2t³` with zero slope at both ends.
#[inline]
pub fn curve3(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Clamp to `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v > 0.0 { v.min(1.0) } else { 0.0 }
}

/// Remap `v` from `[min, max]` to `[0, 1]`, clamping outside the band.
///
/// A degenerate band acts as a step at `min`.
#[inline]
pub fn map(v: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range <= 0.0 {
        return if v > min { 1.0 } else { 0.0 };
    }
    clamp01((v - min) / range)
}

/// Noise output in `[-1, 1]` to `[0, 1]`, clamped.
#[inline]
pub fn unit(noise: f64) -> f32 {
    clamp01(((noise + 1.0) * 0.5) as f32)
}

//! Frame-rate independent "ease toward target" smoothing.

use std::ops::{Add, Mul, Sub};

/// Blend factor for one smoothing step: `min(1, dt * rate)`, never negative.
#[must_use]
pub fn ease_factor(rate: f32, dt: f32) -> f32 {
    (dt * rate).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by the fraction `min(1, dt * rate)`.
///
/// Works for any value that supports affine blending, so the same helper is
/// used for speeds, radii, heights, and orbital plane normals. A large `dt`
/// snaps to the target instead of overshooting.
#[must_use]
pub fn ease<T>(current: T, target: T, rate: f32, dt: f32) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    current + (target - current) * ease_factor(rate, dt)
}

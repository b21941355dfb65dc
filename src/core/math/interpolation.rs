use std::ops::{Add, Mul, Sub};

/// Deltas at or below this magnitude are treated as a degenerate edge or span.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Types that can be walked linearly along a triangle edge or a scanline span.
///
/// Requirements:
/// - Copy: values are recomputed per scanline and per pixel.
/// - Add + Sub + Mul<f32>: enough to express `start + (t - t0) * slope`.
pub trait Interpolatable:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
}

impl<T> Interpolatable for T where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>
{
}

/// Change of `to - from` per unit of the driving coordinate.
///
/// Returns `None` when `delta` is zero (or not finite), where the division
/// would otherwise yield an infinite or NaN slope.
#[inline]
pub fn slope<T: Interpolatable>(from: T, to: T, delta: f32) -> Option<T> {
    if !delta.is_finite() || delta.abs() <= DEGENERATE_EPSILON {
        return None;
    }
    Some((to - from) * (1.0 / delta))
}

/// Evaluates the line through `origin` (at coordinate `t0`) with `slope` at `t`.
#[inline(always)]
pub fn step<T: Interpolatable>(origin: T, slope: T, t0: f32, t: f32) -> T {
    origin + slope * (t - t0)
}

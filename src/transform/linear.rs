//! Linear interpolation helpers.

use crate::foundation::core::DVec3;

/// Interpolate between `a` and `b`.
///
/// Written as `a * (1 - t) + b * t` so that `t == 0` yields `a` and `t == 1` yields `b` exactly.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Component-wise [`lerp`] for points.
#[inline]
pub fn lerp_dvec3(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
#[path = "../../tests/unit/transform/linear.rs"]
mod tests;

//! Spatial transform helpers built on `glam`.

use crate::foundation::core::{DQuat, DVec3};

/// Rotate `p` by `angle_deg` about the line through `center` with direction `axis`.
///
/// `axis` must be unit length.
#[inline]
pub fn rotate_about_axis(p: DVec3, axis: DVec3, center: DVec3, angle_deg: f64) -> DVec3 {
    if angle_deg == 0.0 {
        return p;
    }
    let q = DQuat::from_axis_angle(axis, angle_deg.to_radians());
    center + q * (p - center)
}

/// Uniform scale of `p` by `factor` about `center`; `factor == 1` is an exact identity.
#[inline]
pub fn scale_about(p: DVec3, factor: f64, center: DVec3) -> DVec3 {
    p * factor + center * (1.0 - factor)
}

/// Translate `p` by `delta`.
#[inline]
pub fn translate(p: DVec3, delta: DVec3) -> DVec3 {
    p + delta
}

#[cfg(test)]
#[path = "../../tests/unit/transform/spatial.rs"]
mod tests;

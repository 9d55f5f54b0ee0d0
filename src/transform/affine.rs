//! Planar transform helpers built on [`kurbo::Affine`].
//!
//! Points travel as [`DVec3`] in the `z = 0` plane; `z` is dropped on the way in and zeroed on the
//! way out.

use crate::foundation::core::{Affine, DVec3, Point, Vec2};

#[inline]
fn to_point(p: DVec3) -> Point {
    Point::new(p.x, p.y)
}

#[inline]
fn from_point(p: Point) -> DVec3 {
    DVec3::new(p.x, p.y, 0.0)
}

/// Counter-clockwise rotation by `angle_deg` about `center`.
pub fn rotation_about(center: DVec3, angle_deg: f64) -> Affine {
    Affine::rotate_about(angle_deg.to_radians(), to_point(center))
}

/// Uniform scale by `factor` about `center`.
///
/// Coefficients are laid out directly so that `factor == 1` maps every point onto itself exactly.
pub fn scale_about(center: DVec3, factor: f64) -> Affine {
    let keep = 1.0 - factor;
    Affine::new([factor, 0.0, 0.0, factor, center.x * keep, center.y * keep])
}

/// Translation by the planar part of `delta`.
pub fn translation(delta: DVec3) -> Affine {
    Affine::translate(Vec2::new(delta.x, delta.y))
}

/// Apply `affine` to a planar point.
#[inline]
pub fn apply(affine: Affine, p: DVec3) -> DVec3 {
    from_point(affine * to_point(p))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;

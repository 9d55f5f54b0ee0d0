use crate::foundation::error::{GeoError, GeoResult};

pub use glam::{DQuat, DVec3};
pub use kurbo::{Affine, Point, Vec2};

/// Ordered control points of one shape: one for a point, two for a line or vector.
pub type ControlPoints = smallvec::SmallVec<[DVec3; 2]>;

/// Spatial dimension of a shape, graph, or transform.
///
/// 2D geometry is stored in the `z = 0` plane of a [`DVec3`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Dim {
    /// Planar geometry.
    #[serde(rename = "2d")]
    Two,
    /// Spatial geometry.
    #[serde(rename = "3d")]
    Three,
}

impl Dim {
    /// Number of atomic coordinates in one point of this dimension.
    pub fn coords(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Short suffix used in function and geometry-type names.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Two => "2d",
            Self::Three => "3d",
        }
    }
}

impl std::fmt::Display for Dim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Animation tick rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator; must be > 0.
    pub den: u32,
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> GeoResult<Self> {
        if den == 0 {
            return Err(GeoError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GeoError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Number of frames needed to cover `secs`, rounded up. Non-positive durations take zero frames.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        (secs * self.as_f64()).ceil() as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Flatten points into atomic coordinates, `dim.coords()` values per point.
pub fn flatten_points(points: &[DVec3], dim: Dim) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len() * dim.coords());
    for p in points {
        out.push(p.x);
        out.push(p.y);
        if dim == Dim::Three {
            out.push(p.z);
        }
    }
    out
}

/// Component-wise closeness check used by callers comparing resolved geometry.
pub fn points_close(a: &[DVec3], b: &[DVec3], eps: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.abs_diff_eq(*q, eps))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

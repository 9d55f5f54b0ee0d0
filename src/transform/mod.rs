//! Transform parameters and point math shared by every shape kind.
//!
//! A transform is driven by a single scalar "progress" value. For rotations the progress is the
//! current angle in degrees (`0 -> angle`); translations and scales run `0 -> 1`. Evaluating at the
//! end of [`TransformParams::progress_range`] yields the exact final state.

pub(crate) mod affine;
pub(crate) mod linear;
pub(crate) mod spatial;

use crate::foundation::core::{DVec3, Dim};
use crate::foundation::error::{GeoError, GeoResult};

/// The three transform kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Rotate,
    Translate,
    Scale,
}

impl TransformKind {
    /// Expression-level function name, e.g. `rotate3d`.
    pub fn name(self, dim: Dim) -> String {
        let base = match self {
            Self::Rotate => "rotate",
            Self::Translate => "translate",
            Self::Scale => "scale",
        };
        format!("{base}{}", dim.suffix())
    }
}

/// Fully resolved transform parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformParams {
    /// Rotation by `angle_deg` about the line through `center` along the unit `axis`.
    Rotate {
        angle_deg: f64,
        axis: DVec3,
        center: DVec3,
    },
    Translate {
        delta: DVec3,
    },
    /// Uniform scale about `center`.
    Scale {
        factor: f64,
        center: DVec3,
    },
}

impl TransformParams {
    /// Rotation; `axis` is normalized and must be non-zero and finite.
    pub fn rotate(angle_deg: f64, axis: DVec3, center: DVec3) -> GeoResult<Self> {
        if !angle_deg.is_finite() {
            return Err(GeoError::argument_shape(format!(
                "rotation angle must be finite, got {angle_deg}"
            )));
        }
        let axis = axis.try_normalize().ok_or_else(|| {
            GeoError::argument_shape(format!(
                "rotation axis must be a non-zero finite direction, got ({}, {}, {})",
                axis.x, axis.y, axis.z
            ))
        })?;
        Ok(Self::Rotate {
            angle_deg,
            axis,
            center,
        })
    }

    /// Planar rotation about `center` (axis `+z`).
    pub fn rotate_planar(angle_deg: f64, center: DVec3) -> GeoResult<Self> {
        Self::rotate(angle_deg, DVec3::Z, DVec3::new(center.x, center.y, 0.0))
    }

    pub fn translate(delta: DVec3) -> GeoResult<Self> {
        if !delta.is_finite() {
            return Err(GeoError::argument_shape("translation delta must be finite"));
        }
        Ok(Self::Translate { delta })
    }

    pub fn scale(factor: f64, center: DVec3) -> GeoResult<Self> {
        if !factor.is_finite() || !center.is_finite() {
            return Err(GeoError::argument_shape(format!(
                "scale factor and center must be finite, got factor {factor}"
            )));
        }
        Ok(Self::Scale { factor, center })
    }

    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Rotate { .. } => TransformKind::Rotate,
            Self::Translate { .. } => TransformKind::Translate,
            Self::Scale { .. } => TransformKind::Scale,
        }
    }

    /// Start and end value of the animation progress.
    pub fn progress_range(&self) -> (f64, f64) {
        match self {
            Self::Rotate { angle_deg, .. } => (0.0, *angle_deg),
            Self::Translate { .. } | Self::Scale { .. } => (0.0, 1.0),
        }
    }

    /// Transform one point at `progress`.
    pub fn apply_point_at(&self, p: DVec3, dim: Dim, progress: f64) -> DVec3 {
        match (dim, *self) {
            (Dim::Two, Self::Rotate { center, .. }) => {
                affine::apply(affine::rotation_about(center, progress), p)
            }
            (Dim::Two, Self::Translate { delta }) => {
                affine::apply(affine::translation(delta * progress), p)
            }
            (Dim::Two, Self::Scale { factor, center }) => {
                let f = linear::lerp(1.0, factor, progress);
                affine::apply(affine::scale_about(center, f), p)
            }
            (Dim::Three, Self::Rotate { axis, center, .. }) => {
                spatial::rotate_about_axis(p, axis, center, progress)
            }
            (Dim::Three, Self::Translate { delta }) => spatial::translate(p, delta * progress),
            (Dim::Three, Self::Scale { factor, center }) => {
                spatial::scale_about(p, linear::lerp(1.0, factor, progress), center)
            }
        }
    }

    /// Transform a point list at `progress`.
    pub fn apply_at(&self, points: &[DVec3], dim: Dim, progress: f64) -> Vec<DVec3> {
        points
            .iter()
            .map(|p| self.apply_point_at(*p, dim, progress))
            .collect()
    }

    /// Final state, i.e. [`Self::apply_at`] at the end of the progress range.
    pub fn apply(&self, points: &[DVec3], dim: Dim) -> Vec<DVec3> {
        self.apply_at(points, dim, self.progress_range().1)
    }

    /// Human-readable parameter summary used by plan `Display`.
    pub fn describe(&self, dim: Dim) -> String {
        match (dim, self) {
            (Dim::Two, Self::Rotate { angle_deg, center, .. }) => {
                format!("{}° about ({}, {})", angle_deg, center.x, center.y)
            }
            (Dim::Three, Self::Rotate { angle_deg, axis, .. }) => {
                format!(
                    "{}° around ({}, {}, {})",
                    angle_deg, axis.x, axis.y, axis.z
                )
            }
            (Dim::Two, Self::Translate { delta }) => format!("by ({}, {})", delta.x, delta.y),
            (Dim::Three, Self::Translate { delta }) => {
                format!("by ({}, {}, {})", delta.x, delta.y, delta.z)
            }
            (Dim::Two, Self::Scale { factor, center }) => {
                format!("x{} about ({}, {})", factor, center.x, center.y)
            }
            (Dim::Three, Self::Scale { factor, center }) => {
                format!(
                    "x{} about ({}, {}, {})",
                    factor, center.x, center.y, center.z
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/params.rs"]
mod tests;

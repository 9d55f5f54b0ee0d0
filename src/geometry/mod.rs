//! Shape kinds and their transform handlers.

pub(crate) mod handler;

use std::fmt;

use crate::foundation::core::{ControlPoints, DVec3, Dim};
use crate::foundation::error::{GeoError, GeoResult};

/// The shape families that can take part in a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    Point,
    Line,
    Vector,
}

impl ShapeKind {
    /// Number of control points a shape of this kind carries.
    pub fn arity(self) -> usize {
        match self {
            Self::Point => 1,
            Self::Line | Self::Vector => 2,
        }
    }
}

/// Geometry tag of a resolved shape: a [`ShapeKind`] in a [`Dim`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    Point2d,
    Line2d,
    Vector2d,
    Point3d,
    Line3d,
    Vector3d,
}

impl GeometryType {
    pub const ALL: [GeometryType; 6] = [
        Self::Point2d,
        Self::Line2d,
        Self::Vector2d,
        Self::Point3d,
        Self::Line3d,
        Self::Vector3d,
    ];

    pub fn new(kind: ShapeKind, dim: Dim) -> Self {
        match (kind, dim) {
            (ShapeKind::Point, Dim::Two) => Self::Point2d,
            (ShapeKind::Line, Dim::Two) => Self::Line2d,
            (ShapeKind::Vector, Dim::Two) => Self::Vector2d,
            (ShapeKind::Point, Dim::Three) => Self::Point3d,
            (ShapeKind::Line, Dim::Three) => Self::Line3d,
            (ShapeKind::Vector, Dim::Three) => Self::Vector3d,
        }
    }

    pub fn kind(self) -> ShapeKind {
        match self {
            Self::Point2d | Self::Point3d => ShapeKind::Point,
            Self::Line2d | Self::Line3d => ShapeKind::Line,
            Self::Vector2d | Self::Vector3d => ShapeKind::Vector,
        }
    }

    pub fn dim(self) -> Dim {
        match self {
            Self::Point2d | Self::Line2d | Self::Vector2d => Dim::Two,
            Self::Point3d | Self::Line3d | Self::Vector3d => Dim::Three,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point2d => "point2d",
            Self::Line2d => "line2d",
            Self::Vector2d => "vector2d",
            Self::Point3d => "point3d",
            Self::Line3d => "line3d",
            Self::Vector3d => "vector3d",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved shape: geometry tag, control points and the graph it draws into.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    pub geometry: GeometryType,
    pub points: ControlPoints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
}

impl Shape {
    /// Build a shape, checking the point count against the geometry kind.
    pub fn new(
        geometry: GeometryType,
        points: impl IntoIterator<Item = DVec3>,
        graph: Option<String>,
    ) -> GeoResult<Self> {
        let points: ControlPoints = points.into_iter().collect();
        let want = geometry.kind().arity();
        if points.len() != want {
            return Err(GeoError::argument_shape(format!(
                "{geometry} needs {want} control point(s), got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(GeoError::evaluation(format!(
                "{geometry} has non-finite coordinates"
            )));
        }
        let points = match geometry.dim() {
            Dim::Two => points.iter().map(|p| p.truncate().extend(0.0)).collect(),
            Dim::Three => points,
        };
        Ok(Self {
            geometry,
            points,
            graph,
        })
    }

    pub fn point(dim: Dim, at: DVec3, graph: Option<String>) -> GeoResult<Self> {
        Self::new(GeometryType::new(ShapeKind::Point, dim), [at], graph)
    }

    pub fn segment(
        kind: ShapeKind,
        dim: Dim,
        start: DVec3,
        end: DVec3,
        graph: Option<String>,
    ) -> GeoResult<Self> {
        Self::new(GeometryType::new(kind, dim), [start, end], graph)
    }

    pub fn dim(&self) -> Dim {
        self.geometry.dim()
    }

    /// Same geometry and graph, different points.
    pub fn with_points(&self, points: impl IntoIterator<Item = DVec3>) -> GeoResult<Self> {
        Self::new(self.geometry, points, self.graph.clone())
    }

    /// Midpoint of a segment, or the point itself.
    pub fn anchor(&self) -> DVec3 {
        match self.points.as_slice() {
            [p] => *p,
            [a, b, ..] => crate::transform::linear::lerp_dvec3(*a, *b, 0.5),
            [] => DVec3::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;

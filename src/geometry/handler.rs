use crate::foundation::core::{DVec3, Dim};
use crate::foundation::error::{GeoError, GeoResult};
use crate::geometry::{Shape, ShapeKind};
use crate::scene::renderer::{Primitive, RenderHandle, SceneRenderer};
use crate::scene::style::StyleOptions;
use crate::transform::{TransformKind, TransformParams};

/// Named point bundle for one shape at one animation instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ShapeState {
    Point { point: DVec3 },
    Segment { start: DVec3, end: DVec3 },
}

impl ShapeState {
    pub fn points(&self) -> Vec<DVec3> {
        match *self {
            Self::Point { point } => vec![point],
            Self::Segment { start, end } => vec![start, end],
        }
    }
}

/// Per-kind strategy for transforming and drawing shapes.
///
/// Handlers are stateless; obtain them with [`handler_for`].
pub trait GeometryHandler: Sync {
    fn kind(&self) -> ShapeKind;

    /// Control points of `shape`: one for a point, start and end for a segment.
    fn points(&self, shape: &Shape) -> GeoResult<Vec<DVec3>> {
        if shape.geometry.kind() != self.kind() {
            return Err(GeoError::argument_shape(format!(
                "{:?} handler cannot read a {} shape",
                self.kind(),
                shape.geometry
            )));
        }
        Ok(shape.points.to_vec())
    }

    /// Package raw points into this kind's state bundle.
    fn state_from(&self, points: &[DVec3]) -> GeoResult<ShapeState>;

    /// State of `original` under `params` at `progress`.
    fn state_at(
        &self,
        original: &[DVec3],
        params: &TransformParams,
        dim: Dim,
        progress: f64,
    ) -> GeoResult<ShapeState> {
        self.state_from(&params.apply_at(original, dim, progress))
    }

    fn rotated_state(
        &self,
        original: &[DVec3],
        params: &TransformParams,
        dim: Dim,
        progress: f64,
    ) -> GeoResult<ShapeState> {
        expect_kind(params, TransformKind::Rotate)?;
        self.state_at(original, params, dim, progress)
    }

    fn translated_state(
        &self,
        original: &[DVec3],
        params: &TransformParams,
        dim: Dim,
        progress: f64,
    ) -> GeoResult<ShapeState> {
        expect_kind(params, TransformKind::Translate)?;
        self.state_at(original, params, dim, progress)
    }

    fn scaled_state(
        &self,
        original: &[DVec3],
        params: &TransformParams,
        dim: Dim,
        progress: f64,
    ) -> GeoResult<ShapeState> {
        expect_kind(params, TransformKind::Scale)?;
        self.state_at(original, params, dim, progress)
    }

    fn primitive(&self, state: &ShapeState) -> GeoResult<Primitive>;

    /// Draw `state` into `scene`.
    fn create_shape(
        &self,
        scene: &mut dyn SceneRenderer,
        state: &ShapeState,
        style: &StyleOptions,
    ) -> GeoResult<RenderHandle> {
        scene.build(self.primitive(state)?, style)
    }
}

fn expect_kind(params: &TransformParams, want: TransformKind) -> GeoResult<()> {
    if params.kind() != want {
        return Err(GeoError::argument_shape(format!(
            "expected {want:?} parameters, got {:?}",
            params.kind()
        )));
    }
    Ok(())
}

fn state_mismatch(kind: ShapeKind, state: &ShapeState) -> GeoError {
    GeoError::argument_shape(format!("{kind:?} handler cannot draw state {state:?}"))
}

pub struct PointHandler;
pub struct LineHandler;
pub struct VectorHandler;

impl GeometryHandler for PointHandler {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn state_from(&self, points: &[DVec3]) -> GeoResult<ShapeState> {
        match points {
            [point] => Ok(ShapeState::Point { point: *point }),
            _ => Err(GeoError::argument_shape(format!(
                "point expects 1 control point, got {}",
                points.len()
            ))),
        }
    }

    fn primitive(&self, state: &ShapeState) -> GeoResult<Primitive> {
        match *state {
            ShapeState::Point { point } => Ok(Primitive::Point { at: point }),
            _ => Err(state_mismatch(self.kind(), state)),
        }
    }
}

fn segment_state(kind: ShapeKind, points: &[DVec3]) -> GeoResult<ShapeState> {
    match points {
        [start, end] => Ok(ShapeState::Segment {
            start: *start,
            end: *end,
        }),
        _ => Err(GeoError::argument_shape(format!(
            "{kind:?} expects 2 control points, got {}",
            points.len()
        ))),
    }
}

impl GeometryHandler for LineHandler {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn state_from(&self, points: &[DVec3]) -> GeoResult<ShapeState> {
        segment_state(self.kind(), points)
    }

    fn primitive(&self, state: &ShapeState) -> GeoResult<Primitive> {
        match *state {
            ShapeState::Segment { start, end } => Ok(Primitive::Line { start, end }),
            _ => Err(state_mismatch(self.kind(), state)),
        }
    }
}

impl GeometryHandler for VectorHandler {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Vector
    }

    fn state_from(&self, points: &[DVec3]) -> GeoResult<ShapeState> {
        segment_state(self.kind(), points)
    }

    fn primitive(&self, state: &ShapeState) -> GeoResult<Primitive> {
        match *state {
            ShapeState::Segment { start, end } => Ok(Primitive::Vector { start, end }),
            _ => Err(state_mismatch(self.kind(), state)),
        }
    }
}

/// The single handler registered for `kind`.
pub fn handler_for(kind: ShapeKind) -> &'static dyn GeometryHandler {
    match kind {
        ShapeKind::Point => &PointHandler,
        ShapeKind::Line => &LineHandler,
        ShapeKind::Vector => &VectorHandler,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/handler.rs"]
mod tests;

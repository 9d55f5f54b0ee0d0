use crate::foundation::core::{DVec3, Dim};
use crate::foundation::error::GeoResult;
use crate::scene::style::StyleOptions;

/// Opaque handle to a shape owned by a [`SceneRenderer`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RenderHandle(pub u64);

/// Renderable primitive in scene coordinates.
///
/// Planar scenes read only `x` and `y` of each point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Point { at: DVec3 },
    Line { start: DVec3, end: DVec3 },
    /// Arrow from `start` to `end`.
    Vector { start: DVec3, end: DVec3 },
    /// Closed polygon through `vertices`.
    Polygon { vertices: Vec<DVec3> },
    /// Polyhedron given as a list of planar faces.
    Solid { faces: Vec<Vec<DVec3>> },
}

impl Primitive {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Point { .. } => "point",
            Self::Line { .. } => "line",
            Self::Vector { .. } => "vector",
            Self::Polygon { .. } => "polygon",
            Self::Solid { .. } => "solid",
        }
    }

    pub fn points(&self) -> Vec<DVec3> {
        match self {
            Self::Point { at } => vec![*at],
            Self::Line { start, end } | Self::Vector { start, end } => vec![*start, *end],
            Self::Polygon { vertices } => vertices.clone(),
            Self::Solid { faces } => faces.iter().flatten().copied().collect(),
        }
    }
}

/// A rendering container (a 2D or 3D graph) that turns primitives into live shapes.
///
/// Implementations own the shapes they build; callers only hold [`RenderHandle`]s.
pub trait SceneRenderer {
    fn dimension(&self) -> Dim;

    /// Build a shape from `primitive` styled with `style`.
    fn build(&mut self, primitive: Primitive, style: &StyleOptions) -> GeoResult<RenderHandle>;

    /// Remove a previously built shape. Returns `false` if the handle is unknown.
    fn remove(&mut self, handle: RenderHandle) -> bool;
}

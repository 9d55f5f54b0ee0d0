use std::collections::BTreeSet;
use std::fmt;

use crate::expression::collection::ShapeCollection;
use crate::expression::context::{Context, ExprId};
use crate::expression::deps::ordered_dependents;
use crate::expression::eval::Evaluator;
use crate::expression::value::Value;
use crate::foundation::core::{DVec3, Dim};
use crate::foundation::error::{GeoError, GeoResult};
use crate::geometry::handler::{GeometryHandler, ShapeState, handler_for};
use crate::geometry::{GeometryType, Shape};
use crate::transform::{TransformKind, TransformParams};

/// Original and transformed control points of one shape taking part in a transform.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShapeTransform {
    pub label: Option<String>,
    pub geometry: GeometryType,
    pub graph: Option<String>,
    pub original: Vec<DVec3>,
    pub transformed: Vec<DVec3>,
}

impl ShapeTransform {
    fn new(
        shape: &Shape,
        label: Option<String>,
        params: &TransformParams,
        dim: Dim,
    ) -> GeoResult<Self> {
        let handler = handler_for(shape.geometry.kind());
        let original = handler.points(shape)?;
        let transformed = params.apply(&original, dim);
        Ok(Self {
            label,
            geometry: shape.geometry,
            graph: shape.graph.clone(),
            original,
            transformed,
        })
    }

    pub fn handler(&self) -> &'static dyn GeometryHandler {
        handler_for(self.geometry.kind())
    }

    /// Intermediate state at `progress`, computed from this shape's own original points.
    pub fn state_at(
        &self,
        params: &TransformParams,
        dim: Dim,
        progress: f64,
    ) -> GeoResult<ShapeState> {
        let h = self.handler();
        match params.kind() {
            TransformKind::Rotate => h.rotated_state(&self.original, params, dim, progress),
            TransformKind::Translate => h.translated_state(&self.original, params, dim, progress),
            TransformKind::Scale => h.scaled_state(&self.original, params, dim, progress),
        }
    }

    /// Exact final state.
    pub fn final_state(&self) -> GeoResult<ShapeState> {
        self.handler().state_from(&self.transformed)
    }

    pub fn transformed_shape(&self) -> GeoResult<Shape> {
        Shape::new(
            self.geometry,
            self.transformed.iter().copied(),
            self.graph.clone(),
        )
    }

    fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(self.geometry.as_str())
    }
}

/// How a transform distributes over its shapes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlanMode {
    /// One target plus every labelled transitive dependent of it, in dependency order.
    Single {
        target: ShapeTransform,
        dependents: Vec<ShapeTransform>,
    },
    /// Several shapes transformed independently; no dependent propagation.
    Multi {
        shapes: ShapeCollection<ShapeTransform>,
    },
}

/// Fully resolved transform: parameters plus precomputed geometry for every shape it moves.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransformPlan {
    pub kind: TransformKind,
    pub dim: Dim,
    pub params: TransformParams,
    pub mode: PlanMode,
}

impl TransformPlan {
    pub fn name(&self) -> String {
        self.kind.name(self.dim)
    }

    pub fn is_multi(&self) -> bool {
        matches!(self.mode, PlanMode::Multi { .. })
    }

    /// Target of a single-shape transform.
    pub fn primary(&self) -> Option<&ShapeTransform> {
        match &self.mode {
            PlanMode::Single { target, .. } => Some(target),
            PlanMode::Multi { .. } => None,
        }
    }

    pub fn dependents(&self) -> &[ShapeTransform] {
        match &self.mode {
            PlanMode::Single { dependents, .. } => dependents,
            PlanMode::Multi { .. } => &[],
        }
    }

    /// Shapes given as arguments: the target, or every multi-shape entry.
    pub fn len(&self) -> usize {
        match &self.mode {
            PlanMode::Single { .. } => 1,
            PlanMode::Multi { shapes } => shapes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th shape argument's transform.
    pub fn shape_at(&self, i: usize) -> Option<&ShapeTransform> {
        match &self.mode {
            PlanMode::Single { target, .. } => (i == 0).then_some(target),
            PlanMode::Multi { shapes } => shapes.get(i),
        }
    }

    pub fn can_play(&self) -> bool {
        !self.is_empty()
    }

    /// Where a label for the result goes: the transformed point, or the midpoint of the first
    /// transformed segment.
    pub fn label_anchor(&self) -> Option<DVec3> {
        let first = self.shape_at(0)?;
        match first.transformed.as_slice() {
            [p] => Some(*p),
            [a, b, ..] => Some(crate::transform::linear::lerp_dvec3(*a, *b, 0.5)),
            [] => None,
        }
    }

    /// Value of the transform expression: the transformed target, or the collection of
    /// transformed shapes in argument order.
    pub fn value(&self) -> GeoResult<Value> {
        match &self.mode {
            PlanMode::Single { target, .. } => Ok(Value::Shape(target.transformed_shape()?)),
            PlanMode::Multi { shapes } => Ok(Value::Collection(
                shapes
                    .iter()
                    .map(ShapeTransform::transformed_shape)
                    .collect::<GeoResult<_>>()?,
            )),
        }
    }
}

impl fmt::Display for TransformPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.name())?;
        match &self.mode {
            PlanMode::Single { target, .. } => write!(f, "{}", target.display_name())?,
            PlanMode::Multi { shapes } => {
                for (i, s) in shapes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(s.display_name())?;
                }
            }
        }
        write!(f, ", {}]", self.params.describe(self.dim))
    }
}

/// A shape argument: the shape and the label it was referenced by, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeArg {
    pub shape: Shape,
    pub label: Option<String>,
}

impl ShapeArg {
    pub fn anonymous(shape: Shape) -> Self {
        Self { shape, label: None }
    }

    pub fn labeled(label: impl Into<String>, shape: Shape) -> Self {
        Self {
            shape,
            label: Some(label.into()),
        }
    }

    /// The shape currently bound to `label` in `ctx`.
    pub fn from_context(ctx: &Context, label: &str) -> GeoResult<Self> {
        let id = ctx
            .lookup(label)
            .ok_or_else(|| GeoError::evaluation(format!("undefined variable `{label}`")))?;
        let resolved = Evaluator::new(ctx).resolve(id)?;
        match &resolved.value {
            Value::Shape(shape) => Ok(Self::labeled(label, shape.clone())),
            other => Err(GeoError::argument_shape(format!(
                "`{label}` is a {}, not a shape",
                other.type_name()
            ))),
        }
    }
}

/// Explicit transform request, bypassing trailing-argument sniffing.
///
/// ```
/// use geomotion::{Context, DVec3, Expr, Func, ShapeArg, TransformCall};
/// # fn main() -> geomotion::GeoResult<()> {
/// let mut ctx = Context::new();
/// let coords = [0.0, 0.0, 0.0, 2.0, 0.0, 0.0].map(Expr::num);
/// ctx.bind("V", Expr::call(Func::Vector3d, coords));
/// let call = TransformCall::translate3d(
///     [ShapeArg::from_context(&ctx, "V")?],
///     DVec3::new(1.0, 2.0, 3.0),
/// )?;
/// let plan = call.resolve(&ctx)?;
/// assert_eq!(plan.shape_at(0).unwrap().transformed[1], DVec3::new(3.0, 2.0, 3.0));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransformCall {
    kind: TransformKind,
    dim: Dim,
    params: TransformParams,
    shapes: Vec<ShapeArg>,
}

impl TransformCall {
    fn new(
        kind: TransformKind,
        dim: Dim,
        params: TransformParams,
        shapes: impl IntoIterator<Item = ShapeArg>,
    ) -> GeoResult<Self> {
        let shapes: Vec<ShapeArg> = shapes.into_iter().collect();
        if shapes.is_empty() {
            return Err(GeoError::argument_shape(format!(
                "{} requires at least one shape",
                kind.name(dim)
            )));
        }
        Ok(Self {
            kind,
            dim,
            params,
            shapes,
        })
    }

    pub fn rotate3d(
        shapes: impl IntoIterator<Item = ShapeArg>,
        angle_deg: f64,
        axis: DVec3,
    ) -> GeoResult<Self> {
        let params = TransformParams::rotate(angle_deg, axis, DVec3::ZERO)?;
        Self::new(TransformKind::Rotate, Dim::Three, params, shapes)
    }

    pub fn rotate2d(
        shapes: impl IntoIterator<Item = ShapeArg>,
        angle_deg: f64,
        center: DVec3,
    ) -> GeoResult<Self> {
        let params = TransformParams::rotate_planar(angle_deg, center)?;
        Self::new(TransformKind::Rotate, Dim::Two, params, shapes)
    }

    pub fn translate3d(shapes: impl IntoIterator<Item = ShapeArg>, delta: DVec3) -> GeoResult<Self> {
        let params = TransformParams::translate(delta)?;
        Self::new(TransformKind::Translate, Dim::Three, params, shapes)
    }

    pub fn translate2d(shapes: impl IntoIterator<Item = ShapeArg>, delta: DVec3) -> GeoResult<Self> {
        let params = TransformParams::translate(DVec3::new(delta.x, delta.y, 0.0))?;
        Self::new(TransformKind::Translate, Dim::Two, params, shapes)
    }

    pub fn scale3d(
        shapes: impl IntoIterator<Item = ShapeArg>,
        factor: f64,
        center: DVec3,
    ) -> GeoResult<Self> {
        let params = TransformParams::scale(factor, center)?;
        Self::new(TransformKind::Scale, Dim::Three, params, shapes)
    }

    pub fn scale2d(
        shapes: impl IntoIterator<Item = ShapeArg>,
        factor: f64,
        center: DVec3,
    ) -> GeoResult<Self> {
        let params = TransformParams::scale(factor, DVec3::new(center.x, center.y, 0.0))?;
        Self::new(TransformKind::Scale, Dim::Two, params, shapes)
    }

    /// Resolve against `ctx`, collecting dependents of a single labelled target.
    pub fn resolve(&self, ctx: &Context) -> GeoResult<TransformPlan> {
        let mut ev = Evaluator::new(ctx);
        build_plan(
            &mut ev,
            self.kind,
            self.dim,
            self.params,
            self.shapes.clone(),
            None,
            true,
        )
    }
}

/// Shared resolution for parsed calls and [`TransformCall`].
///
/// `own` is the expression holding the transform; it and everything downstream of its label are
/// never treated as dependents. Dependents are only gathered when `with_dependents` is set.
#[tracing::instrument(skip(ev, shapes), fields(name = %kind.name(dim), shapes = shapes.len()))]
pub(crate) fn build_plan(
    ev: &mut Evaluator<'_>,
    kind: TransformKind,
    dim: Dim,
    params: TransformParams,
    shapes: Vec<ShapeArg>,
    own: Option<ExprId>,
    with_dependents: bool,
) -> GeoResult<TransformPlan> {
    let name = kind.name(dim);
    for (i, arg) in shapes.iter().enumerate() {
        if arg.shape.dim() != dim {
            return Err(GeoError::argument_shape(format!(
                "{name}: argument {} is a {}, expected a {dim} shape",
                i + 1,
                arg.shape.geometry
            )));
        }
    }

    let mode = match shapes.as_slice() {
        [] => {
            return Err(GeoError::argument_shape(format!(
                "{name} requires at least one shape"
            )));
        }
        [target] => {
            let primary = ShapeTransform::new(&target.shape, target.label.clone(), &params, dim)?;
            let dependents = match (&target.label, with_dependents) {
                (Some(label), true) => transformed_dependents(ev, label, own, &params, dim)?,
                _ => Vec::new(),
            };
            PlanMode::Single {
                target: primary,
                dependents,
            }
        }
        many => PlanMode::Multi {
            shapes: many
                .iter()
                .map(|a| ShapeTransform::new(&a.shape, a.label.clone(), &params, dim))
                .collect::<GeoResult<_>>()?,
        },
    };

    Ok(TransformPlan {
        kind,
        dim,
        params,
        mode,
    })
}

/// Every labelled transitive dependent of `label`, each transformed from its own original points.
fn transformed_dependents(
    ev: &mut Evaluator<'_>,
    label: &str,
    own: Option<ExprId>,
    params: &TransformParams,
    dim: Dim,
) -> GeoResult<Vec<ShapeTransform>> {
    let ctx = ev.context();
    let order = ordered_dependents(ctx, label)?;

    let mut skip: BTreeSet<ExprId> = BTreeSet::new();
    if let Some(own) = own {
        skip.insert(own);
        if let Some(own_label) = ctx.label(own) {
            skip.extend(ordered_dependents(ctx, own_label)?);
        }
    }

    let mut out = Vec::new();
    for id in order {
        if skip.contains(&id) {
            continue;
        }
        let Some(dep_label) = ctx.label(id) else {
            continue;
        };
        if dep_label == label {
            continue;
        }
        let resolved = ev.resolve(id)?;
        let Value::Shape(shape) = &resolved.value else {
            tracing::debug!(
                dependent = dep_label,
                kind = %resolved.value.type_name(),
                "skipping non-shape dependent"
            );
            continue;
        };
        if shape.dim() != dim {
            tracing::debug!(
                dependent = dep_label,
                "skipping dependent of other dimension"
            );
            continue;
        }
        out.push(ShapeTransform::new(
            shape,
            Some(dep_label.to_owned()),
            params,
            dim,
        )?);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/transform.rs"]
mod tests;

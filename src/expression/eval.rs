use std::collections::HashMap;
use std::rc::Rc;

use crate::expression::args::parse_transform_args;
use crate::expression::ast::{BinaryOp, Expr, Func};
use crate::expression::builtins;
use crate::expression::context::{Context, ExprId};
use crate::expression::transform::{ShapeArg, build_plan};
use crate::expression::value::{Resolved, Value};
use crate::foundation::core::{DVec3, Dim};
use crate::foundation::error::{GeoError, GeoResult};
use crate::geometry::{Shape, ShapeKind};

/// One resolution pass over a [`Context`].
///
/// Results are memoized per expression and per position: a root resolution and one reached as an
/// input are cached apart, since only the former carries transform dependents. Resolution never
/// mutates the context, so a fresh evaluator after rebinding sees the new state.
pub struct Evaluator<'a> {
    ctx: &'a Context,
    cache: HashMap<(ExprId, bool), Rc<Resolved>>,
    stack: Vec<ExprId>,
}

impl<'a> Evaluator<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            cache: HashMap::new(),
            stack: Vec::new(),
        }
    }

    pub fn context(&self) -> &'a Context {
        self.ctx
    }

    /// Resolve a bound or pushed expression.
    ///
    /// A transform resolved directly (not as an input to another expression) also gathers its
    /// dependents.
    #[tracing::instrument(skip(self), fields(label = self.ctx.label(id)))]
    pub fn resolve(&mut self, id: ExprId) -> GeoResult<Rc<Resolved>> {
        let key = (id, self.stack.is_empty());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Rc::clone(hit));
        }
        if let Some(pos) = self.stack.iter().position(|&s| s == id) {
            let labels: Vec<String> = self.stack[pos..]
                .iter()
                .map(|&s| self.ctx.display_name(s))
                .collect();
            return Err(GeoError::dependency_cycle(labels));
        }
        let expr = self
            .ctx
            .expr(id)
            .ok_or_else(|| GeoError::evaluation(format!("unknown expression id {}", id.0)))?;

        self.stack.push(id);
        let result = self.eval(Some(id), expr);
        self.stack.pop();
        let inner = result?;

        let resolved = Rc::new(Resolved {
            value: inner.value.clone(),
            label: self.ctx.label(id).map(str::to_owned),
            plan: inner.plan.clone(),
        });
        self.cache.insert(key, Rc::clone(&resolved));
        Ok(resolved)
    }

    /// Evaluate a free-standing expression; names resolve to their current bindings.
    pub fn eval_detached(&mut self, expr: &Expr) -> GeoResult<Rc<Resolved>> {
        self.eval(None, expr)
    }

    fn eval(&mut self, scope: Option<ExprId>, expr: &Expr) -> GeoResult<Rc<Resolved>> {
        match expr {
            Expr::Num(v) => Ok(Rc::new(Resolved::value(Value::Scalar(*v)))),
            Expr::Var(name) => {
                let target = match scope {
                    Some(s) => self.ctx.resolve_ref(s, name),
                    None => self.ctx.lookup(name),
                };
                let target = target
                    .ok_or_else(|| GeoError::evaluation(format!("undefined variable `{name}`")))?;
                self.resolve(target)
            }
            Expr::Neg(inner) => {
                let v = self.eval(scope, inner)?;
                Ok(Rc::new(Resolved::value(negate(&v.value)?)))
            }
            Expr::Binary { op, left, right } => {
                let l = self.eval(scope, left)?;
                let r = self.eval(scope, right)?;
                Ok(Rc::new(Resolved::value(binary(*op, &l.value, &r.value)?)))
            }
            Expr::Call { func, args } => {
                let args = args
                    .iter()
                    .map(|a| self.eval(scope, a))
                    .collect::<GeoResult<Vec<_>>>()?;
                self.call(scope, *func, &args)
            }
        }
    }

    fn call(
        &mut self,
        scope: Option<ExprId>,
        func: Func,
        args: &[Rc<Resolved>],
    ) -> GeoResult<Rc<Resolved>> {
        let value = match func {
            Func::G2d => builtins::graph(func, Dim::Two, args)?,
            Func::G3d => builtins::graph(func, Dim::Three, args)?,
            Func::Point2d => builtins::construct(func, ShapeKind::Point, Dim::Two, args)?,
            Func::Point3d => builtins::construct(func, ShapeKind::Point, Dim::Three, args)?,
            Func::Line2d => builtins::construct(func, ShapeKind::Line, Dim::Two, args)?,
            Func::Line3d => builtins::construct(func, ShapeKind::Line, Dim::Three, args)?,
            Func::Vector2d => builtins::construct(func, ShapeKind::Vector, Dim::Two, args)?,
            Func::Vector3d => builtins::construct(func, ShapeKind::Vector, Dim::Three, args)?,
            Func::Mid => builtins::mid(args)?,
            Func::Item => builtins::item(args)?,
            Func::Rotate2d
            | Func::Rotate3d
            | Func::Translate2d
            | Func::Translate3d
            | Func::Scale2d
            | Func::Scale3d => return self.transform_call(scope, func, args),
        };
        Ok(Rc::new(Resolved::value(value)))
    }

    fn transform_call(
        &mut self,
        scope: Option<ExprId>,
        func: Func,
        args: &[Rc<Resolved>],
    ) -> GeoResult<Rc<Resolved>> {
        let (kind, dim) = func
            .transform()
            .ok_or_else(|| GeoError::evaluation(format!("{func} is not a transform")))?;
        let parsed = parse_transform_args(kind, dim, args)?;
        let shapes = args[..parsed.shape_count]
            .iter()
            .enumerate()
            .map(|(i, a)| match &a.value {
                Value::Shape(shape) => Ok(ShapeArg {
                    shape: shape.clone(),
                    label: a.label.clone(),
                }),
                other => Err(GeoError::argument_shape(format!(
                    "{func}: argument {} must be a shape, got {}",
                    i + 1,
                    other.type_name()
                ))),
            })
            .collect::<GeoResult<Vec<_>>>()?;
        let with_dependents = self.stack.len() <= 1;
        let plan = build_plan(
            self,
            kind,
            dim,
            parsed.params,
            shapes,
            scope,
            with_dependents,
        )?;
        Ok(Rc::new(Resolved {
            value: plan.value()?,
            label: None,
            plan: Some(Rc::new(plan)),
        }))
    }
}

fn map_points(s: &Shape, f: impl Fn(DVec3) -> DVec3) -> GeoResult<Value> {
    Ok(Value::Shape(s.with_points(s.points.iter().map(|p| f(*p)))?))
}

fn negate(v: &Value) -> GeoResult<Value> {
    match v {
        Value::Scalar(x) => Ok(Value::Scalar(-x)),
        Value::Shape(s) => map_points(s, |p| -p),
        other => Err(GeoError::evaluation(format!(
            "cannot negate {}",
            other.type_name()
        ))),
    }
}

fn binary(op: BinaryOp, l: &Value, r: &Value) -> GeoResult<Value> {
    use BinaryOp::*;
    match (op, l, r) {
        (Div, _, Value::Scalar(d)) if *d == 0.0 => Err(GeoError::evaluation("division by zero")),
        (Add, Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a + b)),
        (Sub, Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a - b)),
        (Mul, Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a * b)),
        (Div, Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a / b)),
        (Add | Sub, Value::Shape(a), Value::Shape(b))
            if a.geometry.kind() == ShapeKind::Point && a.geometry == b.geometry =>
        {
            let (p, q) = (a.points[0], b.points[0]);
            let at = if op == Add { p + q } else { p - q };
            Ok(Value::Shape(a.with_points([at])?))
        }
        (Mul, Value::Scalar(k), Value::Shape(s)) | (Mul, Value::Shape(s), Value::Scalar(k)) => {
            let k = *k;
            map_points(s, |p| p * k)
        }
        (Div, Value::Shape(s), Value::Scalar(k)) => {
            let k = *k;
            map_points(s, |p| p / k)
        }
        _ => Err(GeoError::evaluation(format!(
            "cannot apply `{}` to {} and {}",
            op.symbol(),
            l.type_name(),
            r.type_name()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;

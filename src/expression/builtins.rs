//! Non-transform built-in functions.

use std::rc::Rc;

use crate::expression::ast::Func;
use crate::expression::value::{Resolved, Value};
use crate::foundation::core::{DVec3, Dim};
use crate::foundation::error::{GeoError, GeoResult};
use crate::geometry::{GeometryType, Shape, ShapeKind};
use crate::transform::linear::lerp_dvec3;

/// `g2d(...)` / `g3d(...)`. Layout arguments are accepted and ignored.
pub(crate) fn graph(func: Func, dim: Dim, args: &[Rc<Resolved>]) -> GeoResult<Value> {
    if let Some((i, a)) = args
        .iter()
        .enumerate()
        .find(|(_, a)| a.value.as_scalar().is_none())
    {
        return Err(GeoError::evaluation(format!(
            "{func}: argument {} must be a number, got {}",
            i + 1,
            a.value.type_name()
        )));
    }
    Ok(Value::Graph(dim))
}

/// `point*`, `line*` and `vector*` constructors.
///
/// An optional leading graph argument names the container; the rest are flattened to numbers, so
/// points may stand in for coordinate triples.
pub(crate) fn construct(
    func: Func,
    kind: ShapeKind,
    dim: Dim,
    args: &[Rc<Resolved>],
) -> GeoResult<Value> {
    let (mut graph, rest) = match args.split_first() {
        Some((first, rest)) => match first.value {
            Value::Graph(gdim) => {
                if gdim != dim {
                    return Err(GeoError::argument_shape(format!(
                        "{func}: graph argument is g{gdim}, expected g{dim}"
                    )));
                }
                (first.label.clone(), rest)
            }
            _ => (None, args),
        },
        None => (None, args),
    };

    let mut values = Vec::new();
    for (i, a) in rest.iter().enumerate() {
        match &a.value {
            Value::Graph(_) => {
                return Err(GeoError::argument_shape(format!(
                    "{func}: unexpected graph at argument {}",
                    i + 1 + (args.len() - rest.len())
                )));
            }
            Value::Shape(s) => {
                if graph.is_none() {
                    graph = s.graph.clone();
                }
                values.extend(a.value.atomic_values());
            }
            _ => values.extend(a.value.atomic_values()),
        }
    }

    let c = dim.coords();
    let want = kind.arity() * c;
    if values.len() != want {
        return Err(GeoError::argument_shape(format!(
            "{func} expects {want} coordinates, got {}",
            values.len()
        )));
    }
    let points = values.chunks_exact(c).map(|v| match dim {
        Dim::Two => DVec3::new(v[0], v[1], 0.0),
        Dim::Three => DVec3::new(v[0], v[1], v[2]),
    });
    Ok(Value::Shape(Shape::new(
        GeometryType::new(kind, dim),
        points,
        graph,
    )?))
}

/// `mid(segment)` or `mid(a, b)`.
pub(crate) fn mid(args: &[Rc<Resolved>]) -> GeoResult<Value> {
    let shapes: Vec<&Shape> = args.iter().filter_map(|a| a.value.as_shape()).collect();
    if shapes.len() != args.len() {
        return Err(GeoError::evaluation("mid: every argument must be a shape"));
    }
    let (dim, graph, at) = match shapes.as_slice() {
        [s] if s.points.len() == 2 => (s.dim(), s.graph.clone(), s.anchor()),
        [a, b] => {
            if a.dim() != b.dim() {
                return Err(GeoError::evaluation(format!(
                    "mid: cannot mix {} and {}",
                    a.geometry, b.geometry
                )));
            }
            (a.dim(), a.graph.clone(), lerp_dvec3(a.anchor(), b.anchor(), 0.5))
        }
        _ => {
            return Err(GeoError::evaluation(
                "mid expects one segment or two shapes",
            ));
        }
    };
    Ok(Value::Shape(Shape::point(dim, at, graph)?))
}

/// `item(collection, index)`, 0-based.
pub(crate) fn item(args: &[Rc<Resolved>]) -> GeoResult<Value> {
    let [coll, index] = args else {
        return Err(GeoError::evaluation(format!(
            "item expects 2 arguments, got {}",
            args.len()
        )));
    };
    let Value::Collection(c) = &coll.value else {
        return Err(GeoError::evaluation(format!(
            "item: first argument must be a collection, got {}",
            coll.value.type_name()
        )));
    };
    let i = index
        .value
        .as_scalar()
        .filter(|v| v.fract() == 0.0 && *v >= 0.0)
        .ok_or_else(|| GeoError::evaluation("item: index must be a non-negative integer"))?;
    c.get(i as usize).cloned().map(Value::Shape).ok_or_else(|| {
        GeoError::evaluation(format!(
            "item: index {i} out of range for collection of {}",
            c.len()
        ))
    })
}

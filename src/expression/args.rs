//! Trailing-argument disambiguation for the transform family.
//!
//! Transform calls list their shapes first and their parameters last, and the parameters may be
//! spelled several ways. Patterns are tried from the end of the argument list:
//!
//! | call          | trailing forms                                                     |
//! |---------------|--------------------------------------------------------------------|
//! | `rotate3d`    | `angle, vector` / `angle, point` / `angle, ax, ay, az`             |
//! | `translate3d` | `vector` / `point` / `dx, dy, dz`                                  |
//! | `scale3d`     | `factor, point` / `factor, cx, cy, cz` / `factor`                  |
//! | `rotate2d`    | `angle, point` / `angle, cx, cy` / `angle`                         |
//! | `translate2d` | `vector` / `point` / `dx, dy`                                      |
//! | `scale2d`     | `factor, point` / `factor, cx, cy` / `factor`                      |
//!
//! A trailing argument is read as a vector when it carries two points' worth of numbers and as a
//! point when it carries one. This is ambiguous for a single-shape call whose last shape is itself
//! a point (`translate3d(P, Q)` translates `P` by `Q`); callers that need to be explicit use
//! [`crate::TransformCall`].

use std::rc::Rc;

use crate::expression::value::{Resolved, Value};
use crate::foundation::core::{DVec3, Dim};
use crate::foundation::error::{GeoError, GeoResult};
use crate::transform::{TransformKind, TransformParams};

/// Result of splitting a transform call's arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedArgs {
    /// Leading arguments that are shapes.
    pub shape_count: usize,
    pub params: TransformParams,
}

struct ArgView<'a> {
    func: String,
    args: &'a [Rc<Resolved>],
    dim: Dim,
}

impl ArgView<'_> {
    fn n(&self) -> usize {
        self.args.len()
    }

    fn values(&self, i: usize) -> Vec<f64> {
        self.args[i].value.atomic_values()
    }

    fn is_scalar(&self, i: usize) -> bool {
        matches!(self.args[i].value, Value::Scalar(_))
    }

    /// Whether the last `k` arguments are all plain numbers.
    fn trailing_scalars(&self, k: usize) -> bool {
        self.n() >= k && (self.n() - k..self.n()).all(|i| self.is_scalar(i))
    }

    fn scalar(&self, i: usize, what: &str) -> GeoResult<f64> {
        self.args[i].value.as_scalar().ok_or_else(|| {
            GeoError::argument_shape(format!(
                "{}: argument {} ({what}) must be a number, got {}",
                self.func,
                i + 1,
                self.args[i].value.type_name()
            ))
        })
    }

    /// Point from consecutive scalar arguments starting at `i`.
    fn point_from_scalars(&self, i: usize) -> GeoResult<DVec3> {
        let x = self.scalar(i, "x")?;
        let y = self.scalar(i + 1, "y")?;
        let z = match self.dim {
            Dim::Two => 0.0,
            Dim::Three => self.scalar(i + 2, "z")?,
        };
        Ok(DVec3::new(x, y, z))
    }

    /// First point carried by argument `i`.
    fn point_from_values(&self, i: usize) -> DVec3 {
        let v = self.values(i);
        let c = self.dim.coords();
        point_at(&v, 0, c)
    }

    /// Direction of a vector-like argument: second point minus first.
    fn direction_from_values(&self, i: usize) -> DVec3 {
        let v = self.values(i);
        let c = self.dim.coords();
        point_at(&v, c, c) - point_at(&v, 0, c)
    }

    fn unrecognized(&self, what: &str) -> GeoError {
        let last = self.n().saturating_sub(1);
        let got = self
            .args
            .get(last)
            .map(|a| a.value.type_name())
            .unwrap_or_else(|| "nothing".to_owned());
        GeoError::argument_shape(format!(
            "{}: cannot read {what} from argument {} ({got})",
            self.func,
            last + 1
        ))
    }
}

/// One shape plus one parameter.
const MIN_ARGS: usize = 2;

fn point_at(v: &[f64], start: usize, coords: usize) -> DVec3 {
    let get = |k: usize| v.get(start + k).copied().unwrap_or(0.0);
    match coords {
        2 => DVec3::new(get(0), get(1), 0.0),
        _ => DVec3::new(get(0), get(1), get(2)),
    }
}

/// Split transform arguments into leading shapes and trailing parameters.
pub fn parse_transform_args(
    kind: TransformKind,
    dim: Dim,
    args: &[Rc<Resolved>],
) -> GeoResult<ParsedArgs> {
    let view = ArgView {
        func: kind.name(dim),
        args,
        dim,
    };
    if view.n() < MIN_ARGS {
        return Err(GeoError::argument_shape(format!(
            "{} requires at least {MIN_ARGS} arguments, got {}",
            view.func,
            view.n()
        )));
    }

    let (shape_count, params) = match kind {
        TransformKind::Rotate => parse_rotate(&view)?,
        TransformKind::Translate => parse_translate(&view)?,
        TransformKind::Scale => parse_scale(&view)?,
    };
    if shape_count < 1 {
        return Err(GeoError::argument_shape(format!(
            "{} requires at least one shape",
            view.func
        )));
    }
    Ok(ParsedArgs {
        shape_count,
        params,
    })
}

fn parse_rotate(view: &ArgView<'_>) -> GeoResult<(usize, TransformParams)> {
    let n = view.n();
    let c = view.dim.coords();
    let last_len = view.values(n - 1).len();
    match view.dim {
        Dim::Three => {
            let (angle_index, axis) = if last_len >= 2 * c {
                (n - 2, view.direction_from_values(n - 1))
            } else if last_len >= c {
                (n - 2, view.point_from_values(n - 1))
            } else if n >= 4 && view.trailing_scalars(3) {
                (n - 4, view.point_from_scalars(n - 3)?)
            } else {
                return Err(view.unrecognized("a rotation axis"));
            };
            let angle = view.scalar(angle_index, "angle")?;
            let params = TransformParams::rotate(angle, axis, DVec3::ZERO)?;
            Ok((angle_index, params))
        }
        Dim::Two => {
            let (angle_index, center) = if last_len >= c && view.is_scalar(n - 2) {
                (n - 2, view.point_from_values(n - 1))
            } else if n >= 4 && view.trailing_scalars(3) {
                (n - 3, view.point_from_scalars(n - 2)?)
            } else if view.is_scalar(n - 1) {
                (n - 1, DVec3::ZERO)
            } else {
                return Err(view.unrecognized("a rotation angle or center"));
            };
            let angle = view.scalar(angle_index, "angle")?;
            Ok((angle_index, TransformParams::rotate_planar(angle, center)?))
        }
    }
}

fn parse_translate(view: &ArgView<'_>) -> GeoResult<(usize, TransformParams)> {
    let n = view.n();
    let c = view.dim.coords();
    let last_len = view.values(n - 1).len();
    let (delta_index, delta) = if last_len >= 2 * c {
        (n - 1, view.direction_from_values(n - 1))
    } else if last_len >= c {
        (n - 1, view.point_from_values(n - 1))
    } else if n > c && view.trailing_scalars(c) {
        (n - c, view.point_from_scalars(n - c)?)
    } else {
        return Err(view.unrecognized("a translation"));
    };
    Ok((delta_index, TransformParams::translate(delta)?))
}

fn parse_scale(view: &ArgView<'_>) -> GeoResult<(usize, TransformParams)> {
    let n = view.n();
    let c = view.dim.coords();
    let last_len = view.values(n - 1).len();
    let (factor_index, center) =
        if last_len >= c && view.is_scalar(n - 2) {
            (n - 2, view.point_from_values(n - 1))
        } else if n > c + 1 && view.trailing_scalars(c + 1) {
            (n - c - 1, view.point_from_scalars(n - c)?)
        } else if view.is_scalar(n - 1) {
            (n - 1, DVec3::ZERO)
        } else {
            return Err(view.unrecognized("a scale factor"));
        };
    let factor = view.scalar(factor_index, "factor")?;
    Ok((factor_index, TransformParams::scale(factor, center)?))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/args.rs"]
mod tests;

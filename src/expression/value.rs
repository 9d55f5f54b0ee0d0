use std::fmt;
use std::rc::Rc;

use crate::expression::collection::ShapeCollection;
use crate::expression::transform::TransformPlan;
use crate::foundation::core::{Dim, flatten_points};
use crate::geometry::Shape;

/// Concrete value of a resolved expression.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Scalar(f64),
    /// A rendering container reference of the given dimension.
    Graph(Dim),
    Shape(Shape),
    Collection(ShapeCollection<Shape>),
}

impl Value {
    /// Flat list of atomic numbers: one per scalar, `dim` per point.
    pub fn atomic_values(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::Graph(_) => Vec::new(),
            Self::Shape(s) => flatten_points(&s.points, s.dim()),
            Self::Collection(c) => c
                .iter()
                .flat_map(|s| flatten_points(&s.points, s.dim()))
                .collect(),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Self::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            Self::Scalar(_) => "number".to_owned(),
            Self::Graph(dim) => format!("g{dim}"),
            Self::Shape(s) => s.geometry.to_string(),
            Self::Collection(c) => format!("collection of {}", c.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Graph(dim) => write!(f, "g{dim}"),
            Self::Shape(s) => {
                write!(f, "{}(", s.geometry)?;
                for (i, v) in flatten_points(&s.points, s.dim()).iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str(")")
            }
            Self::Collection(c) => {
                f.write_str("[")?;
                for (i, s) in c.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Value::Shape(s.clone()))?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Immutable result of resolving one expression.
#[derive(Debug)]
pub struct Resolved {
    pub value: Value,
    /// Label of the bound expression this came from, if any.
    pub label: Option<String>,
    /// Present when the expression is a transform call.
    pub plan: Option<Rc<TransformPlan>>,
}

impl Resolved {
    pub fn value(value: Value) -> Self {
        Self {
            value,
            label: None,
            plan: None,
        }
    }
}

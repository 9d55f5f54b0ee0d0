use std::collections::BTreeSet;
use std::fmt;

use crate::foundation::core::Dim;
use crate::scene::style::StyleOptions;
use crate::transform::TransformKind;

/// Parsed expression tree.
///
/// Scripts are authored as JSON with externally tagged nodes, e.g.
/// `{"call": {"func": "point3d", "args": [{"var": "g"}, {"num": 1}, {"num": 0}, {"num": 0}]}}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Num(f64),
    Var(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: Func,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Func {
    G2d,
    G3d,
    Point2d,
    Point3d,
    Line2d,
    Line3d,
    Vector2d,
    Vector3d,
    Mid,
    Item,
    Rotate2d,
    Rotate3d,
    Translate2d,
    Translate3d,
    Scale2d,
    Scale3d,
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Self::G2d => "g2d",
            Self::G3d => "g3d",
            Self::Point2d => "point2d",
            Self::Point3d => "point3d",
            Self::Line2d => "line2d",
            Self::Line3d => "line3d",
            Self::Vector2d => "vector2d",
            Self::Vector3d => "vector3d",
            Self::Mid => "mid",
            Self::Item => "item",
            Self::Rotate2d => "rotate2d",
            Self::Rotate3d => "rotate3d",
            Self::Translate2d => "translate2d",
            Self::Translate3d => "translate3d",
            Self::Scale2d => "scale2d",
            Self::Scale3d => "scale3d",
        }
    }

    /// Transform kind and dimension for the transform family.
    pub fn transform(self) -> Option<(TransformKind, Dim)> {
        Some(match self {
            Self::Rotate2d => (TransformKind::Rotate, Dim::Two),
            Self::Rotate3d => (TransformKind::Rotate, Dim::Three),
            Self::Translate2d => (TransformKind::Translate, Dim::Two),
            Self::Translate3d => (TransformKind::Translate, Dim::Three),
            Self::Scale2d => (TransformKind::Scale, Dim::Two),
            Self::Scale3d => (TransformKind::Scale, Dim::Three),
            _ => return None,
        })
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Expr {
    pub fn num(v: f64) -> Self {
        Self::Num(v)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    pub fn call(func: Func, args: impl IntoIterator<Item = Expr>) -> Self {
        Self::Call {
            func,
            args: args.into_iter().collect(),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn neg(inner: Expr) -> Self {
        Self::Neg(Box::new(inner))
    }

    /// Every variable name referenced anywhere in this tree.
    pub fn references(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Num(_) => {}
            Self::Var(name) => {
                out.insert(name.clone());
            }
            Self::Neg(inner) => inner.collect_refs(out),
            Self::Binary { left, right, .. } => {
                left.collect_refs(out);
                right.collect_refs(out);
            }
            Self::Call { args, .. } => {
                for a in args {
                    a.collect_refs(out);
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(v) => write!(f, "{v}"),
            Self::Var(name) => f.write_str(name),
            Self::Neg(inner) => write!(f, "-({inner})"),
            Self::Binary { op, left, right } => write!(f, "({left} {} {right})", op.symbol()),
            Self::Call { func, args } => {
                write!(f, "{func}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// One script line: an optional label, its expression and optional style overrides.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Statement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

impl Statement {
    pub fn bind(label: impl Into<String>, expr: Expr) -> Self {
        Self {
            label: Some(label.into()),
            expr,
            style: None,
        }
    }

    pub fn eval(expr: Expr) -> Self {
        Self {
            label: None,
            expr,
            style: None,
        }
    }

    pub fn styled(mut self, style: StyleOptions) -> Self {
        self.style = Some(style);
        self
    }
}

/// Ordered statements evaluated top to bottom.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    pub statements: Vec<Statement>,
}

impl Script {
    pub fn from_json_str(s: &str) -> crate::foundation::error::GeoResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/ast.rs"]
mod tests;

//! geomotion builds geometric diagrams from expressions and animates transforms over them.
//!
//! Shapes (points, lines, vectors in 2D or 3D) are bound to labels in a [`Context`]. A transform
//! (`rotate`, `translate`, `scale`) applied to a labelled shape also moves every labelled shape
//! derived from it, in dependency order, each from its own original points. The public API is
//! session-oriented:
//!
//! - Evaluate a [`Script`] into a [`Session`]
//! - Attach a [`SceneRenderer`] to each graph (or use [`RecordingScene`])
//! - Turn transform statements into [`TransformCommand`]s and play them on an [`AnimationDriver`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod command;
pub(crate) mod expression;
pub(crate) mod geometry;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod transform;

pub use crate::foundation::core::{
    Affine, ControlPoints, DQuat, DVec3, Dim, Fps, Point, Vec2, flatten_points, points_close,
};
pub use crate::foundation::error::{GeoError, GeoResult};

pub use crate::animation::driver::{AnimationDriver, FrameDriver, Tween, TweenTarget};
pub use crate::animation::ease::Ease;
pub use crate::animation::join::{CancelToken, Completion, Settler, Status};
pub use crate::command::lifecycle::{Command, CommandResult, CommandState, Timing};
pub use crate::command::transform::TransformCommand;
pub use crate::expression::args::{ParsedArgs, parse_transform_args};
pub use crate::expression::ast::{BinaryOp, Expr, Func, Script, Statement};
pub use crate::expression::collection::ShapeCollection;
pub use crate::expression::context::{Context, ExprId};
pub use crate::expression::deps::ordered_dependents;
pub use crate::expression::eval::Evaluator;
pub use crate::expression::transform::{
    PlanMode, ShapeArg, ShapeTransform, TransformCall, TransformPlan,
};
pub use crate::expression::value::{Resolved, Value};
pub use crate::geometry::handler::{
    GeometryHandler, LineHandler, PointHandler, ShapeState, VectorHandler, handler_for,
};
pub use crate::geometry::{GeometryType, Shape, ShapeKind};
pub use crate::scene::recording::{LiveShape, RecordingScene, SceneEvent};
pub use crate::scene::registry::{SceneRef, SceneRegistry};
pub use crate::scene::renderer::{Primitive, RenderHandle, SceneRenderer};
pub use crate::scene::style::{StyleOptions, StyleRegistry};
pub use crate::session::diagram::{Definition, Session};
pub use crate::session::opts::SessionOpts;
pub use crate::transform::{TransformKind, TransformParams};

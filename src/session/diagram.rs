use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::animation::driver::FrameDriver;
use crate::command::lifecycle::Command;
use crate::command::transform::TransformCommand;
use crate::expression::ast::{Expr, Script, Statement};
use crate::expression::context::{Context, ExprId};
use crate::expression::eval::Evaluator;
use crate::expression::value::{Resolved, Value};
use crate::foundation::core::Dim;
use crate::foundation::error::{GeoError, GeoResult};
use crate::scene::recording::RecordingScene;
use crate::scene::registry::{SceneRef, SceneRegistry};
use crate::scene::style::StyleRegistry;
use crate::session::opts::SessionOpts;

/// One evaluated statement.
#[derive(Debug)]
pub struct Definition {
    pub id: ExprId,
    pub statement: Statement,
    pub resolved: Rc<Resolved>,
}

impl Definition {
    /// Whether the statement is itself a transform call (not merely a name bound to one).
    pub fn is_transform(&self) -> bool {
        matches!(&self.statement.expr, Expr::Call { func, .. } if func.transform().is_some())
    }
}

/// A diagram being built: options, bindings, graph containers and the evaluated statements.
///
/// Everything a command needs (styles, timing, containers) is owned here and passed down
/// explicitly; dropping the session releases it.
pub struct Session {
    opts: SessionOpts,
    styles: StyleRegistry,
    ctx: Context,
    scenes: SceneRegistry,
    graphs: BTreeMap<String, Dim>,
    definitions: Vec<Definition>,
}

impl Session {
    pub fn new(opts: SessionOpts) -> GeoResult<Self> {
        opts.validate()?;
        let styles = opts.style_registry();
        Ok(Self {
            opts,
            styles,
            ctx: Context::new(),
            scenes: SceneRegistry::new(),
            graphs: BTreeMap::new(),
            definitions: Vec::new(),
        })
    }

    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Labels of graphs defined so far, with their dimension.
    pub fn graphs(&self) -> &BTreeMap<String, Dim> {
        &self.graphs
    }

    /// Bind (or evaluate, when unlabeled) one statement and resolve it right away.
    ///
    /// The context only changes when resolution succeeds.
    #[tracing::instrument(skip_all, fields(label = statement.label.as_deref()))]
    pub fn define(&mut self, statement: Statement) -> GeoResult<Rc<Resolved>> {
        let mut ctx = self.ctx.clone();
        let id = match &statement.label {
            Some(label) => ctx.bind(label.clone(), statement.expr.clone()),
            None => ctx.push(statement.expr.clone()),
        };
        let resolved = Evaluator::new(&ctx).resolve(id)?;
        self.ctx = ctx;
        if let (Some(label), Value::Graph(dim)) = (&statement.label, &resolved.value) {
            self.scenes.declare(label.clone(), *dim);
            self.graphs.insert(label.clone(), *dim);
        }
        tracing::debug!(value = %resolved.value, "defined");
        self.definitions.push(Definition {
            id,
            statement,
            resolved: Rc::clone(&resolved),
        });
        Ok(resolved)
    }

    pub fn run_script(&mut self, script: &Script) -> GeoResult<()> {
        for statement in &script.statements {
            self.define(statement.clone())?;
        }
        Ok(())
    }

    /// Evaluate `expr` against the current bindings without recording it.
    pub fn evaluate(&self, expr: &Expr) -> GeoResult<Rc<Resolved>> {
        Evaluator::new(&self.ctx).eval_detached(expr)
    }

    /// Attach an externally owned container to a graph.
    pub fn attach_scene(&mut self, label: &str, scene: SceneRef) -> GeoResult<()> {
        let dim = self.graph_dim(label)?;
        let actual = scene.borrow().dimension();
        if actual != dim {
            return Err(GeoError::configuration(format!(
                "graph `{label}` is {dim}, cannot attach a {actual} container"
            )));
        }
        self.scenes.register(label, scene);
        Ok(())
    }

    /// Attach a fresh [`RecordingScene`] to the graph `label`.
    pub fn attach_recording_scene(&mut self, label: &str) -> GeoResult<Rc<RefCell<RecordingScene>>> {
        let dim = self.graph_dim(label)?;
        let scene = Rc::new(RefCell::new(RecordingScene::new(dim)));
        self.scenes.register(label, scene.clone());
        Ok(scene)
    }

    /// Attach a [`RecordingScene`] to every graph defined so far.
    pub fn attach_recording_scenes(&mut self) -> BTreeMap<String, Rc<RefCell<RecordingScene>>> {
        let graphs: Vec<(String, Dim)> =
            self.graphs.iter().map(|(l, d)| (l.clone(), *d)).collect();
        graphs
            .into_iter()
            .map(|(label, dim)| {
                let scene = Rc::new(RefCell::new(RecordingScene::new(dim)));
                self.scenes.register(label.clone(), scene.clone());
                (label, scene)
            })
            .collect()
    }

    fn graph_dim(&self, label: &str) -> GeoResult<Dim> {
        self.graphs
            .get(label)
            .copied()
            .ok_or_else(|| GeoError::configuration(format!("graph `{label}` is not defined")))
    }

    /// One command per transform statement, in statement order.
    pub fn commands(&self) -> GeoResult<Vec<TransformCommand>> {
        let timing = self.opts.timing();
        self.definitions
            .iter()
            .filter(|d| d.is_transform())
            .filter_map(|d| d.resolved.plan.clone().map(|plan| (d, plan)))
            .map(|(d, plan)| {
                TransformCommand::new(plan, &self.styles, d.statement.style.as_ref(), timing)
            })
            .collect()
    }

    /// Initialize every command, then play them one after another to completion.
    ///
    /// All containers are acquired before anything is drawn. With `direct` set, final states are
    /// drawn without animating.
    #[tracing::instrument(skip(self))]
    pub fn play_all(&self, direct: bool) -> GeoResult<Vec<TransformCommand>> {
        let mut commands = self.commands()?;
        for cmd in &mut commands {
            cmd.init(&self.scenes)?;
        }

        let mut driver = FrameDriver::new(self.opts.fps);
        for cmd in &mut commands {
            if direct {
                cmd.direct_play()?;
                continue;
            }
            let done = cmd.play(&mut driver)?;
            let frames = driver.run_until_idle(self.opts.max_frames)?;
            done.result()?;
            tracing::info!(command = %cmd.plan(), frames, "played");
        }
        Ok(commands)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/diagram.rs"]
mod tests;

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::driver::{AnimationDriver, Tween};
use crate::animation::join::{CancelToken, Completion};
use crate::command::lifecycle::{Command, CommandResult, CommandState, Timing};
use crate::command::track::{HandleSlot, ShapeTrack, draw_state, release};
use crate::expression::transform::{PlanMode, ShapeTransform, TransformPlan};
use crate::foundation::error::{GeoError, GeoResult};
use crate::scene::registry::{SceneRef, SceneRegistry};
use crate::scene::renderer::RenderHandle;
use crate::scene::style::{StyleOptions, StyleRegistry};

/// Command for one resolved transform.
///
/// The primary shape is the single target, or the first shape of a multi-shape call. Every other
/// shape (dependents, or the remaining multi-shape entries) gets one child command that shares the
/// parent's container and plays concurrently with it.
pub struct TransformCommand {
    plan: Rc<TransformPlan>,
    shape: ShapeTransform,
    style: StyleOptions,
    timing: Timing,
    children: Vec<TransformCommand>,
    scene: Option<SceneRef>,
    state: CommandState,
    slot: HandleSlot,
    cancel: CancelToken,
}

impl std::fmt::Debug for TransformCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformCommand")
            .field("plan", &self.plan)
            .field("shape", &self.shape)
            .field("style", &self.style)
            .field("timing", &self.timing)
            .field("children", &self.children)
            .field("state", &self.state)
            .field("slot", &self.slot)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl TransformCommand {
    /// `call_site` overrides are merged over the registry default of each shape's own geometry
    /// type, for arguments and dependents alike.
    pub fn new(
        plan: Rc<TransformPlan>,
        styles: &StyleRegistry,
        call_site: Option<&StyleOptions>,
        timing: Timing,
    ) -> GeoResult<Self> {
        let (first, rest): (ShapeTransform, Vec<(ShapeTransform, StyleOptions)>) =
            match &plan.mode {
                PlanMode::Single { target, dependents } => (
                    target.clone(),
                    dependents
                        .iter()
                        .map(|d| (d.clone(), styles.resolve(d.geometry, call_site)))
                        .collect(),
                ),
                PlanMode::Multi { shapes } => {
                    let mut it = shapes.iter();
                    let first = it.next().cloned().ok_or_else(|| {
                        GeoError::argument_shape(format!("{} has no shapes", plan.name()))
                    })?;
                    let rest = it
                        .map(|s| (s.clone(), styles.resolve(s.geometry, call_site)))
                        .collect();
                    (first, rest)
                }
            };

        let style = styles.resolve(first.geometry, call_site);
        let children = rest
            .into_iter()
            .map(|(shape, style)| Self::leaf(Rc::clone(&plan), shape, style, timing))
            .collect();
        Ok(Self {
            children,
            ..Self::leaf(plan, first, style, timing)
        })
    }

    fn leaf(
        plan: Rc<TransformPlan>,
        shape: ShapeTransform,
        style: StyleOptions,
        timing: Timing,
    ) -> Self {
        Self {
            plan,
            shape,
            style,
            timing,
            children: Vec::new(),
            scene: None,
            state: CommandState::Uninitialized,
            slot: Rc::new(RefCell::new(None)),
            cancel: CancelToken::new(),
        }
    }

    pub fn plan(&self) -> &TransformPlan {
        &self.plan
    }

    pub fn children(&self) -> &[TransformCommand] {
        &self.children
    }

    /// Handle of the primary shape currently drawn, if any.
    pub fn handle(&self) -> Option<RenderHandle> {
        *self.slot.borrow()
    }

    /// Handles currently owned by this command and its children, or `None` before anything has
    /// been drawn.
    pub fn result(&self) -> Option<CommandResult> {
        let primary = self.handle()?;
        if self.children.is_empty() && !self.plan.is_multi() {
            return Some(CommandResult::Single(primary));
        }
        let mut all = vec![primary];
        all.extend(self.children.iter().filter_map(TransformCommand::handle));
        Some(CommandResult::Collection(all))
    }

    fn attach(&mut self, scene: SceneRef) {
        for child in &mut self.children {
            child.attach(Rc::clone(&scene));
        }
        self.scene = Some(scene);
        self.state = CommandState::Initialized;
    }

    fn ready_scene(&self) -> GeoResult<SceneRef> {
        match (self.state, &self.scene) {
            (CommandState::Initialized, Some(scene)) => Ok(Rc::clone(scene)),
            (CommandState::Uninitialized, _) | (_, None) => Err(GeoError::configuration(format!(
                "{}: command not initialized",
                self.plan.name()
            ))),
            (CommandState::Played | CommandState::DirectPlayed, _) => {
                Err(GeoError::animation(format!(
                    "{}: command already played; use play_single to replay",
                    self.plan.name()
                )))
            }
        }
    }

    /// Cancel any running tween and remove drawn shapes, keeping the container.
    fn discard(&mut self) {
        self.cancel.cancel();
        if let Some(scene) = &self.scene {
            release(scene, &self.slot);
        }
        for child in &mut self.children {
            child.discard();
        }
    }

    fn reset_initialized(&mut self) {
        self.state = CommandState::Initialized;
        for child in &mut self.children {
            child.reset_initialized();
        }
    }

    fn start_track(
        &mut self,
        scene: SceneRef,
        driver: &mut dyn AnimationDriver,
    ) -> Completion {
        // A fresh slot and token per play keep a cancelled track from touching the new one.
        self.cancel = CancelToken::new();
        self.slot = Rc::new(RefCell::new(None));
        let (from, to) = self.plan.params.progress_range();
        let tween = Tween::new(from, to, self.timing.duration_secs, self.timing.ease)
            .with_cancel(self.cancel.clone());
        let track = ShapeTrack {
            scene,
            shape: self.shape.clone(),
            params: self.plan.params,
            dim: self.plan.dim,
            style: self.style.clone(),
            slot: Rc::clone(&self.slot),
        };
        self.state = CommandState::Played;
        driver.start(tween, Box::new(track))
    }
}

impl Command for TransformCommand {
    fn state(&self) -> CommandState {
        self.state
    }

    #[tracing::instrument(skip_all, fields(command = %self.plan))]
    fn init(&mut self, scenes: &SceneRegistry) -> GeoResult<()> {
        if matches!(
            self.state,
            CommandState::Played | CommandState::DirectPlayed
        ) {
            return Err(GeoError::animation(format!(
                "{}: command already played; clear it before initializing again",
                self.plan.name()
            )));
        }
        let scene = scenes.acquire(self.shape.graph.as_deref(), self.plan.dim)?;
        self.attach(scene);
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(command = %self.plan, children = self.children.len()))]
    fn play(&mut self, driver: &mut dyn AnimationDriver) -> GeoResult<Completion> {
        let scene = self.ready_scene()?;
        let mut parts = Vec::with_capacity(self.children.len() + 1);
        parts.push(self.start_track(Rc::clone(&scene), driver));
        for child in &mut self.children {
            parts.push(child.start_track(Rc::clone(&scene), driver));
        }
        Ok(Completion::all(parts))
    }

    fn direct_play(&mut self) -> GeoResult<()> {
        let scene = self.ready_scene()?;
        let state = self.shape.final_state()?;
        draw_state(&scene, &self.shape, &state, &self.style, &self.slot)?;
        self.state = CommandState::DirectPlayed;
        for child in &mut self.children {
            child.direct_play()?;
        }
        Ok(())
    }

    fn play_single(&mut self, driver: &mut dyn AnimationDriver) -> GeoResult<Completion> {
        if self.state == CommandState::Uninitialized {
            return Err(GeoError::configuration(format!(
                "{}: command not initialized",
                self.plan.name()
            )));
        }
        self.discard();
        self.reset_initialized();
        self.play(driver)
    }

    fn clear(&mut self) {
        self.discard();
        self.scene = None;
        self.state = CommandState::Uninitialized;
        for child in &mut self.children {
            child.clear();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/transform.rs"]
mod tests;

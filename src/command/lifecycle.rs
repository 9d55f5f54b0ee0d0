use crate::animation::driver::AnimationDriver;
use crate::animation::ease::Ease;
use crate::animation::join::Completion;
use crate::foundation::error::GeoResult;
use crate::scene::registry::SceneRegistry;
use crate::scene::renderer::RenderHandle;

/// Lifecycle position of a [`Command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandState {
    Uninitialized,
    Initialized,
    Played,
    DirectPlayed,
}

/// Duration and easing shared by every tween a command starts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timing {
    pub duration_secs: f64,
    pub ease: Ease,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration_secs: 2.0,
            ease: Ease::default(),
        }
    }
}

/// Render handles a command currently owns.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "handles", rename_all = "snake_case")]
pub enum CommandResult {
    /// A lone target with no dependents.
    Single(RenderHandle),
    /// Primary first, then one handle per child in order.
    Collection(Vec<RenderHandle>),
}

/// Executable form of a resolved transform.
///
/// `Uninitialized -> Initialized -> {Played | DirectPlayed}`; [`Command::clear`] returns to
/// `Uninitialized` from anywhere.
pub trait Command {
    fn state(&self) -> CommandState;

    /// Acquire the rendering container. Fails before anything is scheduled.
    fn init(&mut self, scenes: &SceneRegistry) -> GeoResult<()>;

    /// Animate from the original to the transformed state.
    fn play(&mut self, driver: &mut dyn AnimationDriver) -> GeoResult<Completion>;

    /// Draw final states immediately.
    fn direct_play(&mut self) -> GeoResult<()>;

    /// Discard shapes from an earlier play (cancelling it if still running) and play again.
    fn play_single(&mut self, driver: &mut dyn AnimationDriver) -> GeoResult<Completion>;

    /// Release every render handle and the container.
    fn clear(&mut self);
}

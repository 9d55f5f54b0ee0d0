use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::driver::TweenTarget;
use crate::expression::transform::ShapeTransform;
use crate::foundation::core::Dim;
use crate::foundation::error::{GeoError, GeoResult};
use crate::geometry::handler::ShapeState;
use crate::scene::registry::SceneRef;
use crate::scene::renderer::RenderHandle;
use crate::scene::style::StyleOptions;
use crate::transform::TransformParams;

/// Slot holding the handle of the shape currently drawn for one track.
pub(crate) type HandleSlot = Rc<RefCell<Option<RenderHandle>>>;

/// Draws one shape of a transform at each tween value, replacing the previous frame's shape.
pub(crate) struct ShapeTrack {
    pub(crate) scene: SceneRef,
    pub(crate) shape: ShapeTransform,
    pub(crate) params: TransformParams,
    pub(crate) dim: Dim,
    pub(crate) style: StyleOptions,
    pub(crate) slot: HandleSlot,
}

impl ShapeTrack {
    fn draw(&self, state: &ShapeState) -> GeoResult<()> {
        draw_state(&self.scene, &self.shape, state, &self.style, &self.slot)
    }
}

impl TweenTarget for ShapeTrack {
    fn on_tick(&mut self, value: f64) -> GeoResult<()> {
        let state = self.shape.state_at(&self.params, self.dim, value)?;
        self.draw(&state)
    }

    fn on_complete(&mut self, _value: f64) -> GeoResult<()> {
        let state = self.shape.final_state()?;
        self.draw(&state)
    }
}

/// Remove the shape in `slot` (if any) and draw `state` in its place.
pub(crate) fn draw_state(
    scene: &SceneRef,
    shape: &ShapeTransform,
    state: &ShapeState,
    style: &StyleOptions,
    slot: &HandleSlot,
) -> GeoResult<()> {
    let mut scene = scene
        .try_borrow_mut()
        .map_err(|_| GeoError::animation("scene is already borrowed"))?;
    let mut slot = slot
        .try_borrow_mut()
        .map_err(|_| GeoError::animation("render handle is already borrowed"))?;
    if let Some(prev) = slot.take() {
        scene.remove(prev);
    }
    let handle = shape.handler().create_shape(&mut *scene, state, style)?;
    *slot = Some(handle);
    Ok(())
}

/// Remove the shape in `slot`, if any.
pub(crate) fn release(scene: &SceneRef, slot: &HandleSlot) {
    let Some(handle) = slot.borrow_mut().take() else {
        return;
    };
    match scene.try_borrow_mut() {
        Ok(mut scene) => {
            scene.remove(handle);
        }
        Err(_) => tracing::warn!(handle = handle.0, "scene busy; render handle leaked"),
    }
}

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::Dim;
use crate::foundation::error::{GeoError, GeoResult};
use crate::scene::renderer::SceneRenderer;

/// Shared reference to a rendering container.
///
/// Commands acquire containers; they never own them.
pub type SceneRef = Rc<RefCell<dyn SceneRenderer>>;

enum Slot {
    /// Graph expression seen, no container attached yet.
    Declared(Dim),
    Ready(SceneRef),
}

/// Graph label to rendering container lookup.
#[derive(Default)]
pub struct SceneRegistry {
    slots: BTreeMap<String, Slot>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a graph of `dim` exists under `label` without attaching a container.
    ///
    /// Does not downgrade an already registered container.
    pub fn declare(&mut self, label: impl Into<String>, dim: Dim) {
        self.slots.entry(label.into()).or_insert(Slot::Declared(dim));
    }

    /// Attach a container under `label`, replacing any earlier slot.
    pub fn register(&mut self, label: impl Into<String>, scene: SceneRef) {
        self.slots.insert(label.into(), Slot::Ready(scene));
    }

    pub fn get(&self, label: &str) -> Option<SceneRef> {
        match self.slots.get(label) {
            Some(Slot::Ready(scene)) => Some(Rc::clone(scene)),
            _ => None,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Resolve the container a shape draws into.
    ///
    /// Fails when the shape has no graph, the graph is unknown or has no container yet, or the
    /// container dimension differs from `dim`.
    pub fn acquire(&self, label: Option<&str>, dim: Dim) -> GeoResult<SceneRef> {
        let label = label.ok_or_else(|| {
            GeoError::configuration(format!("{dim} shape is not attached to any graph"))
        })?;
        match self.slots.get(label) {
            None => Err(GeoError::configuration(format!(
                "graph `{label}` is not defined"
            ))),
            Some(Slot::Declared(_)) => Err(GeoError::configuration(format!(
                "graph `{label}` is not initialized"
            ))),
            Some(Slot::Ready(scene)) => {
                let actual = scene.borrow().dimension();
                if actual != dim {
                    return Err(GeoError::configuration(format!(
                        "graph `{label}` is a {actual} container, expected {dim}"
                    )));
                }
                Ok(Rc::clone(scene))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;

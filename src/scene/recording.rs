use std::collections::BTreeMap;

use crate::foundation::core::Dim;
use crate::foundation::error::{GeoError, GeoResult};
use crate::scene::renderer::{Primitive, RenderHandle, SceneRenderer};
use crate::scene::style::StyleOptions;

/// One change applied to a [`RecordingScene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    Added {
        handle: RenderHandle,
        primitive: Primitive,
        style: StyleOptions,
    },
    Removed {
        handle: RenderHandle,
    },
}

/// A live shape in a [`RecordingScene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LiveShape {
    pub primitive: Primitive,
    pub style: StyleOptions,
}

/// Headless [`SceneRenderer`] that keeps the live shape set and an event log.
///
/// Used by the CLI and by tests in place of a real drawing surface.
#[derive(Debug)]
pub struct RecordingScene {
    dim: Dim,
    next_handle: u64,
    live: BTreeMap<RenderHandle, LiveShape>,
    events: Vec<SceneEvent>,
    record_events: bool,
}

impl RecordingScene {
    pub fn new(dim: Dim) -> Self {
        Self {
            dim,
            next_handle: 1,
            live: BTreeMap::new(),
            events: Vec::new(),
            record_events: true,
        }
    }

    /// Keep only the live shape set; skip the per-tick event log.
    pub fn without_event_log(mut self) -> Self {
        self.record_events = false;
        self
    }

    pub fn live(&self) -> &BTreeMap<RenderHandle, LiveShape> {
        &self.live
    }

    pub fn shape(&self, handle: RenderHandle) -> Option<&LiveShape> {
        self.live.get(&handle)
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl SceneRenderer for RecordingScene {
    fn dimension(&self) -> Dim {
        self.dim
    }

    fn build(&mut self, primitive: Primitive, style: &StyleOptions) -> GeoResult<RenderHandle> {
        if self.dim == Dim::Two && matches!(primitive, Primitive::Solid { .. }) {
            return Err(GeoError::configuration(
                "solid primitives need a 3d container",
            ));
        }
        if primitive.points().iter().any(|p| !p.is_finite()) {
            return Err(GeoError::animation(format!(
                "refusing to build {} with non-finite coordinates",
                primitive.kind_name()
            )));
        }

        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        if self.record_events {
            self.events.push(SceneEvent::Added {
                handle,
                primitive: primitive.clone(),
                style: style.clone(),
            });
        }
        self.live.insert(
            handle,
            LiveShape {
                primitive,
                style: style.clone(),
            },
        );
        Ok(handle)
    }

    fn remove(&mut self, handle: RenderHandle) -> bool {
        if self.live.remove(&handle).is_none() {
            tracing::warn!(handle = handle.0, "remove of unknown render handle");
            return false;
        }
        if self.record_events {
            self.events.push(SceneEvent::Removed { handle });
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/recording.rs"]
mod tests;

use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::command::lifecycle::Timing;
use crate::foundation::core::Fps;
use crate::foundation::error::{GeoError, GeoResult};
use crate::geometry::GeometryType;
use crate::scene::style::{StyleOptions, StyleRegistry};

/// Session options, usually loaded from a JSON config file.
///
/// Missing fields take their defaults, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionOpts {
    /// Animation tick rate.
    pub fps: Fps,
    /// Length of every transform animation.
    pub duration_secs: f64,
    pub ease: Ease,
    /// Per-geometry style overrides, layered over the built-in defaults.
    pub styles: BTreeMap<GeometryType, StyleOptions>,
    /// Upper bound on frames stepped for one transform before giving up.
    pub max_frames: u64,
}

impl Default for SessionOpts {
    fn default() -> Self {
        let timing = Timing::default();
        Self {
            fps: Fps::default(),
            duration_secs: timing.duration_secs,
            ease: timing.ease,
            styles: BTreeMap::new(),
            max_frames: 100_000,
        }
    }
}

impl SessionOpts {
    pub fn from_json_str(s: &str) -> GeoResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> GeoResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(GeoError::configuration(format!(
                "duration_secs must be a finite non-negative number, got {}",
                self.duration_secs
            )));
        }
        if self.max_frames == 0 {
            return Err(GeoError::configuration("max_frames must be > 0"));
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            duration_secs: self.duration_secs,
            ease: self.ease,
        }
    }

    /// Built-in defaults with [`Self::styles`] merged in.
    pub fn style_registry(&self) -> StyleRegistry {
        self.styles
            .iter()
            .fold(StyleRegistry::default(), |reg, (ty, over)| {
                reg.with_override(*ty, over)
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;

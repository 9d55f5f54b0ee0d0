use std::collections::BTreeMap;

use crate::geometry::GeometryType;

/// Visual options for one shape. Unset fields fall back to the registry default.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl StyleOptions {
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn stroke_width(mut self, w: f64) -> Self {
        self.stroke_width = Some(w);
        self
    }

    pub fn radius(mut self, r: f64) -> Self {
        self.radius = Some(r);
        self
    }

    pub fn head(mut self, length: f64, radius: f64) -> Self {
        self.head_length = Some(length);
        self.head_radius = Some(radius);
        self
    }

    pub fn opacity(mut self, o: f64) -> Self {
        self.opacity = Some(o);
        self
    }

    /// Field-wise merge; set fields in `over` win.
    pub fn merged(&self, over: &StyleOptions) -> StyleOptions {
        StyleOptions {
            color: over.color.clone().or_else(|| self.color.clone()),
            stroke_width: over.stroke_width.or(self.stroke_width),
            radius: over.radius.or(self.radius),
            head_length: over.head_length.or(self.head_length),
            head_radius: over.head_radius.or(self.head_radius),
            opacity: over.opacity.or(self.opacity),
        }
    }
}

/// Per-geometry-type default styles.
///
/// Created with the session and passed to every command explicitly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StyleRegistry {
    defaults: BTreeMap<GeometryType, StyleOptions>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert(
            GeometryType::Line3d,
            StyleOptions::default().stroke_width(0.06).color("#000000"),
        );
        defaults.insert(
            GeometryType::Point3d,
            StyleOptions::default().radius(0.12).color("#ff0000"),
        );
        defaults.insert(
            GeometryType::Vector3d,
            StyleOptions::default()
                .stroke_width(0.05)
                .head(0.3, 0.12)
                .color("#0000ff"),
        );
        defaults.insert(
            GeometryType::Line2d,
            StyleOptions::default().stroke_width(2.0).color("black"),
        );
        defaults.insert(
            GeometryType::Point2d,
            StyleOptions::default().radius(5.0).color("red"),
        );
        defaults.insert(
            GeometryType::Vector2d,
            StyleOptions::default().stroke_width(2.0).color("blue"),
        );
        Self { defaults }
    }
}

impl StyleRegistry {
    /// Registry with no defaults at all.
    pub fn empty() -> Self {
        Self {
            defaults: BTreeMap::new(),
        }
    }

    /// Default style for `ty`, or an empty style when none is registered.
    pub fn get(&self, ty: GeometryType) -> StyleOptions {
        self.defaults.get(&ty).cloned().unwrap_or_default()
    }

    /// Merge `overrides` into the registered default for `ty`.
    pub fn with_override(mut self, ty: GeometryType, overrides: &StyleOptions) -> Self {
        let merged = self.get(ty).merged(overrides);
        self.defaults.insert(ty, merged);
        self
    }

    /// Style for one shape: the registered default merged with call-site overrides.
    pub fn resolve(&self, ty: GeometryType, call_site: Option<&StyleOptions>) -> StyleOptions {
        match call_site {
            Some(over) => self.get(ty).merged(over),
            None => self.get(ty),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/style.rs"]
mod tests;

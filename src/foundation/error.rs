/// Convenience result type used across geomotion.
pub type GeoResult<T> = Result<T, GeoError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is fatal for the diagram step that raised it. Resolution and command
/// initialization report these synchronously, before any animation is scheduled.
#[derive(thiserror::Error, Debug)]
pub enum GeoError {
    /// Missing or uninitialized rendering container, or a target of the wrong kind.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The dependents of a variable cannot be put in topological order.
    #[error("dependency cycle error: unresolved labels [{}]", labels.join(", "))]
    DependencyCycle {
        /// Labels left over after ordering, sorted.
        labels: Vec<String>,
    },

    /// Transform arguments match no recognized pattern, or the target has no geometry handler.
    #[error("argument shape error: {0}")]
    ArgumentShape(String),

    /// Errors while resolving expressions (undefined names, type mismatches).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors raised by the animation driver or the command lifecycle.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing scripts and options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeoError {
    /// Build a [`GeoError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`GeoError::DependencyCycle`] value; labels are sorted and deduplicated.
    pub fn dependency_cycle<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        labels.dedup();
        Self::DependencyCycle { labels }
    }

    /// Build a [`GeoError::ArgumentShape`] value.
    pub fn argument_shape(msg: impl Into<String>) -> Self {
        Self::ArgumentShape(msg.into())
    }

    /// Build a [`GeoError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`GeoError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GeoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GeoError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

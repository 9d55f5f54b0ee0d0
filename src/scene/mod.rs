pub(crate) mod recording;
pub(crate) mod registry;
pub(crate) mod renderer;
pub(crate) mod style;

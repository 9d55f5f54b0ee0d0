pub(crate) mod lifecycle;
pub(crate) mod track;
pub(crate) mod transform;

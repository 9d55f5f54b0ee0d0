pub(crate) mod diagram;
pub(crate) mod opts;

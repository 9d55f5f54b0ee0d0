pub(crate) mod args;
pub(crate) mod ast;
pub(crate) mod builtins;
pub(crate) mod collection;
pub(crate) mod context;
pub(crate) mod deps;
pub(crate) mod eval;
pub(crate) mod transform;
pub(crate) mod value;

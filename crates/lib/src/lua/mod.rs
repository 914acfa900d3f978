//! Embedded Lua runtime for configuration files.

pub mod globals;
pub mod patch;
pub mod recipe;
pub mod runtime;

pub use patch::LuaPatch;

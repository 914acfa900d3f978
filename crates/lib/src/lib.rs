//! devlua-lib: Core types and logic for devlua
//!
//! This crate provides the pieces of the environment pipeline:
//! - `Recipe`/`RecipeSet`: build recipes as handed over by the resolver
//! - `overlay`: the override composer that patches a base recipe set
//! - `platform`: target platform enumeration and host detection
//! - `resolver`: the lockfile-backed resolver boundary
//! - `eval`: Lua configuration evaluation and the per-platform pipeline
//! - `outputs`: package selection and dev shell export

pub mod consts;
pub mod eval;
pub mod lua;
pub mod outputs;
pub mod overlay;
pub mod platform;
pub mod recipe;
pub mod resolver;
pub mod util;

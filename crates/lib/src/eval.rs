//! Configuration file evaluation.
//!
//! This module provides `evaluate_config`, which takes a path to a Lua
//! configuration file and returns the parsed [`EnvironmentDecl`], and
//! `evaluate`, which runs the per-platform pipeline (resolve, compose,
//! export) for every target platform the declaration names.

use std::collections::BTreeMap;
use std::path::Path;

use mlua::prelude::*;
use tracing::{debug, info};

use crate::lua::patch::LuaPatch;
use crate::lua::runtime;
use crate::outputs::{self, ExportError, PlatformOutputs};
use crate::overlay::{self, ComposeError, PatchSet, RecipePatch};
use crate::platform::{ParsePlatformError, Platform};
use crate::resolver::{ResolveError, Resolver};

/// Errors that can occur during config evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  /// Lua evaluation error.
  #[error("lua error: {0}")]
  Lua(#[from] LuaError),

  /// A declared platform triple did not parse.
  #[error("platform error: {0}")]
  Platform(#[from] ParsePlatformError),

  /// The resolver could not produce a base recipe set.
  #[error("resolution error: {0}")]
  Resolution(#[from] ResolveError),

  /// An override failed during composition.
  #[error("compose error: {0}")]
  Compose(#[from] ComposeError),

  /// The application package could not be selected.
  #[error("export error: {0}")]
  Export(#[from] ExportError),
}

/// A parsed environment declaration.
///
/// ```lua
/// return {
///   package = "myapp",
///   platforms = { "x86_64-linux", "aarch64-darwin" },
///   overrides = {
///     cffi = { append = { "setuptools", "poetry" } },
///     pyyaml = function(recipe)
///       table.insert(recipe.inputs, "libyaml")
///       return recipe
///     end,
///   },
/// }
/// ```
pub struct EnvironmentDecl {
  /// The application package to select from the composed set.
  pub package: String,

  /// Declared target platforms. `None` means every supported platform; an
  /// explicitly empty list means no platform is evaluated at all.
  pub platforms: Option<Vec<Platform>>,

  /// Declared per-dependency overrides.
  pub overrides: PatchSet,
}

impl EnvironmentDecl {
  /// The platforms this declaration is evaluated for.
  pub fn target_platforms(&self) -> Vec<Platform> {
    match &self.platforms {
      Some(platforms) => platforms.clone(),
      None => Platform::supported(),
    }
  }
}

/// Evaluate a Lua configuration file and return the parsed declaration.
///
/// This function:
/// 1. Creates a new Lua runtime with the `dev` global
/// 2. Loads and executes the configuration file
/// 3. Parses the returned table into an [`EnvironmentDecl`]
///
/// Dynamic overrides keep a handle to the runtime, so they stay callable
/// after this function returns.
pub fn evaluate_config(path: &Path) -> Result<EnvironmentDecl, EvalError> {
  let lua = runtime::create_runtime()?;
  let value = runtime::load_file(&lua, path)?;

  let LuaValue::Table(config) = value else {
    return Err(LuaError::external("config must return a table with a 'package' field").into());
  };

  let package: String = config
    .get("package")
    .map_err(|_| LuaError::external("config requires a 'package' string"))?;

  let platforms = parse_platforms(&config)?;
  let overrides = parse_overrides(&lua, &config)?;

  info!(
    package = %package,
    overrides = overrides.len(),
    "evaluated configuration"
  );

  Ok(EnvironmentDecl {
    package,
    platforms,
    overrides,
  })
}

/// Run the pipeline for every target platform of the declaration.
///
/// Each platform is evaluated independently against the same declaration;
/// the first fatal error aborts the whole evaluation. An empty target set
/// yields an empty map.
pub fn evaluate(decl: &EnvironmentDecl, resolver: &dyn Resolver) -> Result<BTreeMap<Platform, PlatformOutputs>, EvalError> {
  let mut results = BTreeMap::new();

  for platform in decl.target_platforms() {
    if results.contains_key(&platform) {
      continue;
    }
    let outputs = evaluate_platform(decl, resolver, platform)?;
    results.insert(platform, outputs);
  }

  Ok(results)
}

/// Run the pipeline for a single platform: resolve, compose, export.
pub fn evaluate_platform(
  decl: &EnvironmentDecl,
  resolver: &dyn Resolver,
  platform: Platform,
) -> Result<PlatformOutputs, EvalError> {
  debug!(platform = %platform, "resolving base recipe set");
  let base = resolver.resolve(platform)?;

  let composed = overlay::compose(&base, &decl.overrides)?;
  let outputs = outputs::export(platform, composed, &decl.package)?;

  info!(
    platform = %platform,
    packages = outputs.packages.len(),
    "evaluated platform"
  );
  Ok(outputs)
}

/// Evaluate a configuration file end to end against a resolver.
pub fn evaluate_file(path: &Path, resolver: &dyn Resolver) -> Result<BTreeMap<Platform, PlatformOutputs>, EvalError> {
  let decl = evaluate_config(path)?;
  evaluate(&decl, resolver)
}

/// Parse the optional `platforms` array from the config table.
fn parse_platforms(config: &LuaTable) -> Result<Option<Vec<Platform>>, EvalError> {
  let value: LuaValue = config.get("platforms")?;
  match value {
    LuaValue::Nil => Ok(None),
    LuaValue::Table(table) => {
      let mut platforms = Vec::new();
      for entry in table.sequence_values::<String>() {
        let platform: Platform = entry?.parse()?;
        // Duplicate declarations collapse to one evaluation
        if !platforms.contains(&platform) {
          platforms.push(platform);
        }
      }
      Ok(Some(platforms))
    }
    _ => Err(LuaError::external("'platforms' must be an array of triple strings").into()),
  }
}

/// Parse the optional `overrides` table from the config table.
///
/// Each entry is one of:
/// - a function `(recipe) -> recipe`
/// - a table `{ append = { ... } }`
/// - a plain array of inputs, shorthand for the append form
fn parse_overrides(lua: &Lua, config: &LuaTable) -> Result<PatchSet, EvalError> {
  let value: LuaValue = config.get("overrides")?;
  match value {
    LuaValue::Nil => Ok(PatchSet::new()),
    LuaValue::Table(table) => {
      let mut patches = PatchSet::new();
      for pair in table.pairs::<String, LuaValue>() {
        let (name, value) = pair?;
        let patch = parse_single_override(lua, &name, value)?;
        patches.insert(name, patch);
      }
      Ok(patches)
    }
    _ => Err(LuaError::external("'overrides' must be a table").into()),
  }
}

fn parse_single_override(lua: &Lua, name: &str, value: LuaValue) -> Result<RecipePatch, EvalError> {
  match value {
    LuaValue::Function(func) => Ok(RecipePatch::Dynamic(LuaPatch::new(lua.clone(), func))),
    LuaValue::Table(table) => {
      let append: Option<LuaTable> = table.get("append")?;
      let entries = match append {
        Some(append_table) => collect_strings(&append_table)?,
        // Plain array shorthand: { "setuptools", "poetry" }
        None => collect_strings(&table)?,
      };

      if entries.is_empty() {
        return Err(
          LuaError::external(format!(
            "override '{}' must be a function, an {{ append = {{...}} }} table, or an array of inputs",
            name
          ))
          .into(),
        );
      }

      Ok(RecipePatch::Append(entries))
    }
    _ => Err(
      LuaError::external(format!(
        "override '{}' must be a function or a table, got {}",
        name,
        value.type_name()
      ))
      .into(),
    ),
  }
}

fn collect_strings(table: &LuaTable) -> LuaResult<Vec<String>> {
  let mut entries = Vec::new();
  for entry in table.sequence_values::<String>() {
    entries.push(entry?);
  }
  Ok(entries)
}

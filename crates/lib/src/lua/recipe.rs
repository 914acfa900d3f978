//! Conversions between [`Recipe`] and Lua tables.
//!
//! A recipe crosses into Lua when a dynamic override function runs, and the
//! function's return value crosses back. Metadata values round-trip through
//! [`MetaValue`] so patch functions can inspect (but normally leave alone)
//! whatever the resolver recorded.

use std::collections::BTreeMap;

use mlua::prelude::*;

use crate::recipe::{MetaValue, Recipe};

/// Build a Lua table representing a recipe.
pub fn recipe_to_lua(lua: &Lua, recipe: &Recipe) -> LuaResult<LuaTable> {
  let table = lua.create_table()?;
  table.set("name", recipe.name.as_str())?;

  if let Some(ref version) = recipe.version {
    table.set("version", version.as_str())?;
  }

  let inputs = lua.create_table()?;
  for (i, input) in recipe.inputs.iter().enumerate() {
    inputs.set(i + 1, input.as_str())?;
  }
  table.set("inputs", inputs)?;

  if !recipe.metadata.is_empty() {
    let metadata = lua.create_table()?;
    for (key, value) in &recipe.metadata {
      metadata.set(key.as_str(), meta_to_lua(lua, value)?)?;
    }
    table.set("metadata", metadata)?;
  }

  Ok(table)
}

/// Parse a recipe from the value a patch function returned.
pub fn lua_to_recipe(value: LuaValue) -> LuaResult<Recipe> {
  let LuaValue::Table(table) = value else {
    return Err(LuaError::external("override must return a recipe table"));
  };

  let name: String = table
    .get("name")
    .map_err(|_| LuaError::external("recipe table requires a 'name' string"))?;
  let version: Option<String> = table.get("version")?;

  let inputs_value: LuaValue = table.get("inputs")?;
  let inputs = match inputs_value {
    LuaValue::Nil => Vec::new(),
    LuaValue::Table(inputs_table) => {
      let mut inputs = Vec::new();
      for entry in inputs_table.sequence_values::<String>() {
        inputs.push(entry?);
      }
      inputs
    }
    _ => return Err(LuaError::external("recipe 'inputs' must be an array of strings")),
  };

  let metadata_value: LuaValue = table.get("metadata")?;
  let metadata = match metadata_value {
    LuaValue::Nil => BTreeMap::new(),
    LuaValue::Table(meta_table) => {
      let mut metadata = BTreeMap::new();
      for pair in meta_table.pairs::<String, LuaValue>() {
        let (key, value) = pair?;
        metadata.insert(key, lua_to_meta(value)?);
      }
      metadata
    }
    _ => return Err(LuaError::external("recipe 'metadata' must be a table")),
  };

  Ok(Recipe {
    name,
    version,
    inputs,
    metadata,
  })
}

fn meta_to_lua(lua: &Lua, value: &MetaValue) -> LuaResult<LuaValue> {
  match value {
    MetaValue::Boolean(b) => Ok(LuaValue::Boolean(*b)),
    MetaValue::Number(n) => Ok(LuaValue::Number(*n)),
    MetaValue::String(s) => Ok(LuaValue::String(lua.create_string(s)?)),
    MetaValue::Array(items) => {
      let table = lua.create_table()?;
      for (i, item) in items.iter().enumerate() {
        table.set(i + 1, meta_to_lua(lua, item)?)?;
      }
      Ok(LuaValue::Table(table))
    }
    MetaValue::Table(entries) => {
      let table = lua.create_table()?;
      for (key, item) in entries {
        table.set(key.as_str(), meta_to_lua(lua, item)?)?;
      }
      Ok(LuaValue::Table(table))
    }
  }
}

fn lua_to_meta(value: LuaValue) -> LuaResult<MetaValue> {
  match value {
    LuaValue::Boolean(b) => Ok(MetaValue::Boolean(b)),
    LuaValue::Integer(i) => Ok(MetaValue::Number(i as f64)),
    LuaValue::Number(n) => Ok(MetaValue::Number(n)),
    LuaValue::String(s) => Ok(MetaValue::String(s.to_str()?.to_string())),
    LuaValue::Table(table) => {
      // A table with sequence entries is an array; anything else is a map
      if table.raw_len() > 0 {
        let mut items = Vec::new();
        for entry in table.sequence_values::<LuaValue>() {
          items.push(lua_to_meta(entry?)?);
        }
        Ok(MetaValue::Array(items))
      } else {
        let mut entries = BTreeMap::new();
        for pair in table.pairs::<String, LuaValue>() {
          let (key, value) = pair?;
          entries.insert(key, lua_to_meta(value)?);
        }
        Ok(MetaValue::Table(entries))
      }
    }
    other => Err(LuaError::external(format!(
      "unsupported metadata value: {}",
      other.type_name()
    ))),
  }
}

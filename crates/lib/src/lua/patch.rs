//! Dynamic override functions declared in Lua.

use mlua::prelude::*;

use crate::lua::recipe::{lua_to_recipe, recipe_to_lua};
use crate::recipe::Recipe;

/// A Lua override function together with the runtime it belongs to.
///
/// Holding the `Lua` handle keeps the runtime alive for as long as the
/// patch can still be applied, so a declaration can outlive the evaluation
/// that produced it.
pub struct LuaPatch {
  lua: Lua,
  func: LuaFunction,
}

impl LuaPatch {
  pub fn new(lua: Lua, func: LuaFunction) -> Self {
    Self { lua, func }
  }

  /// Call the function with the recipe as a Lua table and parse the
  /// returned table back into a recipe.
  ///
  /// The function is expected to be pure; a raised error or a malformed
  /// return value propagates to the composer as a fatal patch failure.
  pub fn apply(&self, recipe: &Recipe) -> LuaResult<Recipe> {
    let table = recipe_to_lua(&self.lua, recipe)?;
    let result: LuaValue = self.func.call(table)?;
    lua_to_recipe(result)
  }
}

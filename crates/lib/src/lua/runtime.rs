use std::path::Path;

use mlua::prelude::*;

use crate::lua::globals;

/// Create a new Lua runtime environment with standard settings.
/// Registers the `dev` global table.
/// Returns the initialized Lua instance.
pub fn create_runtime() -> LuaResult<Lua> {
  let lua = Lua::new();
  globals::register_globals(&lua)?;
  Ok(lua)
}

/// Load and execute a Lua file at the given path.
/// Returns the result of the file execution.
pub fn load_file(lua: &Lua, path: &Path) -> LuaResult<LuaValue> {
  let content = std::fs::read_to_string(path)
    .map_err(|e| LuaError::external(format!("cannot read '{}': {}", path.display(), e)))?;

  lua
    .load(&content)
    .set_name(format!("@{}", path.display()))
    .eval::<LuaValue>()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn load_file_evaluates_returned_value() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("env.lua");
    fs::write(&path, "return { package = 'myapp' }").unwrap();

    let lua = create_runtime().unwrap();
    let value = load_file(&lua, &path).unwrap();

    let LuaValue::Table(table) = value else {
      panic!("expected table");
    };
    let package: String = table.get("package").unwrap();
    assert_eq!(package, "myapp");
  }

  #[test]
  fn load_file_missing_path_errors() {
    let temp = TempDir::new().unwrap();
    let lua = create_runtime().unwrap();
    let result = load_file(&lua, &temp.path().join("nope.lua"));
    assert!(result.is_err());
  }

  #[test]
  fn dev_global_is_available_to_configs() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("env.lua");
    fs::write(&path, "return dev.version").unwrap();

    let lua = create_runtime().unwrap();
    let value = load_file(&lua, &path).unwrap();

    let LuaValue::String(version) = value else {
      panic!("expected string");
    };
    assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
  }
}

//! The `dev` global table exposed to configuration files.

use mlua::prelude::*;

use crate::platform::Platform;

/// Register the `dev` global on the given runtime.
///
/// Configs can read:
/// - `dev.version` - the devlua version string
/// - `dev.platform` - `{ os, arch, triple }` for the current host, absent
///   when the host is not a supported platform
pub fn register_globals(lua: &Lua) -> LuaResult<()> {
  let dev = lua.create_table()?;
  dev.set("version", env!("CARGO_PKG_VERSION"))?;

  if let Some(platform) = Platform::current() {
    let plat = lua.create_table()?;
    plat.set("os", platform.os.as_str())?;
    plat.set("arch", platform.arch.as_str())?;
    plat.set("triple", platform.triple())?;
    dev.set("platform", plat)?;
  }

  lua.globals().set("dev", dev)?;
  Ok(())
}

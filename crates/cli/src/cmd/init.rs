//! Implementation of the `dev init` command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use devlua_lib::consts::{CONFIG_FILENAME, LOCK_FILENAME};

use crate::output;

const TEMPLATE: &str = r#"return {
  -- The application package, selected from the resolved set.
  package = "myapp",

  -- Platforms to evaluate for. Remove to target every supported platform.
  platforms = { "x86_64-linux", "aarch64-darwin" },

  -- Per-dependency build overrides. The append form adds build-time
  -- inputs to one recipe; the rest of the graph is untouched.
  overrides = {
    -- cffi = { append = { "setuptools", "poetry" } },
    -- pyyaml = function(recipe)
    --   table.insert(recipe.inputs, "libyaml")
    --   return recipe
    -- end,
  },
}
"#;

pub fn cmd_init(dir: &str) -> Result<()> {
  let dir = Path::new(dir);
  let config_path = dir.join(CONFIG_FILENAME);

  if config_path.exists() {
    bail!("{} already exists", config_path.display());
  }

  fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {}", dir.display()))?;
  fs::write(&config_path, TEMPLATE).with_context(|| format!("Failed to write {}", config_path.display()))?;

  output::print_success(&format!("created {}", config_path.display()));
  output::print_info(&format!(
    "add a {} with pinned recipe sets, then run `dev show`",
    LOCK_FILENAME
  ));
  Ok(())
}

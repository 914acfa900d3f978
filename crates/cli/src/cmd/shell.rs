//! Implementation of the `dev shell` command.
//!
//! Evaluates a single platform (default: the current host) and prints the
//! resulting development shell.

use std::path::Path;

use anyhow::{Context, Result};
use devlua_lib::eval::{evaluate_config, evaluate_platform};
use devlua_lib::platform::Platform;
use devlua_lib::resolver::lock::LockedResolver;

use crate::output::{self, OutputFormat};

pub fn cmd_shell(config: &str, platform: Option<&str>, format: OutputFormat) -> Result<()> {
  let target = match platform {
    Some(triple) => triple.parse::<Platform>()?,
    None => Platform::current().context("current platform is not supported; pass --platform")?,
  };

  let path = Path::new(config);
  let config_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

  let decl = evaluate_config(path).with_context(|| format!("Failed to evaluate config: {}", config))?;
  let resolver = LockedResolver::from_dir(config_dir)?;
  let outputs = evaluate_platform(&decl, &resolver, target)
    .with_context(|| format!("Evaluation failed for {}", target))?;

  if format.is_json() {
    return output::print_json(&outputs.shell);
  }

  output::print_info(&format!("dev shell for {}", target));
  output::print_stat("name", &outputs.shell.name);
  output::print_stat("inputs", &outputs.shell.inputs.join(", "));
  Ok(())
}

//! Implementation of the `dev show` command.
//!
//! Evaluates the configuration for every declared platform and prints the
//! resulting outputs: final package set, the application package, which
//! entries were overridden, and the dev shell.

use std::path::Path;

use anyhow::{Context, Result};
use devlua_lib::eval::{evaluate, evaluate_config};
use devlua_lib::resolver::lock::LockedResolver;
use devlua_lib::util::hash::Hashable;

use crate::output::{self, OutputFormat};

pub fn cmd_show(config: &str, format: OutputFormat) -> Result<()> {
  let path = Path::new(config);
  let config_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

  let decl = evaluate_config(path).with_context(|| format!("Failed to evaluate config: {}", config))?;
  let resolver = LockedResolver::from_dir(config_dir)?;
  let results = evaluate(&decl, &resolver).context("Evaluation failed")?;

  if format.is_json() {
    return output::print_json(&results);
  }

  if results.is_empty() {
    output::print_info("no platforms declared, nothing to evaluate");
    return Ok(());
  }

  for (platform, outputs) in &results {
    let hash = outputs.compute_hash().context("Failed to hash outputs")?;
    println!("{} ({})", platform, hash);

    output::print_stat("packages", &outputs.packages.len().to_string());

    let overridden: Vec<&str> = decl
      .overrides
      .keys()
      .filter(|name| outputs.packages.contains_key(*name))
      .map(String::as_str)
      .collect();
    if !overridden.is_empty() {
      output::print_stat("overridden", &overridden.join(", "));
    }

    let package = match outputs.package.version {
      Some(ref version) => format!("{} {}", outputs.package.name, version),
      None => outputs.package.name.clone(),
    };
    output::print_stat("package", &package);
    output::print_stat(
      "shell",
      &format!(
        "{} {} {}",
        outputs.shell.name,
        output::symbols::ARROW,
        outputs.shell.inputs.join(", ")
      ),
    );
    println!();
  }

  output::print_success(&format!("evaluated {} platform(s)", results.len()));
  Ok(())
}

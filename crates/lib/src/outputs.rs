//! Package selection and development shell export.
//!
//! The final step of a platform's evaluation: pick the configured
//! application package out of the composed recipe set and wrap it in the
//! exported outputs. This step has no decision logic beyond the lookup; a
//! missing package is fatal so an under-patched or absent package is never
//! silently exported.

use serde::Serialize;
use tracing::debug;

use crate::platform::Platform;
use crate::recipe::{Recipe, RecipeSet};
use crate::util::hash::Hashable;

/// Errors surfaced while exporting outputs.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
  /// The configured application package is not in the resolved set.
  #[error("package '{name}' is not in the resolved set for {platform}")]
  UnknownPackage { name: String, platform: Platform },
}

/// A development shell whose only declared input is the application package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevShell {
  /// Shell name, derived from the package name.
  pub name: String,
  /// Declared inputs; always exactly the application package.
  pub inputs: Vec<String>,
}

impl DevShell {
  pub fn for_package(package: &Recipe) -> Self {
    Self {
      name: format!("{}-shell", package.name),
      inputs: vec![package.name.clone()],
    }
  }
}

/// Everything one platform's evaluation exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformOutputs {
  /// The platform this evaluation was for.
  pub platform: Platform,
  /// The final (composed) recipe set.
  pub packages: RecipeSet,
  /// The selected application package, re-exposed unchanged.
  pub package: Recipe,
  /// The development shell built around the application package.
  pub shell: DevShell,
}

impl Hashable for PlatformOutputs {}

/// Select `package_name` from the composed set and build the outputs.
pub fn export(platform: Platform, packages: RecipeSet, package_name: &str) -> Result<PlatformOutputs, ExportError> {
  let package = packages.get(package_name).cloned().ok_or_else(|| ExportError::UnknownPackage {
    name: package_name.to_string(),
    platform,
  })?;

  let shell = DevShell::for_package(&package);
  debug!(platform = %platform, package = %package.name, shell = %shell.name, "exported outputs");

  Ok(PlatformOutputs {
    platform,
    packages,
    package,
    shell,
  })
}

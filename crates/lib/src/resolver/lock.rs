//! Lock file management.
//!
//! The lock file (`devlua.lock`) is the pinned output of the external
//! resolver: one recipe set per target platform. It lives next to the
//! configuration file and is the only source of base recipe sets in this
//! implementation.
//!
//! # Lock File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "platforms": {
//!     "x86_64-linux": {
//!       "cffi": {
//!         "name": "cffi",
//!         "version": "2.0.1",
//!         "inputs": ["libffi"]
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::LOCK_FILENAME;
use crate::platform::Platform;
use crate::recipe::RecipeSet;
use crate::resolver::{ResolveError, Resolver};

/// Current lock file format version.
pub const LOCK_VERSION: u32 = 1;

/// A lock file containing pinned recipe sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockFile {
  /// Lock file format version.
  pub version: u32,
  /// Pinned recipe sets, keyed by platform triple.
  pub platforms: BTreeMap<Platform, RecipeSet>,
}

/// Errors that can occur when working with lock files.
#[derive(Debug, Error)]
pub enum LockError {
  /// Failed to read the lock file.
  #[error("failed to read lock file: {0}")]
  Read(#[source] io::Error),

  /// Failed to write the lock file.
  #[error("failed to write lock file: {0}")]
  Write(#[source] io::Error),

  /// Failed to parse the lock file JSON.
  #[error("failed to parse lock file: {0}")]
  Parse(#[source] serde_json::Error),

  /// Failed to serialize the lock file.
  #[error("failed to serialize lock file: {0}")]
  Serialize(#[source] serde_json::Error),

  /// Lock file version is not supported.
  #[error("unsupported lock file version {0}, expected {LOCK_VERSION}")]
  UnsupportedVersion(u32),

  /// A recipe is stored under a key that does not match its name.
  #[error("recipe under key '{key}' for {platform} is named '{name}'")]
  RecipeNameMismatch {
    platform: Platform,
    key: String,
    name: String,
  },
}

impl Default for LockFile {
  fn default() -> Self {
    Self::new()
  }
}

impl LockFile {
  /// Create a new empty lock file.
  pub fn new() -> Self {
    Self {
      version: LOCK_VERSION,
      platforms: BTreeMap::new(),
    }
  }

  /// Load a lock file from the given path.
  ///
  /// Returns `Ok(None)` if the file doesn't exist.
  /// Returns `Ok(Some(lock))` if the file exists and was parsed successfully.
  /// Returns `Err` if the file exists but couldn't be read or parsed.
  pub fn load(path: &Path) -> Result<Option<Self>, LockError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(LockError::Read(e)),
    };

    let lock: LockFile = serde_json::from_str(&content).map_err(LockError::Parse)?;

    if lock.version != LOCK_VERSION {
      return Err(LockError::UnsupportedVersion(lock.version));
    }

    lock.validate()?;
    Ok(Some(lock))
  }

  /// Save the lock file to the given path.
  ///
  /// The file is written with pretty-printed JSON for readability.
  pub fn save(&self, path: &Path) -> Result<(), LockError> {
    let content = serde_json::to_string_pretty(self).map_err(LockError::Serialize)?;
    fs::write(path, content).map_err(LockError::Write)?;
    Ok(())
  }

  /// Get the pinned recipe set for a platform.
  pub fn get(&self, platform: Platform) -> Option<&RecipeSet> {
    self.platforms.get(&platform)
  }

  /// Insert or replace the pinned recipe set for a platform.
  pub fn insert(&mut self, platform: Platform, recipes: RecipeSet) {
    self.platforms.insert(platform, recipes);
  }

  fn validate(&self) -> Result<(), LockError> {
    for (platform, recipes) in &self.platforms {
      for (key, recipe) in recipes {
        if *key != recipe.name {
          return Err(LockError::RecipeNameMismatch {
            platform: *platform,
            key: key.clone(),
            name: recipe.name.clone(),
          });
        }
      }
    }
    Ok(())
  }
}

/// A resolver backed by a loaded lock file.
pub struct LockedResolver {
  lock: LockFile,
}

impl LockedResolver {
  /// Wrap an already-loaded lock file.
  pub fn new(lock: LockFile) -> Self {
    Self { lock }
  }

  /// Load `devlua.lock` from the given config directory.
  ///
  /// A missing lock file is a resolution failure: without pinned state
  /// there is nothing to evaluate against.
  pub fn from_dir(config_dir: &Path) -> Result<Self, ResolveError> {
    let path = config_dir.join(LOCK_FILENAME);
    let lock = LockFile::load(&path)?.ok_or_else(|| ResolveError::MissingLock(path.clone()))?;
    debug!(path = %path.display(), platforms = lock.platforms.len(), "loaded lock file");
    Ok(Self::new(lock))
  }
}

impl Resolver for LockedResolver {
  fn resolve(&self, platform: Platform) -> Result<RecipeSet, ResolveError> {
    self
      .lock
      .get(platform)
      .cloned()
      .ok_or(ResolveError::UnsupportedPlatform(platform))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::recipe::Recipe;
  use tempfile::TempDir;

  fn linux() -> Platform {
    "x86_64-linux".parse().unwrap()
  }

  fn sample_lock() -> LockFile {
    let mut recipes = RecipeSet::new();
    recipes.insert(
      "cffi".to_string(),
      Recipe::new("cffi").with_version("2.0.1").with_inputs(["libffi"]),
    );
    recipes.insert("myapp".to_string(), Recipe::new("myapp").with_inputs(["cffi"]));

    let mut lock = LockFile::new();
    lock.insert(linux(), recipes);
    lock
  }

  mod lock_file {
    use super::*;

    #[test]
    fn insert_and_get() {
      let lock = sample_lock();
      let recipes = lock.get(linux()).unwrap();
      assert_eq!(recipes["cffi"].version.as_deref(), Some("2.0.1"));
    }

    #[test]
    fn save_and_load_roundtrip() {
      let temp_dir = TempDir::new().unwrap();
      let lock_path = temp_dir.path().join(LOCK_FILENAME);

      let original = sample_lock();
      original.save(&lock_path).unwrap();
      let loaded = LockFile::load(&lock_path).unwrap().unwrap();

      assert_eq!(original, loaded);
    }

    #[test]
    fn load_nonexistent_returns_none() {
      let temp_dir = TempDir::new().unwrap();
      let lock_path = temp_dir.path().join("nonexistent.lock");

      let result = LockFile::load(&lock_path).unwrap();
      assert!(result.is_none());
    }

    #[test]
    fn load_invalid_json_returns_error() {
      let temp_dir = TempDir::new().unwrap();
      let lock_path = temp_dir.path().join(LOCK_FILENAME);

      fs::write(&lock_path, "not valid json").unwrap();
      let result = LockFile::load(&lock_path);

      assert!(matches!(result, Err(LockError::Parse(_))));
    }

    #[test]
    fn load_unsupported_version_returns_error() {
      let temp_dir = TempDir::new().unwrap();
      let lock_path = temp_dir.path().join(LOCK_FILENAME);

      fs::write(&lock_path, r#"{"version": 999, "platforms": {}}"#).unwrap();
      let result = LockFile::load(&lock_path);

      assert!(matches!(result, Err(LockError::UnsupportedVersion(999))));
    }

    #[test]
    fn load_rejects_mismatched_recipe_name() {
      let temp_dir = TempDir::new().unwrap();
      let lock_path = temp_dir.path().join(LOCK_FILENAME);

      fs::write(
        &lock_path,
        r#"{
          "version": 1,
          "platforms": {
            "x86_64-linux": {
              "cffi": { "name": "pyyaml" }
            }
          }
        }"#,
      )
      .unwrap();

      let result = LockFile::load(&lock_path);
      assert!(matches!(
        result,
        Err(LockError::RecipeNameMismatch { ref key, ref name, .. }) if key == "cffi" && name == "pyyaml"
      ));
    }

    #[test]
    fn load_rejects_bad_platform_key() {
      let temp_dir = TempDir::new().unwrap();
      let lock_path = temp_dir.path().join(LOCK_FILENAME);

      fs::write(&lock_path, r#"{"version": 1, "platforms": {"mips-plan9": {}}}"#).unwrap();
      let result = LockFile::load(&lock_path);

      assert!(matches!(result, Err(LockError::Parse(_))));
    }
  }

  mod locked_resolver {
    use super::*;

    #[test]
    fn resolve_returns_pinned_set() {
      let resolver = LockedResolver::new(sample_lock());
      let recipes = resolver.resolve(linux()).unwrap();

      assert_eq!(recipes.len(), 2);
      assert!(recipes.contains_key("myapp"));
    }

    #[test]
    fn resolve_unknown_platform_fails() {
      let resolver = LockedResolver::new(sample_lock());
      let result = resolver.resolve("aarch64-darwin".parse().unwrap());

      assert!(matches!(result, Err(ResolveError::UnsupportedPlatform(_))));
    }

    #[test]
    fn from_dir_requires_lock_file() {
      let temp_dir = TempDir::new().unwrap();
      let result = LockedResolver::from_dir(temp_dir.path());

      assert!(matches!(result, Err(ResolveError::MissingLock(_))));
    }

    #[test]
    fn from_dir_loads_saved_lock() {
      let temp_dir = TempDir::new().unwrap();
      sample_lock().save(&temp_dir.path().join(LOCK_FILENAME)).unwrap();

      let resolver = LockedResolver::from_dir(temp_dir.path()).unwrap();
      assert!(resolver.resolve(linux()).is_ok());
    }
  }
}

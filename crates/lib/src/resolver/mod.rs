//! The dependency resolver boundary.
//!
//! devlua never resolves dependency versions itself; it consumes the output
//! of an external resolver keyed by a lock file. The [`Resolver`] trait is
//! that boundary: given a target platform it hands back the base recipe set
//! for it, or a fatal resolution failure.

pub mod lock;

use std::path::PathBuf;

use crate::platform::Platform;
use crate::recipe::RecipeSet;
use lock::LockError;

/// Produces the base recipe set for a target platform.
///
/// Implementations must be pure with respect to their pinned state: the
/// same platform always yields the same recipe set. Any fetching needed to
/// materialize that state happens outside this trait.
pub trait Resolver {
  fn resolve(&self, platform: Platform) -> Result<RecipeSet, ResolveError>;
}

/// Errors surfaced while producing a base recipe set.
///
/// All variants are fatal; there is no retry and no partial result.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
  /// The lock file could not be read or parsed.
  #[error("lock file error: {0}")]
  Lock(#[from] LockError),

  /// No lock file exists where one was expected.
  #[error("no lock file found at {}", .0.display())]
  MissingLock(PathBuf),

  /// The pinned state has no recipe set for the requested platform.
  #[error("no pinned recipe set for platform {0}")]
  UnsupportedPlatform(Platform),
}

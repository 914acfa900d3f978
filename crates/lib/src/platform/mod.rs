pub mod arch;
pub mod os;

use std::fmt;
use std::str::FromStr;

use arch::Arch;
use os::Os;
use serde::{Deserialize, Serialize};

/// Platform identifier combining architecture and OS (e.g., "aarch64-darwin")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

/// Error parsing a platform triple string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid platform triple '{0}', expected '<arch>-<os>' (e.g. 'x86_64-linux')")]
pub struct ParsePlatformError(pub String);

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// The full set of platforms a configuration is evaluated for when it
  /// does not restrict the set itself.
  ///
  /// The set is finite, duplicate-free, and in canonical order. Each entry
  /// triggers one fully independent evaluation of the pipeline.
  pub fn supported() -> Vec<Self> {
    let mut platforms = Vec::new();
    for os in Os::ALL {
      for arch in Arch::ALL {
        platforms.push(Self::new(arch, os));
      }
    }
    platforms
  }

  /// Returns the platform triple string (e.g., "aarch64-darwin")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl FromStr for Platform {
  type Err = ParsePlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (arch_str, os_str) = s.split_once('-').ok_or_else(|| ParsePlatformError(s.to_string()))?;
    let arch = Arch::parse(arch_str).ok_or_else(|| ParsePlatformError(s.to_string()))?;
    let os = Os::parse(os_str).ok_or_else(|| ParsePlatformError(s.to_string()))?;
    Ok(Self::new(arch, os))
  }
}

impl TryFrom<String> for Platform {
  type Error = ParsePlatformError;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl From<Platform> for String {
  fn from(platform: Platform) -> String {
    platform.triple()
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

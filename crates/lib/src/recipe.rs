//! Recipe types.
//!
//! A [`Recipe`] is the build description for one dependency as produced by
//! the external resolver: a name, an ordered list of build-time inputs, and
//! metadata the rest of the system treats as opaque. A [`RecipeSet`] maps
//! dependency names to recipes; keys are unique and sorted so evaluation is
//! independent of insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::util::hash::Hashable;

/// Map of dependency names to their recipes.
pub type RecipeSet = BTreeMap<String, Recipe>;

/// The build description for one dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
  /// Dependency name; matches the key under which the recipe is stored.
  pub name: String,

  /// Resolved version, if the resolver provides one.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,

  /// Ordered build-time inputs (tool/library references).
  #[serde(default)]
  pub inputs: Vec<String>,

  /// Resolver-provided build metadata, opaque to the composer.
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub metadata: BTreeMap<String, MetaValue>,
}

impl Recipe {
  /// Create a new recipe with no inputs and no metadata.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      version: None,
      inputs: Vec::new(),
      metadata: BTreeMap::new(),
    }
  }

  /// Set the version.
  pub fn with_version(mut self, version: &str) -> Self {
    self.version = Some(version.to_string());
    self
  }

  /// Set the build-time inputs.
  pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.inputs = inputs.into_iter().map(Into::into).collect();
    self
  }

  /// Return a copy of this recipe with `extra` appended to its inputs.
  ///
  /// Existing entries are never removed or reordered; the appended entries
  /// keep their given order. No deduplication is performed.
  pub fn append_inputs(&self, extra: &[String]) -> Self {
    let mut patched = self.clone();
    patched.inputs.extend(extra.iter().cloned());
    patched
  }
}

impl Hashable for Recipe {}

/// A JSON-like metadata value.
///
/// Recipes carry whatever extra build metadata the resolver emitted; the
/// composer never inspects it, but it must round-trip through the lock file
/// and into Lua patch functions unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
  Boolean(bool),
  Number(f64),
  String(String),
  Array(Vec<MetaValue>),
  Table(BTreeMap<String, MetaValue>),
}

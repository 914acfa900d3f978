//! The override composer.
//!
//! `compose` takes the base recipe set produced by the resolver and a set of
//! declared per-dependency patches, and returns the final recipe set. This
//! is the only decision logic in the pipeline and it is a pure function of
//! its two arguments: same inputs always produce the same output, and the
//! result has exactly the key set of the base.

use std::collections::BTreeMap;

use tracing::debug;

use crate::lua::patch::LuaPatch;
use crate::recipe::{Recipe, RecipeSet};

/// Map of dependency names to the patch declared for them.
pub type PatchSet = BTreeMap<String, RecipePatch>;

/// A patch applied to a single recipe.
pub enum RecipePatch {
  /// Append a fixed set of entries to the recipe's build-time inputs.
  ///
  /// Existing entries are never removed or reordered, and the appended
  /// entries are not deduplicated.
  Append(Vec<String>),

  /// A Lua function `(recipe) -> recipe`, for overrides the static form
  /// cannot express.
  Dynamic(LuaPatch),
}

impl RecipePatch {
  /// Convenience constructor for the static append form.
  pub fn append<I, S>(entries: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::Append(entries.into_iter().map(Into::into).collect())
  }

  fn apply(&self, recipe: &Recipe) -> mlua::Result<Recipe> {
    match self {
      Self::Append(extra) => Ok(recipe.append_inputs(extra)),
      Self::Dynamic(patch) => patch.apply(recipe),
    }
  }
}

/// Errors surfaced while composing overrides.
///
/// The composer itself never fails; both variants originate from a patch
/// misbehaving. Any error aborts the whole per-platform evaluation; no
/// partial recipe set is produced.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
  /// A patch failed on the recipe it was given.
  #[error("override for '{name}' failed: {message}")]
  PatchFailed { name: String, message: String },

  /// A patch renamed the recipe it transformed, which would change the
  /// key set of the result.
  #[error("override for '{name}' renamed the recipe to '{renamed}'")]
  PatchRenamed { name: String, renamed: String },
}

/// Apply `patches` to `base`, producing the final recipe set.
///
/// For every `(name, recipe)` in `base`: if `name` has a patch, the result
/// entry is the patched recipe; otherwise the recipe is carried over
/// unchanged. Patch keys absent from `base` are silent no-ops, so patch
/// declarations do not have to track the exact resolver output.
pub fn compose(base: &RecipeSet, patches: &PatchSet) -> Result<RecipeSet, ComposeError> {
  let mut result = RecipeSet::new();

  for (name, recipe) in base {
    let entry = match patches.get(name) {
      Some(patch) => {
        let patched = patch.apply(recipe).map_err(|e| ComposeError::PatchFailed {
          name: name.clone(),
          message: e.to_string(),
        })?;

        if patched.name != recipe.name {
          return Err(ComposeError::PatchRenamed {
            name: name.clone(),
            renamed: patched.name,
          });
        }

        debug!(package = %name, inputs = patched.inputs.len(), "applied override");
        patched
      }
      None => recipe.clone(),
    };

    result.insert(name.clone(), entry);
  }

  for name in patches.keys() {
    if !base.contains_key(name) {
      debug!(package = %name, "override target not in base set, skipping");
    }
  }

  Ok(result)
}

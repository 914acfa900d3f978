//! Shared constants.

/// Default configuration file name.
pub const CONFIG_FILENAME: &str = "env.lua";

/// Lock file name, expected next to the configuration file.
pub const LOCK_FILENAME: &str = "devlua.lock";

/// Truncation length for object hashes.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

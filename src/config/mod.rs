//! Configuration-backed flag defaults.
//!
//! A single YAML (or JSON) document supplies default values for command-line
//! flags. Values are addressed by the command path a flag was declared under,
//! with fallback to less specific scopes:
//!
//! ```yaml
//! format: json          # --format everywhere
//! db: /var/lib/ops.db   # --db for every command that has one
//! base58:
//!   encode:
//!     version-byte: 0   # --version-byte for `base58 encode` only
//! ```
//!
//! Once a command's own mapping is reached, a flag missing from it is not
//! looked up in wider scopes: with `base58: {encode: {}}` in the document,
//! `base58 encode` gets no defaults at all.
//!
//! ## Discovery
//! 1. `--config <PATH>` or `OPS_DEBUG_CONFIG`
//! 2. `./ops-debug.yaml`
//! 3. `~/.ops-debug/config.yaml`
//!
//! The first existing file wins; files are not merged.

mod defaults;
mod loader;
mod resolver;

pub use crate::error::ConfigError;
pub use defaults::{AppliedDefault, apply_config_defaults};
pub use loader::{CONFIG_ENV_VAR, ConfigLoader, ConfigPaths, ConfigTier, PROJECT_CONFIG_FILE};
pub use resolver::{ConfigDocument, ConfigResolver, Resolution};

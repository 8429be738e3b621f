//! Configuration file discovery and loading.

use super::resolver::ConfigResolver;
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "OPS_DEBUG_CONFIG";

/// Configuration file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "ops-debug.yaml";

/// Where a configuration file was found (lowest to highest priority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// User-level config (~/.ops-debug/config.yaml)
    User = 0,
    /// Project-level config ($CWD/ops-debug.yaml)
    Project = 1,
    /// Named with --config or OPS_DEBUG_CONFIG
    Explicit = 2,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::Explicit => write!(f, "explicit"),
        }
    }
}

/// Candidate configuration files for discovery.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project-level config file
    pub project_file: Option<PathBuf>,
    /// User-level config file
    pub user_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover the default candidate locations.
    pub fn discover() -> Self {
        Self {
            project_file: Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            user_file: dirs::home_dir().map(|h| h.join(".ops-debug").join("config.yaml")),
        }
    }

    /// Create paths with explicit files.
    pub fn with_files(project_file: Option<PathBuf>, user_file: Option<PathBuf>) -> Self {
        Self {
            project_file,
            user_file,
        }
    }

    /// Candidates in lookup order.
    fn candidates(&self) -> impl Iterator<Item = (ConfigTier, &Path)> {
        [
            (ConfigTier::Project, self.project_file.as_deref()),
            (ConfigTier::User, self.user_file.as_deref()),
        ]
        .into_iter()
        .filter_map(|(tier, path)| path.map(|p| (tier, p)))
    }
}

/// Loaded configuration together with where it came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    resolver: ConfigResolver,
    source: Option<(PathBuf, ConfigTier)>,
}

impl ConfigLoader {
    /// Load the explicit file if given, otherwise the first discovered one.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with_paths(explicit, &ConfigPaths::discover())
    }

    /// Load with explicit discovery candidates.
    ///
    /// A named file must exist. Decode failures are never downgraded to
    /// an empty configuration.
    pub fn load_with_paths(explicit: Option<&Path>, paths: &ConfigPaths) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            return Self::load_file(path, ConfigTier::Explicit);
        }

        for (tier, path) in paths.candidates() {
            if path.is_file() {
                return Self::load_file(path, tier);
            }
        }

        Ok(Self::default())
    }

    fn load_file(path: &Path, tier: ConfigTier) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed opening config file: {}", path.display()))?;
        let resolver = ConfigResolver::load(BufReader::new(file))
            .with_context(|| format!("Failed loading config file: {}", path.display()))?;

        Ok(Self {
            resolver,
            source: Some((path.to_path_buf(), tier)),
        })
    }

    /// Get the loaded resolver.
    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Consume the loader and return the resolver.
    pub fn into_resolver(self) -> ConfigResolver {
        self.resolver
    }

    /// Get the config file that was used and the tier it came from.
    pub fn source(&self) -> Option<(&Path, ConfigTier)> {
        self.source.as_ref().map(|(path, tier)| (path.as_path(), *tier))
    }

    /// Get the config file path that was used.
    pub fn config_path(&self) -> Option<&Path> {
        self.source().map(|(path, _)| path)
    }

    /// Get the tier the config file came from.
    pub fn tier(&self) -> Option<ConfigTier> {
        self.source().map(|(_, tier)| tier)
    }
}

//! Configuration loading and parsing for `relman.toml` files.
//!
//! Projects choose a versioning strategy and a release branch prefix; both
//! have defaults so the file is optional.
use clap::ValueEnum;
use log::*;
use serde::Deserialize;
use std::{fmt, path::Path};

use crate::error::Result;

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "relman.toml";

/// Default branch name prefix for release branches.
pub const DEFAULT_RELEASE_BRANCH_PREFIX: &str = "rc/";

/// Supported versioning strategies for release tags.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VersioningStrategy {
    /// Semantic versions, e.g. "1.2.3".
    #[default]
    Semver,
    /// Calendar versions, e.g. "2021.01.01_0".
    Calver,
}

impl fmt::Display for VersioningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersioningStrategy::Semver => write!(f, "semver"),
            VersioningStrategy::Calver => write!(f, "calver"),
        }
    }
}

/// Project configuration for release workflows.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct Config {
    /// Versioning strategy used when parsing and generating release tags.
    pub versioning_strategy: VersioningStrategy,
    /// Branch name prefix for release branches (default: "rc/").
    pub release_branch_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            versioning_strategy: VersioningStrategy::Semver,
            release_branch_prefix: DEFAULT_RELEASE_BRANCH_PREFIX.to_string(),
        }
    }
}

/// Load configuration from `relman.toml` in the given directory, falling
/// back to defaults when the file is missing.
pub fn load_config(dir: &Path) -> Result<Config> {
    let path = dir.join(DEFAULT_CONFIG_FILE);

    if !path.exists() {
        info!("no configuration found: using default");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_semver_strategy() {
        let config = Config::default();
        assert_eq!(config.versioning_strategy, VersioningStrategy::Semver);
        assert_eq!(config.release_branch_prefix, "rc/");
    }

    #[test]
    fn loads_default_when_file_missing() {
        let temp_dir = tempfile::tempdir().unwrap();

        let config = load_config(temp_dir.path()).unwrap();
        assert_eq!(config.versioning_strategy, VersioningStrategy::Semver);
    }

    #[test]
    fn loads_config_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "versioning_strategy = \"calver\"\nrelease_branch_prefix = \"release/\"\n",
        )
        .unwrap();

        let config = load_config(temp_dir.path()).unwrap();
        assert_eq!(config.versioning_strategy, VersioningStrategy::Calver);
        assert_eq!(config.release_branch_prefix, "release/");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "versioning_strategy = \"calver\"\n").unwrap();

        let config = load_config(temp_dir.path()).unwrap();
        assert_eq!(config.versioning_strategy, VersioningStrategy::Calver);
        assert_eq!(config.release_branch_prefix, "rc/");
    }

    #[test]
    fn rejects_unknown_strategy() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "versioning_strategy = \"chaosver\"\n").unwrap();

        let result = load_config(temp_dir.path());
        assert!(result.is_err());
    }
}

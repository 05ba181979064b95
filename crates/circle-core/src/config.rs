//! Runtime configuration.
//!
//! Read from `.circle/config.json` in the working directory when present.
//! Every field has a default, so a partial file is fine.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding Circle's per-project files.
pub const CONFIG_DIR: &str = ".circle";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset used when no path is given on the command line.
    pub dataset: Option<PathBuf>,

    /// Maximum number of entities a dataset may hold.
    pub capacity: usize,

    /// Maximum number of peer ids kept per entity.
    pub max_peers: usize,

    /// Rows and columns shown from the distance table.
    pub display_limit: usize,

    /// Recommendations shown per query.
    pub recommendation_limit: usize,

    /// Deepest level rendered in connection trees.
    pub tree_depth: usize,

    /// Children rendered per connection tree node.
    pub tree_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            capacity: 500,
            max_peers: 50,
            display_limit: 20,
            recommendation_limit: 5,
            tree_depth: 3,
            tree_width: 3,
        }
    }
}

impl Config {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Reads `<dir>/.circle/config.json`, or returns defaults if it is missing.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(dir);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes this config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Location of the config file for a project directory.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discover_missing_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.capacity, 500);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = Config::path_in(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "capacity": 12, "dataset": "people.csv" }"#).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.capacity, 12);
        assert_eq!(config.dataset, Some(PathBuf::from("people.csv")));
        assert_eq!(config.max_peers, 50);
        assert_eq!(config.recommendation_limit, 5);
    }

    #[test]
    fn test_save_then_discover() {
        let dir = tempdir().unwrap();
        let config = Config {
            tree_width: 2,
            ..Config::default()
        };
        config.save(&Config::path_in(dir.path())).unwrap();

        assert_eq!(Config::discover(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ capacity: ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Json(_))));
    }
}

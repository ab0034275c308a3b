//! Project configuration stored in `.itemgraph/config.json`.

use itemgraph_core::{read_json, write_json};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".itemgraph";
pub const CONFIG_FILE: &str = "config.json";

/// Input and output locations. Relative paths are relative to the project
/// root, the directory holding `.itemgraph/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub items: PathBuf,
    pub traders: PathBuf,
    pub output: PathBuf,
    /// Applied only when the file exists.
    pub corrections: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items: PathBuf::from("data/items_database.json"),
            traders: PathBuf::from("data/traders_database.json"),
            output: PathBuf::from("data/items_relation.json"),
            corrections: PathBuf::from("data/corrections.json"),
        }
    }
}

impl Config {
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Loads the config under `root`, or the defaults if there is none,
    /// with every path resolved against `root`.
    pub fn load(root: &Path) -> itemgraph_core::Result<Self> {
        let path = Self::path(root);
        let config = if path.exists() {
            read_json(&path)?
        } else {
            Self::default()
        };
        Ok(config.resolved(root))
    }

    /// Writes the default config. Returns false if one already exists.
    pub fn init(root: &Path) -> itemgraph_core::Result<bool> {
        let path = Self::path(root);
        if path.exists() {
            return Ok(false);
        }
        write_json(&path, &Self::default())?;
        Ok(true)
    }

    fn resolved(self, root: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                root.join(path)
            }
        };
        Self {
            items: resolve(self.items),
            traders: resolve(self.traders),
            output: resolve(self.output),
            corrections: resolve(self.corrections),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.items, dir.path().join("data/items_database.json"));
        assert_eq!(config.output, dir.path().join("data/items_relation.json"));
    }

    #[test]
    fn test_init_then_load() {
        let dir = tempdir().unwrap();

        assert!(Config::init(dir.path()).unwrap());
        assert!(!Config::init(dir.path()).unwrap());
        assert!(Config::path(dir.path()).exists());

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.traders, dir.path().join("data/traders_database.json"));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        fs::write(
            Config::path(dir.path()),
            r#"{"items": "raw/items.json", "output": "/tmp/graph.json"}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.items, dir.path().join("raw/items.json"));
        assert_eq!(config.output, PathBuf::from("/tmp/graph.json"));
        assert_eq!(config.corrections, dir.path().join("data/corrections.json"));
    }
}

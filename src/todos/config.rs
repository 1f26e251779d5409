//! # Configuration
//!
//! Stored as `config.json` in the data directory. Missing keys fall back to
//! their defaults, and a missing file means all defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `collection` | `todos` | List used when `--list` is not given |
//! | `color` | `auto` | `auto`, `always` or `never` |

use crate::error::{Result, TodoError};
use crate::store::fs_backend::validate_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_COLLECTION: &str = "todos";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Whether to emit ANSI styles, given whether stdout is a terminal.
    pub fn use_color(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        };
        f.write_str(s)
    }
}

impl FromStr for ColorChoice {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(TodoError::Config(format!(
                "Invalid color choice: {} (expected auto, always or never)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodosConfig {
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default)]
    pub color: ColorChoice,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for TodosConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            color: ColorChoice::default(),
        }
    }
}

impl TodosConfig {
    pub const KEYS: &'static [&'static str] = &["collection", "color"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodoError::Io)?;
        let config: TodosConfig =
            serde_json::from_str(&content).map_err(TodoError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodoError::Serialization)?;
        fs::write(config_path, content).map_err(TodoError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "collection" => Ok(self.collection.clone()),
            "color" => Ok(self.color.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "collection" => {
                validate_key(value)?;
                self.collection = value.to_string();
            }
            "color" => self.color = value.parse()?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> TodoError {
    TodoError::Config(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        TodosConfig::KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TodosConfig::default();
        assert_eq!(config.collection, "todos");
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = TodosConfig::load(temp.path()).unwrap();
        assert_eq!(config, TodosConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");

        let mut config = TodosConfig::default();
        config.set("collection", "groceries").unwrap();
        config.set("color", "never").unwrap();
        config.save(&dir).unwrap();

        let loaded = TodosConfig::load(&dir).unwrap();
        assert_eq!(loaded.collection, "groceries");
        assert_eq!(loaded.color, ColorChoice::Never);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"color":"always"}"#).unwrap();

        let config = TodosConfig::load(temp.path()).unwrap();
        assert_eq!(config.collection, "todos");
        assert_eq!(config.color, ColorChoice::Always);
    }

    #[test]
    fn test_get_known_keys() {
        let config = TodosConfig::default();
        assert_eq!(config.get("collection").unwrap(), "todos");
        assert_eq!(config.get("color").unwrap(), "auto");
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_values() {
        let mut config = TodosConfig::default();
        assert!(config.get("editor").is_err());
        assert!(config.set("editor", "vim").is_err());
        assert!(config.set("color", "purple").is_err());
        assert!(config.set("collection", "../escape").is_err());
        assert_eq!(config, TodosConfig::default());
    }

    #[test]
    fn test_color_choice() {
        assert!(ColorChoice::Auto.use_color(true));
        assert!(!ColorChoice::Auto.use_color(false));
        assert!(ColorChoice::Always.use_color(false));
        assert!(!ColorChoice::Never.use_color(true));
    }
}

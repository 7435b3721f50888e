//! Configuration for the command-line front end, with layered hierarchy
//!
//! The inventory core takes no configuration; these settings only shape how
//! the `inv` binary starts and renders.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format (auto, tsv, csv, md, json, yaml, id)
    pub default_format: Option<String>,

    /// Start from an empty catalog instead of the seed data
    pub empty: Option<bool>,

    /// Skip confirmation prompts in the shell
    pub assume_yes: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/inventory/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "inventory")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Parse a YAML config file; missing or malformed files yield `None`
    pub fn read_file(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(format) = lookup("INV_FORMAT") {
            self.default_format = Some(format);
        }
        if let Some(empty) = lookup("INV_EMPTY") {
            self.empty = Some(parse_flag(&empty));
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.empty.is_some() {
            self.empty = other.empty;
        }
        if other.assume_yes.is_some() {
            self.assume_yes = other.assume_yes;
        }
    }

    pub fn start_empty(&self) -> bool {
        self.empty.unwrap_or(false)
    }

    pub fn assume_yes(&self) -> bool {
        self.assume_yes.unwrap_or(false)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_read_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "default_format: json\nempty: true\n").unwrap();

        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.default_format.as_deref(), Some("json"));
        assert!(config.start_empty());
        assert!(!config.assume_yes());
    }

    #[test]
    fn test_read_missing_or_malformed_file() {
        let tmp = TempDir::new().unwrap();
        assert!(Config::read_file(&tmp.path().join("absent.yaml")).is_none());

        let path = tmp.path().join("bad.yaml");
        std::fs::write(&path, "empty: [not, a, bool").unwrap();
        assert!(Config::read_file(&path).is_none());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            default_format: Some("tsv".to_string()),
            empty: Some(false),
            assume_yes: Some(true),
        };
        base.merge(Config {
            default_format: Some("yaml".to_string()),
            empty: None,
            assume_yes: None,
        });

        assert_eq!(base.default_format.as_deref(), Some("yaml"));
        assert_eq!(base.empty, Some(false));
        assert!(base.assume_yes());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("INV_FORMAT", "csv"), ("INV_EMPTY", "yes")].into();
        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.default_format.as_deref(), Some("csv"));
        assert!(config.start_empty());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}

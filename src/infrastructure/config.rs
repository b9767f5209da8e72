//! Configuration management

use crate::domain::MergePolicy;
use crate::error::{Result, TagshiftError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the directory that marks a vault root
pub const VAULT_DIR: &str = ".tagshift";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// What `rename` does when the new name merges two tags
    #[serde(default)]
    pub merge_policy: MergePolicy,
    /// Directory names skipped when listing notes
    #[serde(default)]
    pub ignore: Vec<String>,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            merge_policy: MergePolicy::default(),
            ignore: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Load config from .tagshift/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(VAULT_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagshiftError::NotVaultDirectory(path.to_path_buf())
            } else {
                TagshiftError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| TagshiftError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .tagshift/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let vault_dir = path.join(VAULT_DIR);
        let config_path = vault_dir.join("config.toml");

        if !vault_dir.exists() {
            fs::create_dir(&vault_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// True if `dir_name` is listed in `ignore`
    pub fn is_ignored(&self, dir_name: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == dir_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new();
        assert_eq!(config.merge_policy, MergePolicy::Abort);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();
        config.merge_policy = MergePolicy::Warn;
        config.ignore = vec!["templates".to_string()];

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".tagshift").exists());
        assert!(temp.path().join(".tagshift/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.merge_policy, MergePolicy::Warn);
        assert_eq!(loaded.ignore, vec!["templates"]);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            TagshiftError::NotVaultDirectory(_) => {}
            other => panic!("Expected NotVaultDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".tagshift")).unwrap();
        fs::write(
            temp.path().join(".tagshift/config.toml"),
            "created = \"2026-01-01T00:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.merge_policy, MergePolicy::Abort);
        assert!(loaded.ignore.is_empty());
    }

    #[test]
    fn test_invalid_config_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".tagshift")).unwrap();
        fs::write(
            temp.path().join(".tagshift/config.toml"),
            "merge_policy = \"sometimes\"\n",
        )
        .unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            TagshiftError::Config(msg) => assert!(msg.contains("Failed to parse config.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_is_ignored() {
        let mut config = Config::new();
        config.ignore = vec!["templates".to_string(), "archive".to_string()];
        assert!(config.is_ignored("archive"));
        assert!(!config.is_ignored("notes"));
    }
}

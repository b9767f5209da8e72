//! Config management use case

use crate::domain::MergePolicy;
use crate::error::{Result, TagshiftError};
use crate::infrastructure::{Config, FileSystemRepository, VaultRepository};
use std::str::FromStr;

/// Service for managing vault configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "merge_policy" => Ok(config.merge_policy.to_string()),
            "ignore" => Ok(config.ignore.join(",")),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(TagshiftError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: merge_policy, ignore, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "merge_policy" => {
                config.merge_policy = MergePolicy::from_str(value).map_err(TagshiftError::Config)?;
            }
            "ignore" => {
                config.ignore = value
                    .split(',')
                    .map(str::trim)
                    .filter(|dir| !dir.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "created" => {
                return Err(TagshiftError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(TagshiftError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: merge_policy, ignore",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

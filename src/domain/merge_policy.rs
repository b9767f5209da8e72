//! What to do when a rename would merge two tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Refuse the rename
    #[default]
    Abort,
    /// Rename anyway, printing a warning
    Warn,
    /// Rename silently
    Allow,
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(MergePolicy::Abort),
            "warn" => Ok(MergePolicy::Warn),
            "allow" => Ok(MergePolicy::Allow),
            _ => Err(format!(
                "Invalid merge policy: '{}'. Valid policies: abort, warn, allow",
                s
            )),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergePolicy::Abort => "abort",
            MergePolicy::Warn => "warn",
            MergePolicy::Allow => "allow",
        };
        f.write_str(name)
    }
}

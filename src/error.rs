//! Error types for tagshift

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tagshift
#[derive(Debug, Error)]
pub enum TagshiftError {
    #[error("Not a tagshift vault: {0}")]
    NotVaultDirectory(PathBuf),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Renaming {from} would merge it into existing tag {into}")]
    MergeConflict { from: String, into: String },

    #[error("Frontmatter error in {file}: {message}")]
    Frontmatter { file: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TagshiftError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TagshiftError::NotVaultDirectory(_) => 2,
            TagshiftError::InvalidTag(_) => 3,
            TagshiftError::TagNotFound(_) => 4,
            TagshiftError::MergeConflict { .. } => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagshiftError::NotVaultDirectory(path) => {
                format!(
                    "Not a tagshift vault: {}\n\n\
                    Suggestions:\n\
                    • Run 'tagshift init' at the root of your notes\n\
                    • Navigate into an existing vault\n\
                    • Set TAGSHIFT_ROOT environment variable to your vault path",
                    path.display()
                )
            }
            TagshiftError::InvalidTag(tag) => {
                format!(
                    "Invalid tag: '{}'\n\n\
                    Tags need at least one character after '#'.\n\
                    Examples:\n\
                    tagshift rename work projects/work\n\
                    tagshift rename '#Area/Home' '#area/home'",
                    tag
                )
            }
            TagshiftError::TagNotFound(tag) => {
                format!(
                    "Tag not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'tagshift tags' to see the tags in this vault\n\
                    • Tags are case-insensitive and include nested tags (#a matches #a/b)",
                    tag
                )
            }
            TagshiftError::MergeConflict { from, into } => {
                format!(
                    "Renaming {} would merge it into existing tag {}\n\n\
                    Suggestions:\n\
                    • Pass --merge to merge the tags anyway\n\
                    • Choose a destination name that is not in use\n\
                    • Set the default: tagshift config merge_policy warn",
                    from, into
                )
            }
            TagshiftError::Config(msg) => {
                if msg.contains("merge policy") {
                    format!(
                        "{}\n\n\
                        Valid merge policies: abort, warn, allow\n\
                        Example: tagshift config merge_policy warn",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagshiftError
pub type Result<T> = std::result::Result<T, TagshiftError>;

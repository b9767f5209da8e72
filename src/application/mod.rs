//! Application layer - Use cases and orchestration

pub mod init;
pub mod list_tags;
pub mod manage_config;
pub mod rename_tag;

pub use list_tags::{ListTagsService, TagCount};
pub use manage_config::ConfigService;
pub use rename_tag::{rename_tag, RenameOptions, RenameReport};

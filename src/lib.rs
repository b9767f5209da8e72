//! tagshift - hierarchical tag renaming for markdown vaults
//!
//! Renames `#tags` consistently across inline body text, frontmatter tag
//! fields and tag-shaped aliases, treating tags case-insensitively and
//! carrying nested tags (`#a/b` under `#a`) along with their parent.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TagshiftError;

//! Tag system

pub mod identity;
pub mod renamer;
pub mod scanner;
pub mod target;

pub use identity::TagIdentity;
pub use renamer::{split_keeping_separators, TagRenamer};
pub use scanner::{scan_inline_tags, InlineTag};
pub use target::{rename_in_document, DocumentTagTarget, RenameOutcome};

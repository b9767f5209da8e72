//! Domain layer - Tag model and note documents

pub mod merge_policy;
pub mod note;
pub mod tags;

pub use merge_policy::MergePolicy;
pub use note::Note;
pub use tags::{TagIdentity, TagRenamer};

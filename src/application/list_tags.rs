//! List tags use case

use crate::domain::tags::DocumentTagTarget;
use crate::domain::{Note, TagIdentity};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, VaultRepository};
use std::collections::BTreeMap;

/// A tag and how often it occurs across the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    /// First spelling seen for this tag
    pub tag: String,
    pub count: usize,
}

/// Count tag occurrences across `notes`, one entry per case-insensitive tag,
/// sorted by canonical name.
pub fn count_tags<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Vec<TagCount> {
    let mut counts: BTreeMap<String, TagCount> = BTreeMap::new();

    for note in notes {
        for occurrence in note.tag_occurrences() {
            let canonical = TagIdentity::canonical_of(&occurrence);
            counts
                .entry(canonical)
                .and_modify(|entry| entry.count += 1)
                .or_insert(TagCount {
                    tag: TagIdentity::new(&occurrence).tag,
                    count: 1,
                });
        }
    }

    counts.into_values().collect()
}

/// Read and parse every note in the vault.
pub fn load_notes(repository: &FileSystemRepository) -> Result<Vec<(String, String, Note)>> {
    let config = repository.load_config()?;
    let mut notes = Vec::new();

    for filename in repository.list_notes(&config)? {
        let content = repository.read_note(&filename)?;
        let note = Note::parse(&filename, &content)?;
        notes.push((filename, content, note));
    }

    Ok(notes)
}

/// Service for listing all tags used in the vault.
pub struct ListTagsService {
    repository: FileSystemRepository,
}

impl ListTagsService {
    /// Create a new list tags service.
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// List every tag with its occurrence count.
    pub fn execute(&self) -> Result<Vec<TagCount>> {
        let notes = load_notes(&self.repository)?;
        Ok(count_tags(notes.iter().map(|(_, _, note)| note)))
    }
}

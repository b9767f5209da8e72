//! Rename tag use case

use crate::application::list_tags::{count_tags, load_notes};
use crate::domain::tags::{rename_in_document, RenameOutcome};
use crate::domain::{MergePolicy, TagIdentity, TagRenamer};
use crate::error::{Result, TagshiftError};
use crate::infrastructure::{FileSystemRepository, VaultRepository};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub from_tag: String,
    pub to_tag: String,
    pub dry_run: bool,
    /// Overrides the configured merge policy
    pub merge_policy: Option<MergePolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameFileChange {
    pub filename: String,
    pub occurrences: usize,
}

/// A tag that the rename folded into an already existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTag {
    pub from: String,
    pub into: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameReport {
    pub from_tag: String,
    pub to_tag: String,
    pub scanned_files: usize,
    pub changed_files: usize,
    pub total_occurrences: usize,
    pub dry_run: bool,
    /// Set when the rename merged tags under the `warn` policy
    pub merged: Option<MergedTag>,
    pub changes: Vec<RenameFileChange>,
}

/// Rename a tag (and its nested tags) in every note of the vault.
///
/// Every note is parsed before anything is written, so a malformed note or a
/// refused merge leaves the vault untouched.
pub fn rename_tag(
    repository: &FileSystemRepository,
    options: RenameOptions,
) -> Result<RenameReport> {
    let from = parse_tag_argument(&options.from_tag)?;
    let to = parse_tag_argument(&options.to_tag)?;

    let config = repository.load_config()?;
    let notes = load_notes(repository)?;

    let mut report = RenameReport {
        from_tag: from.tag.clone(),
        to_tag: to.tag.clone(),
        scanned_files: notes.len(),
        changed_files: 0,
        total_occurrences: 0,
        dry_run: options.dry_run,
        merged: None,
        changes: Vec::new(),
    };

    let existing: Vec<String> = count_tags(notes.iter().map(|(_, _, note)| note))
        .into_iter()
        .map(|count| count.tag)
        .collect();

    if !existing.iter().any(|tag| from.matches(tag)) {
        return Err(TagshiftError::TagNotFound(from.tag));
    }

    if from.tag == to.tag {
        debug!(tag = %from, "source and destination are identical");
        return Ok(report);
    }

    let probe = TagRenamer::new(from.clone(), to.clone());
    if let Some((existing_tag, renamed)) = probe.will_merge_tags(&existing) {
        let merged = MergedTag {
            from: existing_tag.tag,
            into: renamed.tag,
        };
        match options.merge_policy.unwrap_or(config.merge_policy) {
            MergePolicy::Abort => {
                return Err(TagshiftError::MergeConflict {
                    from: merged.from,
                    into: merged.into,
                })
            }
            MergePolicy::Warn => {
                warn!(from = %merged.from, into = %merged.into, "rename merges tags");
                report.merged = Some(merged);
            }
            MergePolicy::Allow => {
                debug!(from = %merged.from, into = %merged.into, "rename merges tags");
            }
        }
    }

    for (filename, content, mut note) in notes {
        let mut renamer = TagRenamer::new(from.clone(), to.clone());
        let RenameOutcome::Renamed { occurrences } = rename_in_document(&mut note, &mut renamer)
        else {
            continue;
        };

        let rendered = note.render()?;
        if rendered == content {
            continue;
        }

        if !options.dry_run {
            repository.write_note_atomic(&filename, &rendered)?;
        }
        debug!(file = %filename, occurrences, dry_run = options.dry_run, "updated note");

        report.total_occurrences += occurrences;
        report.changes.push(RenameFileChange {
            filename,
            occurrences,
        });
    }

    report.changed_files = report.changes.len();
    info!(
        from = %report.from_tag,
        to = %report.to_tag,
        files = report.changed_files,
        occurrences = report.total_occurrences,
        "rename finished"
    );

    Ok(report)
}

/// Normalize a command-line tag, rejecting names that could never be tags.
fn parse_tag_argument(input: &str) -> Result<TagIdentity> {
    let tag = TagIdentity::new(input.trim());
    if !TagIdentity::is_tag_shaped(&tag.tag) {
        return Err(TagshiftError::InvalidTag(input.to_string()));
    }
    Ok(tag)
}

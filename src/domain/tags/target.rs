//! Documents as rename targets.

use super::renamer::TagRenamer;
use tracing::debug;

/// The tag occurrences held by one document.
///
/// Implementors expose every tag-like token they contain (inline body tags,
/// frontmatter tags, tag-shaped aliases) and can rewrite them in memory.
/// Persisting the result is up to the caller.
pub trait DocumentTagTarget {
    /// All tag occurrences, each with a leading `#`.
    fn tag_occurrences(&self) -> Vec<String>;

    /// Rewrite every occurrence the renamer's source tag matches.
    fn apply_rename(&mut self, renamer: &mut TagRenamer);
}

/// Result of renaming inside a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The source tag does not occur; nothing was touched
    NotFound,
    /// The document was rewritten
    Renamed { occurrences: usize },
}

/// Rename the renamer's source tag in `target`, if it occurs there at all.
pub fn rename_in_document<T: DocumentTagTarget + ?Sized>(
    target: &mut T,
    renamer: &mut TagRenamer,
) -> RenameOutcome {
    let from = renamer.from_tag();
    let occurrences = target
        .tag_occurrences()
        .iter()
        .filter(|tag| from.matches(tag))
        .count();

    if occurrences == 0 {
        return RenameOutcome::NotFound;
    }

    debug!(
        from = %renamer.from_tag(),
        to = %renamer.to_tag(),
        occurrences,
        "renaming tag in document"
    );
    target.apply_rename(renamer);

    RenameOutcome::Renamed { occurrences }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tags::TagIdentity;

    struct TokenList {
        tokens: Vec<String>,
    }

    impl DocumentTagTarget for TokenList {
        fn tag_occurrences(&self) -> Vec<String> {
            self.tokens.clone()
        }

        fn apply_rename(&mut self, renamer: &mut TagRenamer) {
            self.tokens = renamer.in_array(&self.tokens, false, false);
        }
    }

    fn renamer(from: &str, to: &str) -> TagRenamer {
        TagRenamer::new(TagIdentity::new(from), TagIdentity::new(to))
    }

    #[test]
    fn renames_when_tag_present() {
        let mut target = TokenList {
            tokens: vec!["#a".to_string(), "#a/b".to_string(), "#c".to_string()],
        };

        let outcome = rename_in_document(&mut target, &mut renamer("a", "z"));

        assert_eq!(outcome, RenameOutcome::Renamed { occurrences: 2 });
        assert_eq!(target.tokens, vec!["#z", "#z/b", "#c"]);
    }

    #[test]
    fn leaves_document_alone_when_tag_absent() {
        let mut target = TokenList {
            tokens: vec!["#a".to_string()],
        };

        let outcome = rename_in_document(&mut target, &mut renamer("x/y/z", "q/r/s"));

        assert_eq!(outcome, RenameOutcome::NotFound);
        assert_eq!(target.tokens, vec!["#a"]);
    }
}

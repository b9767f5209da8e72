//! Tag identity: normalized, case-folded view of a hierarchical tag name.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Characters allowed in a tag body: anything except whitespace, the ASCII
/// punctuation below, and the General / Supplemental Punctuation blocks.
pub(crate) const TAG_BODY_CLASS: &str =
    r##"[^\s\x{2000}-\x{206F}\x{2E00}-\x{2E7F}!"#$%&()*+,.:;<=>?@^`{|}~\[\]\\]"##;

fn tag_shape_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(&format!("^#{}+$", TAG_BODY_CLASS)).unwrap())
}

/// A tag name normalized to exactly one leading `#`.
///
/// Matching is case-insensitive and hierarchical: `#work` matches `#Work`
/// and `#work/meetings`, but not `#workshop`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagIdentity {
    /// Normalized tag, e.g. `#Work/Meetings`
    pub tag: String,
    /// Lowercased `tag`
    pub canonical: String,
    /// `canonical` followed by `/`
    pub canonical_prefix: String,
    /// `tag` without the leading `#`
    pub name: String,
}

impl TagIdentity {
    /// Build an identity from any user-supplied name. Never fails.
    pub fn new(name: &str) -> Self {
        let tag = Self::to_tag(name);
        let canonical = tag.to_lowercase();
        let canonical_prefix = format!("{}/", canonical);
        let name = tag[1..].to_string();

        TagIdentity {
            tag,
            canonical,
            canonical_prefix,
            name,
        }
    }

    /// True if `s` is `#` followed by one or more tag-body characters.
    pub fn is_tag_shaped(s: &str) -> bool {
        tag_shape_regex().is_match(s)
    }

    /// Lowercased normalized form of `name`.
    pub fn canonical_of(name: &str) -> String {
        Self::to_tag(name).to_lowercase()
    }

    /// True if `text` is this tag or one of its descendants, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        text == self.canonical || text.starts_with(&self.canonical_prefix)
    }

    fn to_tag(name: &str) -> String {
        let mut name = name;
        while name.starts_with("##") {
            name = &name[1..];
        }

        if name.starts_with('#') {
            name.to_string()
        } else {
            format!("#{}", name)
        }
    }
}

impl fmt::Display for TagIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_adds_hash() {
        assert_eq!(TagIdentity::new("##foo").tag, "#foo");
        assert_eq!(TagIdentity::new("###foo").tag, "#foo");
        assert_eq!(TagIdentity::new("foo").tag, "#foo");
        assert_eq!(TagIdentity::new("#foo").tag, "#foo");
    }

    #[test]
    fn fields_are_consistent() {
        let tag = TagIdentity::new("Work/Meetings");
        assert_eq!(tag.tag, "#Work/Meetings");
        assert_eq!(tag.canonical, "#work/meetings");
        assert_eq!(tag.canonical_prefix, "#work/meetings/");
        assert_eq!(tag.name, "Work/Meetings");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["", "#", "##", "foo", "##Foo/Bar", "#a b", "é/Ü"] {
            let once = TagIdentity::new(input);
            let twice = TagIdentity::new(&once.tag);
            assert_eq!(once, twice, "input {:?}", input);
        }
    }

    #[test]
    fn degenerate_inputs() {
        let empty = TagIdentity::new("");
        assert_eq!(empty.tag, "#");
        assert_eq!(empty.name, "");
        assert_eq!(empty.canonical_prefix, "#/");

        let hashes = TagIdentity::new("####");
        assert_eq!(hashes.tag, "#");
        assert_eq!(hashes.name, "");
    }

    #[test]
    fn canonical_of_lowercases_normalized_tag() {
        assert_eq!(TagIdentity::canonical_of("##Foo/Bar"), "#foo/bar");
        assert_eq!(TagIdentity::canonical_of("Foo"), "#foo");
    }

    #[test]
    fn matches_self_and_descendants_only() {
        let tag = TagIdentity::new("#Foo/Bar");
        assert!(tag.matches("#foo/bar"));
        assert!(tag.matches("#FOO/BAR"));
        assert!(tag.matches("#foo/bar/baz"));
        assert!(!tag.matches("#foo/barn"));
        assert!(!tag.matches("#foo"));

        let foo = TagIdentity::new("#foo");
        assert!(!foo.matches("#foobar"));
        assert!(!foo.matches("foo"));
    }

    #[test]
    fn tag_shape_accepts_plain_tags() {
        assert!(TagIdentity::is_tag_shaped("#work"));
        assert!(TagIdentity::is_tag_shaped("#work/meetings"));
        assert!(TagIdentity::is_tag_shaped("#project-alpha_2"));
        assert!(TagIdentity::is_tag_shaped("#café"));
        assert!(TagIdentity::is_tag_shaped("#123"));
    }

    #[test]
    fn tag_shape_rejects_punctuation_and_spaces() {
        assert!(!TagIdentity::is_tag_shaped("#"));
        assert!(!TagIdentity::is_tag_shaped("work"));
        assert!(!TagIdentity::is_tag_shaped("#not a tag"));
        assert!(!TagIdentity::is_tag_shaped("##double"));
        for bad in "!\"$%&()*+,.:;<=>?@^`{|}~[]\\".chars() {
            let candidate = format!("#a{}b", bad);
            assert!(!TagIdentity::is_tag_shaped(&candidate), "{:?}", candidate);
        }
    }

    #[test]
    fn tag_shape_rejects_unicode_punctuation_blocks() {
        assert!(!TagIdentity::is_tag_shaped("#a\u{2014}b"));
        assert!(!TagIdentity::is_tag_shaped("#a\u{2026}"));
        assert!(!TagIdentity::is_tag_shaped("#\u{2E3A}"));
        assert!(TagIdentity::is_tag_shaped("#a\u{1F600}"));
    }
}

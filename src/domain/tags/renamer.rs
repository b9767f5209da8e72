//! Tag renaming: rewrites tag tokens from one identity to another.

use super::identity::TagIdentity;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use tracing::trace;

fn separator_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[, \n]+").unwrap())
}

/// Split `text` on `[, \n]+`, keeping the separators.
///
/// Even indices hold words, odd indices hold separators, so the pieces can be
/// joined back to the exact input. Leading or trailing separators produce
/// empty words at the ends.
pub fn split_keeping_separators(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut cursor = 0usize;

    for separator in separator_regex().find_iter(text) {
        pieces.push(text[cursor..separator.start()].to_string());
        pieces.push(separator.as_str().to_string());
        cursor = separator.end();
    }
    pieces.push(text[cursor..].to_string());

    pieces
}

/// Renames one tag (and everything below it) to another.
///
/// A renamer memoizes per-token results, so build one per rename request and
/// drop it afterwards.
#[derive(Debug, Clone)]
pub struct TagRenamer {
    from: TagIdentity,
    to: TagIdentity,
    cache: HashMap<String, String>,
}

impl TagRenamer {
    /// Create a renamer from `from` to `to` with an empty memo.
    pub fn new(from: TagIdentity, to: TagIdentity) -> Self {
        let mut cache = HashMap::new();
        cache.insert(from.tag.clone(), to.tag.clone());
        cache.insert(from.name.clone(), to.name.clone());

        TagRenamer { from, to, cache }
    }

    pub fn from_tag(&self) -> &TagIdentity {
        &self.from
    }

    pub fn to_tag(&self) -> &TagIdentity {
        &self.to
    }

    /// Replace the source tag that starts at byte offset `pos` in `text`.
    ///
    /// The caller locates the occurrence; this only splices. An offset that is
    /// out of range or not on a character boundary leaves `text` unchanged.
    pub fn in_string(&self, text: &str, pos: usize) -> String {
        let Some(before) = text.get(..pos) else {
            return text.to_string();
        };
        let rest = &text[pos..];

        let replaced_len = self.from.tag.chars().count();
        let end = rest
            .char_indices()
            .nth(replaced_len)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());

        let mut result = String::with_capacity(text.len() + self.to.tag.len());
        result.push_str(before);
        result.push_str(&self.to.tag);
        result.push_str(&rest[end..]);
        result
    }

    /// Rename every tag-like token in `tokens`, returning a same-length vector.
    ///
    /// With `skip_odd_positions`, odd entries are separators and are kept as is.
    /// With `is_alias_list`, only entries that are themselves tag-shaped and
    /// start with `#` are considered.
    pub fn in_array<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        skip_odd_positions: bool,
        is_alias_list: bool,
    ) -> Vec<String> {
        tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                self.rename_token(token.as_ref(), idx, skip_odd_positions, is_alias_list)
            })
            .collect()
    }

    fn rename_token(
        &mut self,
        token: &str,
        idx: usize,
        skip_odd_positions: bool,
        is_alias_list: bool,
    ) -> String {
        if skip_odd_positions && idx % 2 == 1 {
            return token.to_string();
        }
        if token.is_empty() {
            return String::new();
        }

        if is_alias_list {
            if !token.starts_with('#') || !TagIdentity::is_tag_shaped(token) {
                return token.to_string();
            }
        } else if token.contains([' ', ',', '\n']) {
            let parts = split_keeping_separators(token);
            return self.in_array(&parts, true, false).concat();
        }

        if let Some(cached) = self.cache.get(token) {
            return cached.clone();
        }

        let lower = token.to_lowercase();
        if let Some(cached) = self.cache.get(&lower).cloned() {
            self.cache.insert(token.to_string(), cached.clone());
            return cached;
        }

        let renamed = if lower.starts_with(&self.from.canonical_prefix) {
            self.in_string(token, 0)
        } else if format!("#{}", lower).starts_with(&self.from.canonical_prefix) {
            let hashed = self.in_string(&format!("#{}", token), 0);
            hashed[1..].to_string()
        } else {
            token.to_string()
        };

        if renamed != token {
            trace!(from = token, to = %renamed, "renamed tag token");
        }

        self.cache.insert(token.to_string(), renamed.clone());
        self.cache.insert(lower, renamed.clone());
        renamed
    }

    /// Check whether renaming would fold an existing tag into another one.
    ///
    /// Returns the first `(existing, renamed)` pair where `renamed` already
    /// exists in `tag_names`. Case-only renames never conflict.
    pub fn will_merge_tags<S: AsRef<str>>(
        &self,
        tag_names: &[S],
    ) -> Option<(TagIdentity, TagIdentity)> {
        if self.from.canonical == self.to.canonical {
            return None;
        }

        let existing: HashSet<String> = tag_names
            .iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect();

        tag_names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| self.from.matches(name))
            .find_map(|name| {
                let renamed = self.in_string(name, 0);
                if existing.contains(&renamed.to_lowercase()) {
                    Some((TagIdentity::new(name), TagIdentity::new(&renamed)))
                } else {
                    None
                }
            })
    }
}

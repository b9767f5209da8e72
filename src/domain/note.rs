//! Markdown note with optional YAML frontmatter

use crate::domain::tags::{
    scan_inline_tags, split_keeping_separators, DocumentTagTarget, TagIdentity, TagRenamer,
};
use crate::error::{Result, TagshiftError};
use serde_yml::{Mapping, Value};

/// Which kind of tag data a frontmatter key holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Tags,
    Aliases,
}

impl FieldKind {
    fn of(key: &Value) -> Option<Self> {
        let key = key.as_str()?.to_lowercase();
        match key.as_str() {
            "tags" | "tag" => Some(FieldKind::Tags),
            "aliases" | "alias" => Some(FieldKind::Aliases),
            _ => None,
        }
    }

    fn is_alias(self) -> bool {
        self == FieldKind::Aliases
    }
}

#[derive(Debug, Clone)]
struct Frontmatter {
    /// Original header including both `---` lines
    raw: String,
    fields: Mapping,
    modified: bool,
}

/// A parsed markdown note.
#[derive(Debug, Clone)]
pub struct Note {
    source: String,
    frontmatter: Option<Frontmatter>,
    body: String,
}

impl Note {
    /// Split `text` into frontmatter and body. `source` names the note in errors.
    pub fn parse(source: &str, text: &str) -> Result<Self> {
        let Some((raw, yaml, body)) = split_frontmatter(text) else {
            return Ok(Note {
                source: source.to_string(),
                frontmatter: None,
                body: text.to_string(),
            });
        };

        let value: Value =
            serde_yml::from_str(yaml).map_err(|e| TagshiftError::Frontmatter {
                file: source.to_string(),
                message: e.to_string(),
            })?;

        let fields = match value {
            Value::Mapping(fields) => fields,
            Value::Null => Mapping::new(),
            _ => {
                return Err(TagshiftError::Frontmatter {
                    file: source.to_string(),
                    message: "frontmatter is not a key/value mapping".to_string(),
                })
            }
        };

        Ok(Note {
            source: source.to_string(),
            frontmatter: Some(Frontmatter {
                raw: raw.to_string(),
                fields,
                modified: false,
            }),
            body: body.to_string(),
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Values of the tag fields, each with a leading `#`.
    pub fn frontmatter_tags(&self) -> Vec<String> {
        self.field_words(FieldKind::Tags)
            .into_iter()
            .map(|word| TagIdentity::new(&word).tag)
            .collect()
    }

    /// Alias values that are themselves tags.
    pub fn tag_aliases(&self) -> Vec<String> {
        self.field_words(FieldKind::Aliases)
            .into_iter()
            .filter(|word| TagIdentity::is_tag_shaped(word))
            .collect()
    }

    /// Reassemble the note. An untouched frontmatter is emitted byte for byte.
    pub fn render(&self) -> Result<String> {
        let Some(frontmatter) = &self.frontmatter else {
            return Ok(self.body.clone());
        };

        if !frontmatter.modified {
            return Ok(format!("{}{}", frontmatter.raw, self.body));
        }

        let yaml = serde_yml::to_string(&frontmatter.fields).map_err(|e| {
            TagshiftError::Frontmatter {
                file: self.source.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(format!("---\n{}---\n{}", yaml, self.body))
    }

    fn field_words(&self, kind: FieldKind) -> Vec<String> {
        let Some(frontmatter) = &self.frontmatter else {
            return Vec::new();
        };

        let mut words = Vec::new();
        for (key, value) in frontmatter.fields.iter() {
            if FieldKind::of(key) != Some(kind) {
                continue;
            }
            match value {
                Value::String(text) => collect_words(text, kind, &mut words),
                Value::Sequence(items) => {
                    for item in items {
                        let Value::String(text) = item else {
                            continue;
                        };
                        // Alias list entries are whole names, never split
                        if kind.is_alias() {
                            if text.starts_with('#') {
                                words.push(text.clone());
                            }
                        } else {
                            collect_words(text, kind, &mut words);
                        }
                    }
                }
                _ => {}
            }
        }
        words
    }

    fn rename_frontmatter(&mut self, renamer: &mut TagRenamer) {
        let Some(frontmatter) = &mut self.frontmatter else {
            return;
        };

        let mut modified = false;
        for (key, value) in frontmatter.fields.iter_mut() {
            let Some(kind) = FieldKind::of(key) else {
                continue;
            };
            match value {
                Value::String(text) => {
                    let parts = split_keeping_separators(text);
                    let renamed = renamer.in_array(&parts, true, kind.is_alias()).concat();
                    if renamed != *text {
                        *text = renamed;
                        modified = true;
                    }
                }
                Value::Sequence(items) => {
                    let strings: Vec<String> = items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect();
                    let mut renamed = renamer
                        .in_array(&strings, false, kind.is_alias())
                        .into_iter();
                    for item in items.iter_mut() {
                        if let Value::String(text) = item {
                            if let Some(new_text) = renamed.next() {
                                if new_text != *text {
                                    *text = new_text;
                                    modified = true;
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        frontmatter.modified |= modified;
    }

    fn rename_inline(&mut self, renamer: &TagRenamer) {
        let from = renamer.from_tag();
        // Back to front so earlier offsets stay valid
        for tag in scan_inline_tags(&self.body).iter().rev() {
            if from.matches(&tag.text) {
                self.body = renamer.in_string(&self.body, tag.offset);
            }
        }
    }
}

impl DocumentTagTarget for Note {
    fn tag_occurrences(&self) -> Vec<String> {
        let mut occurrences: Vec<String> = scan_inline_tags(&self.body)
            .into_iter()
            .map(|tag| tag.text)
            .collect();
        occurrences.extend(self.frontmatter_tags());
        occurrences.extend(self.tag_aliases());
        occurrences
    }

    fn apply_rename(&mut self, renamer: &mut TagRenamer) {
        self.rename_frontmatter(renamer);
        self.rename_inline(renamer);
    }
}

/// Words of a frontmatter value that could be tags.
fn collect_words(text: &str, kind: FieldKind, output: &mut Vec<String>) {
    for (idx, word) in split_keeping_separators(text).into_iter().enumerate() {
        if idx % 2 == 1 || word.is_empty() {
            continue;
        }
        if kind.is_alias() && !word.starts_with('#') {
            continue;
        }
        output.push(word);
    }
}

/// Returns `(header, yaml, body)` for text that opens with a `---` block.
fn split_frontmatter(text: &str) -> Option<(&str, &str, &str)> {
    let first_line_end = text.find('\n')?;
    if text[..first_line_end].trim_end_matches('\r') != "---" {
        return None;
    }

    let yaml_start = first_line_end + 1;
    let mut line_start = yaml_start;
    while line_start <= text.len() {
        let line_end = text[line_start..]
            .find('\n')
            .map(|idx| line_start + idx)
            .unwrap_or(text.len());
        let line = text[line_start..line_end].trim_end_matches('\r');

        if line == "---" {
            let header_end = (line_end + 1).min(text.len());
            return Some((
                &text[..header_end],
                &text[yaml_start..line_start],
                &text[header_end..],
            ));
        }

        if line_end == text.len() {
            break;
        }
        line_start = line_end + 1;
    }

    None
}

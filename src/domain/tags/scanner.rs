//! Inline tag scanning for markdown bodies.

use super::identity::TAG_BODY_CLASS;
use pulldown_cmark::{Event, LinkType, Parser as MdParser, Tag, TagEnd};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// `#` at the start of text or after a character that cannot glue onto a tag
/// (so `a#b`, `&#39;`, `##heading` and `path/#x` are not tags).
fn inline_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!(r"(?:^|[^\p{{Alphabetic}}\p{{N}}#&/])(#{}+)", TAG_BODY_CLASS))
            .unwrap()
    })
}

/// `[[target#heading|label]]` links, which pulldown-cmark does not parse.
fn wikilink_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"!?\[\[[^\]\n]*\]\]").unwrap())
}

/// A tag written in a markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineTag {
    /// Literal text including the `#`
    pub text: String,
    /// Byte offset of the `#` in the scanned text
    pub offset: usize,
}

/// Find all inline tags in `markdown`, skipping code, HTML, link
/// destinations and wikilinks.
pub fn scan_inline_tags(markdown: &str) -> Vec<InlineTag> {
    if markdown.is_empty() {
        return Vec::new();
    }

    let excluded = excluded_ranges(markdown);
    let mut tags = Vec::new();
    let mut cursor = 0usize;

    for range in excluded {
        if range.start > cursor {
            scan_chunk(markdown, cursor..range.start, &mut tags);
        }
        cursor = cursor.max(range.end);
    }

    if cursor < markdown.len() {
        scan_chunk(markdown, cursor..markdown.len(), &mut tags);
    }

    tags
}

fn scan_chunk(markdown: &str, chunk: Range<usize>, output: &mut Vec<InlineTag>) {
    let text = &markdown[chunk.clone()];
    for captures in inline_tag_regex().captures_iter(text) {
        let Some(found) = captures.get(1) else {
            continue;
        };
        // A run of digits is an issue number, not a tag
        if found.as_str()[1..].chars().all(|ch| ch.is_ascii_digit()) {
            continue;
        }
        output.push(InlineTag {
            text: found.as_str().to_string(),
            offset: chunk.start + found.start(),
        });
    }
}

fn excluded_ranges(markdown: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut code_block_start: Option<usize> = None;

    for (event, range) in MdParser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                code_block_start = Some(range.start);
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(start) = code_block_start.take() {
                    ranges.push(start..range.end);
                }
            }
            Event::Start(Tag::Link { link_type, .. })
            | Event::Start(Tag::Image { link_type, .. }) => {
                if let Some(destination) = link_destination(markdown, range, link_type) {
                    ranges.push(destination);
                }
            }
            Event::Start(Tag::HtmlBlock)
            | Event::Code(_)
            | Event::Html(_)
            | Event::InlineHtml(_) => {
                ranges.push(range.start..range.end);
            }
            _ => {}
        }
    }

    for wikilink in wikilink_regex().find_iter(markdown) {
        ranges.push(wikilink.range());
    }

    if let Some(start) = code_block_start.take() {
        ranges.push(start..markdown.len());
    }

    merge_ranges(ranges)
}

/// The part of a link that is not its visible text: all of an autolink, the
/// `](…)` tail of an inline link.
fn link_destination(
    markdown: &str,
    link: Range<usize>,
    link_type: LinkType,
) -> Option<Range<usize>> {
    match link_type {
        LinkType::Autolink | LinkType::Email => Some(link),
        LinkType::Inline => {
            let text = &markdown[link.clone()];
            if !text.ends_with(')') {
                return None;
            }
            text.rfind("](").map(|idx| link.start + idx..link.end)
        }
        _ => None,
    }
}

fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    if ranges.is_empty() {
        return ranges;
    }

    ranges.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(markdown: &str) -> Vec<String> {
        scan_inline_tags(markdown)
            .into_iter()
            .map(|tag| tag.text)
            .collect()
    }

    #[test]
    fn finds_tags_with_offsets() {
        let tags = scan_inline_tags("Meeting #work/standup and #Urgent.");
        assert_eq!(
            tags,
            vec![
                InlineTag {
                    text: "#work/standup".to_string(),
                    offset: 8,
                },
                InlineTag {
                    text: "#Urgent".to_string(),
                    offset: 26,
                },
            ]
        );
    }

    #[test]
    fn tag_at_start_of_text() {
        assert_eq!(texts("#first thing"), vec!["#first"]);
    }

    #[test]
    fn stops_at_punctuation() {
        assert_eq!(texts("(#a, #b; #c!) #d."), vec!["#a", "#b", "#c", "#d"]);
    }

    #[test]
    fn ignores_headings_and_glued_hashes() {
        assert_eq!(texts("# Heading\n## Sub"), Vec::<String>::new());
        assert_eq!(texts("issue a#b and &#39; and x/#y"), Vec::<String>::new());
    }

    #[test]
    fn ignores_numeric_only_tags() {
        assert_eq!(texts("Fixes #123 for #v2"), vec!["#v2"]);
    }

    #[test]
    fn skips_code_spans_and_blocks() {
        let markdown = "Real #one and `#two`\n\n```\n#three\n```\n\n#four\n";
        assert_eq!(texts(markdown), vec!["#one", "#four"]);
    }

    #[test]
    fn ignores_link_destinations_but_not_link_text() {
        assert_eq!(texts("See [the plan](#plan) now"), Vec::<String>::new());
        assert_eq!(texts("![img](pic.png#frag)"), Vec::<String>::new());
        assert_eq!(texts("[#plan notes](other.md#plan)"), vec!["#plan"]);
        assert_eq!(texts("<https://example.com/#plan>"), Vec::<String>::new());
    }

    #[test]
    fn ignores_wikilinks() {
        assert_eq!(
            texts("[[#plan]] and [[Note#plan|alias]] and ![[img.png#x]]"),
            Vec::<String>::new()
        );
        assert_eq!(texts("[[Note]] #real"), vec!["#real"]);
    }

    #[test]
    fn ignores_html() {
        assert_eq!(texts("Text <!-- #plan --> more"), Vec::<String>::new());
        assert_eq!(texts("<div>\n#plan\n</div>\n"), Vec::<String>::new());
        assert_eq!(texts("a <span title=\"#x\">#y</span>"), vec!["#y"]);
    }

    #[test]
    fn tag_in_brackets_or_parens_still_counts() {
        assert_eq!(texts("(#a) [#b]"), vec!["#a", "#b"]);
    }

    #[test]
    fn unclosed_code_block_runs_to_end() {
        assert_eq!(texts("#kept\n\n```\n#lost\n"), vec!["#kept"]);
    }

    #[test]
    fn unicode_tags_and_offsets() {
        let tags = scan_inline_tags("café #thé/vert");
        assert_eq!(tags[0].text, "#thé/vert");
        assert_eq!(tags[0].offset, 6);
    }

    #[test]
    fn merge_ranges_combines_overlaps() {
        assert_eq!(merge_ranges(vec![5..8, 0..3, 2..4]), vec![0..4, 5..8]);
    }
}

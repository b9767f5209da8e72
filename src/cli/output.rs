//! Output formatting utilities

use crate::application::{RenameReport, TagCount};

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[TagCount]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let width = tags.iter().map(|t| t.tag.chars().count()).max().unwrap_or(0);
    let mut output = String::new();
    for tag in tags {
        output.push_str(&format!("{:<width$}  {}\n", tag.tag, tag.count, width = width));
    }

    output
}

/// Format the summary of a rename.
pub fn format_rename_report(report: &RenameReport) -> String {
    let mut output = String::new();

    if let Some(merged) = &report.merged {
        output.push_str(&format!(
            "Warning: {} will merge into existing {}\n",
            merged.from, merged.into
        ));
    }

    if report.dry_run {
        output.push_str(&format!(
            "Dry run: {} file(s) would be updated with {} occurrence(s).\n",
            report.changed_files, report.total_occurrences
        ));
    } else {
        output.push_str(&format!(
            "Renamed {} to {}: updated {} file(s) with {} occurrence(s).\n",
            report.from_tag, report.to_tag, report.changed_files, report.total_occurrences
        ));
    }

    for change in &report.changes {
        output.push_str(&format!("  {} ({})\n", change.filename, change.occurrences));
    }

    output
}

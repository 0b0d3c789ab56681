use colored::Colorize;
use kea_form_core::{format_issues, format_summary, format_text, DiffEntry, ValidationIssue};

fn paint(line: &str) -> String {
    match line.chars().next() {
        Some('+') => line.green().to_string(),
        Some('-') => line.red().to_string(),
        Some('~') => line.yellow().to_string(),
        Some('!') => line.magenta().to_string(),
        Some('=') => line.dimmed().to_string(),
        _ => line.to_string(),
    }
}

/// Diff lines colored by entry kind.
pub fn render_text(entries: &[DiffEntry]) -> String {
    format_text(entries)
        .lines()
        .map(paint)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summary line, green when no entry is a change.
pub fn render_summary(entries: &[DiffEntry]) -> String {
    let summary = format_summary(entries);
    if entries.iter().any(DiffEntry::is_change) {
        summary.yellow().to_string()
    } else {
        summary.green().to_string()
    }
}

/// Render validation issues, one per line.
pub fn render_issues(issues: &[ValidationIssue]) -> String {
    if issues.is_empty() {
        return "no validation issues".green().to_string();
    }
    let mut out: Vec<String> = format_issues(issues)
        .lines()
        .map(|line| line.red().to_string())
        .collect();
    out.push(format!("issues={}", issues.len()).cyan().to_string());
    out.join("\n")
}

/// Render the outcome of a load/submit round trip.
///
/// Identical rows do not count as a loss.
pub fn render_roundtrip(subnet: &str, entries: &[DiffEntry]) -> String {
    if !entries.iter().any(DiffEntry::is_change) {
        let line = format!("lossless round trip for {subnet}");
        return line.green().to_string();
    }
    let mut out = vec![format!("round trip changed {subnet}").yellow().to_string()];
    out.push(render_text(entries));
    out.push(render_summary(entries));
    out.join("\n")
}

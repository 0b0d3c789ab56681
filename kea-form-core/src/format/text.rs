use crate::diff::result::DiffEntry;
use crate::validate::ValidationIssue;

/// Format diff entries as plain text.
pub fn format_text(entries: &[DiffEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            DiffEntry::Identical { path } => lines.push(format!("= {path}")),
            DiffEntry::Modified { path, left, right } => {
                lines.push(format!("~ {path}"));
                lines.push(format!("  left:  {left}"));
                lines.push(format!("  right: {right}"));
            }
            DiffEntry::OnlyLeft { path, value } => lines.push(format!("- {path}: {value}")),
            DiffEntry::OnlyRight { path, value } => lines.push(format!("+ {path}: {value}")),
            DiffEntry::Structural { path, description } => {
                lines.push(format!("! {path}: {description}"));
            }
        }
    }
    lines.join("\n")
}

/// One-line count of the entries by kind.
///
/// `changes` counts every entry except identical rows, which are reported
/// as `unchanged`.
pub fn format_summary(entries: &[DiffEntry]) -> String {
    let count = |kind: fn(&DiffEntry) -> bool| entries.iter().filter(|&entry| kind(entry)).count();
    let changes = count(DiffEntry::is_change);
    let modified = count(|entry| matches!(entry, DiffEntry::Modified { .. }));
    let only_left = count(|entry| matches!(entry, DiffEntry::OnlyLeft { .. }));
    let only_right = count(|entry| matches!(entry, DiffEntry::OnlyRight { .. }));
    let structural = count(|entry| matches!(entry, DiffEntry::Structural { .. }));
    let unchanged = entries.len() - changes;

    format!(
        "changes={changes} modified={modified} only_left={only_left} only_right={only_right} \
         structural={structural} unchanged={unchanged}"
    )
}

/// Format validation issues, one per line.
pub fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| match issue.slot {
            Some(slot) => format!("{}[{slot}]: {}", issue.path, issue.message),
            None => format!("{}: {}", issue.path, issue.message),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

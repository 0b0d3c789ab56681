use crate::diff::result::DiffEntry;

/// Diff entries as a pretty-printed JSON array tagged by entry type.
pub fn format_json(entries: &[DiffEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

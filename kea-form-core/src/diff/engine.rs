use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::diff::result::DiffEntry;
use crate::model::Subnet;

/// Configures document diff behavior.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Include [`DiffEntry::Identical`] rows for unchanged scalars.
    pub include_identical: bool,
    /// Maximum recursion depth. `-1` means unlimited.
    pub max_depth: i32,
    /// Map from array member name to the element field used to match
    /// elements across the two documents.
    pub key_fields: HashMap<String, String>,
    /// Object keys skipped at every level.
    pub ignore_keys: Vec<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        let key_fields = [
            ("localSubnets", "daemonId"),
            ("pools", "pool"),
            ("prefixDelegationPools", "prefix"),
        ]
        .into_iter()
        .map(|(member, key)| (member.to_string(), key.to_string()))
        .collect();
        Self {
            include_identical: false,
            max_depth: -1,
            key_fields,
            ignore_keys: vec!["optionsHash".to_string()],
        }
    }
}

/// Diff two subnets.
///
/// A missing parameter block compares equal to an empty one, so a subnet
/// and its form round trip only differ where a value changed.
pub fn diff_subnets(left: &Subnet, right: &Subnet, opts: &DiffOptions) -> Vec<DiffEntry> {
    let left = serde_json::to_value(left.with_parameter_blocks()).unwrap_or(Value::Null);
    let right = serde_json::to_value(right.with_parameter_blocks()).unwrap_or(Value::Null);
    diff_values(&left, &right, "subnet", opts)
}

/// Diff two JSON documents rooted at `root`.
pub fn diff_values(left: &Value, right: &Value, root: &str, opts: &DiffOptions) -> Vec<DiffEntry> {
    let mut out = Vec::new();
    diff_value(left, right, root, 0, opts, &mut out);
    out
}

fn diff_value(
    left: &Value,
    right: &Value,
    path: &str,
    depth: i32,
    opts: &DiffOptions,
    out: &mut Vec<DiffEntry>,
) {
    if opts.max_depth >= 0 && depth > opts.max_depth {
        return;
    }

    match (left, right) {
        (Value::Object(l), Value::Object(r)) => diff_object(l, r, path, depth, opts, out),
        (Value::Array(l), Value::Array(r)) => {
            let mut ctx = MatchContext {
                path,
                depth,
                opts,
                out,
            };
            match_by_index(l, r, &mut ctx);
        }
        (l, r) if kind(l) == kind(r) => {
            if l != r {
                out.push(DiffEntry::Modified {
                    path: path.to_string(),
                    left: l.clone(),
                    right: r.clone(),
                });
            } else if opts.include_identical {
                out.push(DiffEntry::Identical {
                    path: path.to_string(),
                });
            }
        }
        (l, r) => out.push(DiffEntry::Structural {
            path: path.to_string(),
            description: format!("type mismatch: left={} right={}", kind(l), kind(r)),
        }),
    }
}

fn diff_object(
    left: &Map<String, Value>,
    right: &Map<String, Value>,
    path: &str,
    depth: i32,
    opts: &DiffOptions,
    out: &mut Vec<DiffEntry>,
) {
    let mut keys: Vec<&String> = left.keys().collect();
    keys.extend(right.keys().filter(|k| !left.contains_key(*k)));

    for key in keys {
        if opts.ignore_keys.iter().any(|ignored| ignored == key) {
            continue;
        }
        let child_path = format!("{path}.{key}");
        match (left.get(key), right.get(key)) {
            (Some(Value::Array(l)), Some(Value::Array(r))) => {
                let mut ctx = MatchContext {
                    path: &child_path,
                    depth: depth + 1,
                    opts,
                    out,
                };
                match opts.key_fields.get(key) {
                    Some(field) => match_by_key(field, l, r, &mut ctx),
                    None => match_by_index(l, r, &mut ctx),
                }
            }
            (Some(l), Some(r)) => diff_value(l, r, &child_path, depth + 1, opts, out),
            (Some(l), None) => out.push(DiffEntry::OnlyLeft {
                path: child_path,
                value: l.clone(),
            }),
            (None, Some(r)) => out.push(DiffEntry::OnlyRight {
                path: child_path,
                value: r.clone(),
            }),
            (None, None) => {}
        }
    }
}

struct MatchContext<'a, 'b> {
    path: &'a str,
    depth: i32,
    opts: &'a DiffOptions,
    out: &'b mut Vec<DiffEntry>,
}

fn match_by_index(left: &[Value], right: &[Value], ctx: &mut MatchContext<'_, '_>) {
    let max = left.len().max(right.len());
    for i in 0..max {
        let child_path = format!("{}[{}]", ctx.path, i + 1);
        match (left.get(i), right.get(i)) {
            (Some(l), Some(r)) => diff_value(l, r, &child_path, ctx.depth + 1, ctx.opts, ctx.out),
            (Some(l), None) => ctx.out.push(DiffEntry::OnlyLeft {
                path: child_path,
                value: l.clone(),
            }),
            (None, Some(r)) => ctx.out.push(DiffEntry::OnlyRight {
                path: child_path,
                value: r.clone(),
            }),
            (None, None) => {}
        }
    }
}

fn match_by_key(key_field: &str, left: &[Value], right: &[Value], ctx: &mut MatchContext<'_, '_>) {
    let right_keys: Vec<Option<String>> = right.iter().map(|v| element_key(v, key_field)).collect();
    let mut used_right: HashSet<usize> = HashSet::new();

    for (left_idx, left_value) in left.iter().enumerate() {
        let left_key = element_key(left_value, key_field);
        let child_path = match &left_key {
            Some(key) => format!("{}[{key}]", ctx.path),
            None => format!("{}[{}]", ctx.path, left_idx + 1),
        };

        let matched_right = left_key.as_ref().and_then(|left_key| {
            (0..right_keys.len()).find(|idx| {
                !used_right.contains(idx) && right_keys[*idx].as_ref() == Some(left_key)
            })
        });

        match matched_right {
            Some(right_idx) => {
                used_right.insert(right_idx);
                diff_value(
                    left_value,
                    &right[right_idx],
                    &child_path,
                    ctx.depth + 1,
                    ctx.opts,
                    ctx.out,
                );
            }
            None => ctx.out.push(DiffEntry::OnlyLeft {
                path: child_path,
                value: left_value.clone(),
            }),
        }
    }

    for (right_idx, right_value) in right.iter().enumerate() {
        if used_right.contains(&right_idx) {
            continue;
        }
        let child_path = match &right_keys[right_idx] {
            Some(key) => format!("{}[{key}]", ctx.path),
            None => format!("{}[{}]", ctx.path, right_idx + 1),
        };
        ctx.out.push(DiffEntry::OnlyRight {
            path: child_path,
            value: right_value.clone(),
        });
    }
}

fn element_key(value: &Value, key_field: &str) -> Option<String> {
    match value.get(key_field)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

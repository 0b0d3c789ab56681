use serde::Serialize;
use serde_json::Value;

/// A single diff outcome for a document path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DiffEntry {
    /// Value is present in both documents and equal.
    Identical { path: String },
    /// Scalar value differs between the documents.
    Modified {
        path: String,
        left: Value,
        right: Value,
    },
    /// Value only in the left document.
    OnlyLeft { path: String, value: Value },
    /// Value only in the right document.
    OnlyRight { path: String, value: Value },
    /// The two sides hold values of different JSON types.
    Structural { path: String, description: String },
}

impl DiffEntry {
    pub fn path(&self) -> &str {
        match self {
            Self::Identical { path }
            | Self::Modified { path, .. }
            | Self::OnlyLeft { path, .. }
            | Self::OnlyRight { path, .. }
            | Self::Structural { path, .. } => path,
        }
    }

    /// Whether the entry reports an actual difference.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Identical { .. })
    }
}

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// What happened to a single target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Text changed and was written (or would be, in a dry run).
    Changed,
    /// Nothing matched; the file was not touched.
    Unchanged,
    /// The file does not exist and was skipped.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: Utf8PathBuf,
    pub status: FileStatus,

    /// Ids of the rewrites that changed the text, in pipeline order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewrites: Vec<String>,

    /// Whether the new text actually reached the disk.
    #[serde(default)]
    pub written: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}

impl FileOutcome {
    pub fn missing(path: Utf8PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::Missing,
            rewrites: vec![],
            written: false,
            sha256_before: None,
            sha256_after: None,
        }
    }
}

/// Result of a single literal substitution over one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceOutcome {
    pub schema: String,
    pub path: Utf8PathBuf,
    pub from: String,
    pub to: String,
    /// Occurrences of `from` before the substitution; equals the number replaced.
    pub occurrences_before: u64,
    pub occurrences_after: u64,
    pub written: bool,
}

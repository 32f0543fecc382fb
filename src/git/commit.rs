//! Parsed commit records

use serde::{Deserialize, Serialize};

/// Line counts for a single file touched by a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path of the file before the commit
    pub path: String,
    /// New path when the commit moved the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_dest: Option<String>,
    pub lines_added: u64,
    pub lines_removed: u64,
}

/// A commit with its author metadata and per-file diff stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full revision hash; the cache key
    pub hash: String,
    pub short_hash: String,
    pub is_merge: bool,
    pub author_name: String,
    pub author_email: String,
    /// Author date in strict ISO 8601
    pub date: String,
    #[serde(default)]
    pub file_diffs: Vec<FileDiff>,
}

impl Commit {
    /// Total lines added across all files
    pub fn lines_added(&self) -> u64 {
        self.file_diffs.iter().map(|d| d.lines_added).sum()
    }

    /// Total lines removed across all files
    pub fn lines_removed(&self) -> u64 {
        self.file_diffs.iter().map(|d| d.lines_removed).sum()
    }
}

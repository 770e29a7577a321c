//! Change set types handed to the prompt builder by its collaborators.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::null_as_default;

/// How a single file was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    #[serde(alias = "added")]
    Added,
    #[serde(alias = "modified")]
    Modified,
    #[serde(alias = "deleted")]
    Deleted,
    #[serde(alias = "moved")]
    Moved,
    #[serde(alias = "renamed")]
    Renamed,
    #[serde(alias = "copied")]
    Copied,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "Added"),
            ChangeKind::Modified => write!(f, "Modified"),
            ChangeKind::Deleted => write!(f, "Deleted"),
            ChangeKind::Moved => write!(f, "Moved"),
            ChangeKind::Renamed => write!(f, "Renamed"),
            ChangeKind::Copied => write!(f, "Copied"),
            ChangeKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Conventional commit types used as the primary change type of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
}

impl ChangeType {
    /// The conventional commit prefix, e.g. `feat`.
    pub fn code(&self) -> &'static str {
        match self {
            ChangeType::Feat => "feat",
            ChangeType::Fix => "fix",
            ChangeType::Docs => "docs",
            ChangeType::Style => "style",
            ChangeType::Refactor => "refactor",
            ChangeType::Perf => "perf",
            ChangeType::Test => "test",
            ChangeType::Build => "build",
            ChangeType::Ci => "ci",
            ChangeType::Chore => "chore",
        }
    }
}

/// The project the changes belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub branch: String,
    #[serde(default)]
    pub is_git_repository: bool,
}

/// One file touched by the change set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub kind: ChangeKind,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub lines_added: usize,
    #[serde(default)]
    pub lines_deleted: usize,
    /// One-line human summary of the change.
    #[serde(default)]
    pub summary: String,
    /// Raw diff text for this file. May be empty or very large.
    #[serde(default)]
    pub diff_content: Option<String>,
}

impl FileChange {
    /// The diff text, if there is any to show.
    pub fn diff_text(&self) -> Option<&str> {
        self.diff_content.as_deref().filter(|d| !d.is_empty())
    }
}

/// Aggregate statistics over the whole change set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStatistics {
    pub files_changed: usize,
    pub lines_added: usize,
    pub lines_deleted: usize,
    pub total_lines: usize,
    pub primary_type: ChangeType,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub complexity: u32,
    /// Language name to share of the change set, in `0.0..=1.0`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub language_distribution: BTreeMap<String, f64>,
}

/// Everything the prompt builder knows about a pending commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub project: ProjectInfo,
    pub statistics: ChangeStatistics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changes: Vec<FileChange>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: BTreeMap<String, String>,
}

//! Flattening of change set entities into the prompt document.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::context::{ChangeKind, ChangeStatistics, FileChange, ProjectInfo};
use crate::prompt::budget::DiffBudget;
use crate::prompt::diff_summary::{OMITTED_DIFF_SUMMARY, extract_diff_summary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedProject {
    pub name: String,
    pub branch: String,
    pub is_git_repository: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedStatistics {
    pub files_changed: usize,
    pub lines_added: usize,
    pub lines_deleted: usize,
    pub total_lines: usize,
    pub change_type: &'static str,
    pub scope: String,
    pub complexity: u32,
    pub language_distribution: BTreeMap<String, f64>,
}

/// One file change as it appears in the prompt.
///
/// The three diff fields are only present when the change carried diff text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedChange {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub language: String,
    pub extension: String,
    pub lines_added: usize,
    pub lines_deleted: usize,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_diff_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_truncated: Option<bool>,
}

impl ProjectedChange {
    pub fn is_truncated(&self) -> bool {
        self.is_truncated.unwrap_or(false)
    }
}

pub fn project_project(project: &ProjectInfo) -> ProjectedProject {
    ProjectedProject {
        name: project.name.clone(),
        branch: project.branch.clone(),
        is_git_repository: project.is_git_repository,
    }
}

pub fn project_statistics(stats: &ChangeStatistics) -> ProjectedStatistics {
    ProjectedStatistics {
        files_changed: stats.files_changed,
        lines_added: stats.lines_added,
        lines_deleted: stats.lines_deleted,
        total_lines: stats.total_lines,
        change_type: stats.primary_type.code(),
        scope: stats.scope.clone(),
        complexity: stats.complexity,
        language_distribution: stats.language_distribution.clone(),
    }
}

/// Project a file change, admitting its diff against `budget`.
///
/// A diff is either included whole alongside its tagged-line summary, or
/// dropped entirely and replaced by the omission marker. Never cut mid-string.
pub fn project_change(change: &FileChange, budget: &mut DiffBudget) -> ProjectedChange {
    let mut projected = ProjectedChange {
        path: change.path.clone(),
        kind: change.kind,
        language: change.language.clone(),
        extension: change.extension.clone(),
        lines_added: change.lines_added,
        lines_deleted: change.lines_deleted,
        summary: change.summary.clone(),
        diff_summary: None,
        full_diff_content: None,
        is_truncated: None,
    };

    if let Some(diff) = change.diff_text() {
        let len = diff.chars().count();
        if budget.try_admit(len) {
            projected.diff_summary = Some(extract_diff_summary(diff));
            projected.full_diff_content = Some(diff.to_string());
        } else {
            debug!(
                path = %change.path,
                len,
                remaining = budget.remaining(),
                "Diff omitted, over budget"
            );
            projected.diff_summary = Some(OMITTED_DIFF_SUMMARY.to_string());
            projected.is_truncated = Some(true);
        }
    }

    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ChangeType;

    fn change(path: &str, diff: Option<&str>) -> FileChange {
        FileChange {
            path: path.to_string(),
            kind: ChangeKind::Modified,
            language: "Rust".to_string(),
            extension: "rs".to_string(),
            lines_added: 3,
            lines_deleted: 1,
            summary: format!("Modify {path}"),
            diff_content: diff.map(String::from),
        }
    }

    #[test]
    fn test_admitted_diff_is_verbatim() {
        let diff = "@@ hunk\n[ADD]: let a = 1;\ncontext\n";
        let mut budget = DiffBudget::new(1_000);

        let projected = project_change(&change("src/a.rs", Some(diff)), &mut budget);

        assert_eq!(projected.full_diff_content.as_deref(), Some(diff));
        assert_eq!(projected.diff_summary.as_deref(), Some("[ADD]: let a = 1;"));
        assert_eq!(projected.is_truncated, None);
        assert_eq!(budget.used(), diff.len());
    }

    #[test]
    fn test_rejected_diff_is_dropped_entirely() {
        let mut budget = DiffBudget::new(5);

        let projected = project_change(&change("src/a.rs", Some("[ADD]: too long")), &mut budget);

        assert_eq!(projected.full_diff_content, None);
        assert_eq!(projected.diff_summary.as_deref(), Some(OMITTED_DIFF_SUMMARY));
        assert!(projected.is_truncated());
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn test_no_diff_fields_without_diff() {
        let mut budget = DiffBudget::new(5);
        for diff in [None, Some("")] {
            let projected = project_change(&change("src/a.rs", diff), &mut budget);
            let value = serde_json::to_value(&projected).unwrap();
            let obj = value.as_object().unwrap();
            assert!(!obj.contains_key("diff_summary"));
            assert!(!obj.contains_key("full_diff_content"));
            assert!(!obj.contains_key("is_truncated"));
        }
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn test_budget_counts_characters_not_bytes() {
        // Four characters, twelve bytes
        let diff = "日本語!";
        let mut budget = DiffBudget::new(4);
        let projected = project_change(&change("a.txt", Some(diff)), &mut budget);
        assert_eq!(projected.full_diff_content.as_deref(), Some(diff));
        assert_eq!(budget.used(), 4);
    }

    #[test]
    fn test_change_serializes_kind_as_type() {
        let mut budget = DiffBudget::default();
        let projected = project_change(&change("src/a.rs", None), &mut budget);
        let value = serde_json::to_value(&projected).unwrap();
        assert_eq!(value["type"], "MODIFIED");
        assert_eq!(value["path"], "src/a.rs");
        assert_eq!(value["summary"], "Modify src/a.rs");
    }

    #[test]
    fn test_statistics_use_type_code() {
        let stats = ChangeStatistics {
            files_changed: 2,
            lines_added: 10,
            lines_deleted: 4,
            total_lines: 14,
            primary_type: ChangeType::Refactor,
            scope: "parser".to_string(),
            complexity: 7,
            language_distribution: BTreeMap::from([("Rust".to_string(), 1.0)]),
        };
        let value = serde_json::to_value(project_statistics(&stats)).unwrap();
        assert_eq!(value["change_type"], "refactor");
        assert_eq!(value["scope"], "parser");
        assert_eq!(value["language_distribution"]["Rust"], 1.0);
    }
}

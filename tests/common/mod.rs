//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use git2::{Oid, Repository, Signature};

use commitpack::{
    AnalysisResult, ChangeCategory, ChangeKind, ChangePattern, ChangeSet, ChangeStatistics,
    ChangeType, FileChange, ProjectInfo,
};

/// A file change with the given diff text.
pub fn file_change(path: &str, diff: Option<&str>) -> FileChange {
    FileChange {
        path: path.to_string(),
        kind: ChangeKind::Modified,
        language: "Rust".to_string(),
        extension: "rs".to_string(),
        lines_added: 2,
        lines_deleted: 1,
        summary: format!("Modify {path}"),
        diff_content: diff.map(String::from),
    }
}

/// A change set wrapping `changes` with plausible project and statistics.
pub fn change_set(changes: Vec<FileChange>) -> ChangeSet {
    ChangeSet {
        project: ProjectInfo {
            name: "commitpack".to_string(),
            branch: "feat/budget".to_string(),
            is_git_repository: true,
        },
        statistics: ChangeStatistics {
            files_changed: changes.len(),
            lines_added: changes.iter().map(|c| c.lines_added).sum(),
            lines_deleted: changes.iter().map(|c| c.lines_deleted).sum(),
            total_lines: changes.iter().map(|c| c.lines_added + c.lines_deleted).sum(),
            primary_type: ChangeType::Feat,
            scope: "prompt".to_string(),
            complexity: 6,
            language_distribution: BTreeMap::from([("Rust".to_string(), 1.0)]),
        },
        changes,
        metadata: BTreeMap::new(),
    }
}

/// An analysis result over the given buckets.
pub fn analysis(buckets: Vec<(ChangeCategory, Vec<FileChange>)>) -> AnalysisResult {
    AnalysisResult {
        pattern: ChangePattern::NewFeature,
        complexity: 12,
        key_insights: vec!["Introduces a diff budget".to_string()],
        categorized_changes: buckets.into_iter().collect(),
    }
}

/// Pull the JSON document out of a structured prompt.
pub fn document_of(prompt: &str) -> serde_json::Value {
    let start = prompt.find('{').expect("prompt has no document");
    let end = prompt.rfind("\n}").expect("prompt document not closed") + 2;
    serde_json::from_str(&prompt[start..end]).expect("prompt document is not JSON")
}

/// A test git repository in a temp directory.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Stage the given files and commit them. Returns the commit OID.
    pub fn commit_files(&self, files: &[&str], message: &str) -> Oid {
        let sig = self.signature();

        let mut index = self.repo.index().expect("Failed to get index");
        for file in files {
            index.add_path(Path::new(file)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }
}

//! Per-file language detection and aggregate change statistics.

use std::collections::BTreeMap;
use std::path::Path;

use crate::context::{ChangeKind, ChangeStatistics, ChangeType, FileChange};

/// Lines of change that add one point of complexity.
const LINES_PER_COMPLEXITY_POINT: usize = 50;

/// File extension without the dot, or empty.
pub fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Human language name for a file path.
pub fn language_of(path: &str) -> &'static str {
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    match file_name.as_str() {
        "Dockerfile" => return "Dockerfile",
        "Makefile" => return "Makefile",
        _ => {}
    }

    match extension_of(path).to_lowercase().as_str() {
        "rs" => "Rust",
        "py" => "Python",
        "js" | "mjs" | "cjs" => "JavaScript",
        "ts" | "tsx" => "TypeScript",
        "java" => "Java",
        "kt" | "kts" => "Kotlin",
        "go" => "Go",
        "c" | "h" => "C",
        "cc" | "cpp" | "cxx" | "hpp" => "C++",
        "cs" => "C#",
        "rb" => "Ruby",
        "swift" => "Swift",
        "sh" | "bash" | "zsh" => "Shell",
        "md" | "markdown" => "Markdown",
        "toml" => "TOML",
        "yml" | "yaml" => "YAML",
        "json" => "JSON",
        "xml" => "XML",
        "html" | "htm" => "HTML",
        "css" | "scss" => "CSS",
        "sql" => "SQL",
        _ => "Text",
    }
}

fn is_doc(path: &str) -> bool {
    path.starts_with("docs/")
        || matches!(extension_of(path).as_str(), "md" | "markdown" | "rst" | "txt" | "adoc")
}

fn is_test(path: &str) -> bool {
    path.starts_with("tests/")
        || path.contains("/tests/")
        || path.contains("_test.")
        || path.contains(".test.")
        || path.contains(".spec.")
}

fn is_ci(path: &str) -> bool {
    path.starts_with(".github/") || path.starts_with(".gitlab-ci") || path.starts_with(".circleci/")
}

fn is_build(path: &str) -> bool {
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    matches!(
        file_name.as_str(),
        "Cargo.toml"
            | "Cargo.lock"
            | "package.json"
            | "package-lock.json"
            | "build.gradle"
            | "pom.xml"
            | "Makefile"
            | "Dockerfile"
    )
}

/// Guess the conventional type that best describes all changes.
pub fn infer_change_type(changes: &[FileChange]) -> ChangeType {
    if changes.is_empty() {
        return ChangeType::Chore;
    }

    let all = |pred: fn(&str) -> bool| changes.iter().all(|c| pred(&c.path));

    if all(is_doc) {
        ChangeType::Docs
    } else if all(is_test) {
        ChangeType::Test
    } else if all(is_ci) {
        ChangeType::Ci
    } else if all(is_build) {
        ChangeType::Build
    } else if changes.iter().any(|c| c.kind == ChangeKind::Added) {
        ChangeType::Feat
    } else if changes
        .iter()
        .all(|c| matches!(c.kind, ChangeKind::Renamed | ChangeKind::Moved))
    {
        ChangeType::Refactor
    } else {
        ChangeType::Chore
    }
}

/// Shared module directory of all changes, e.g. `auth` for `src/auth/*`.
///
/// Empty when the changes span more than one module.
pub fn infer_scope(changes: &[FileChange]) -> String {
    let mut scopes = changes.iter().map(|c| {
        let mut dirs: Vec<&str> = c.path.split('/').collect();
        dirs.pop();
        if dirs.first() == Some(&"src") {
            dirs.remove(0);
        }
        dirs.first().copied().unwrap_or("")
    });

    match scopes.next() {
        Some(first) if scopes.all(|s| s == first) => first.to_string(),
        _ => String::new(),
    }
}

/// Aggregate statistics for a list of changes.
pub fn compute_statistics(changes: &[FileChange]) -> ChangeStatistics {
    let lines_added: usize = changes.iter().map(|c| c.lines_added).sum();
    let lines_deleted: usize = changes.iter().map(|c| c.lines_deleted).sum();
    let total_lines = lines_added + lines_deleted;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for change in changes {
        *counts.entry(change.language.clone()).or_default() += 1;
    }
    let language_distribution = counts
        .into_iter()
        .map(|(language, count)| (language, count as f64 / changes.len() as f64))
        .collect();

    let complexity = changes.len() + total_lines / LINES_PER_COMPLEXITY_POINT;

    ChangeStatistics {
        files_changed: changes.len(),
        lines_added,
        lines_deleted,
        total_lines,
        primary_type: infer_change_type(changes),
        scope: infer_scope(changes),
        complexity: u32::try_from(complexity).unwrap_or(u32::MAX),
        language_distribution,
    }
}

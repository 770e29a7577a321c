//! Change set collection from the working tree using git2.

use std::path::Path;

use git2::{Delta, Diff, DiffFindOptions, DiffOptions, ErrorCode, Patch, Repository, Tree};
use tracing::{debug, warn};

use crate::collect::stats::{compute_statistics, extension_of, language_of};
use crate::context::{ChangeKind, ChangeSet, FileChange, ProjectInfo};
use crate::error::CollectError;

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// `Ok(Some(tree))` for repos with a valid HEAD, or `Err(CollectError::DiffFailed)`
/// for real errors (corrupt HEAD, permission issues, missing objects).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, CollectError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(CollectError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(CollectError::DiffFailed)?;
    Ok(Some(tree))
}

/// Current branch name, including the unborn branch of an empty repo.
fn branch_name(repo: &Repository) -> String {
    if let Ok(head) = repo.head()
        && let Some(name) = head.shorthand()
    {
        return name.to_string();
    }

    repo.find_reference("HEAD")
        .ok()
        .and_then(|r| r.symbolic_target().map(String::from))
        .map(|target| target.trim_start_matches("refs/heads/").to_string())
        .unwrap_or_else(|| "HEAD".to_string())
}

fn project_info(repo: &Repository) -> ProjectInfo {
    let name = repo
        .workdir()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "repository".to_string());

    ProjectInfo {
        name,
        branch: branch_name(repo),
        is_git_repository: true,
    }
}

/// Open the repository at `path` and collect its pending changes.
pub fn collect_from_path(path: &Path) -> Result<ChangeSet, CollectError> {
    let repo = Repository::discover(path).map_err(CollectError::OpenRepository)?;
    collect_change_set(&repo)
}

/// Collect all pending changes (staged, unstaged and untracked) as a change set.
///
/// Each file carries its own diff in tagged-line form, so the prompt builder
/// can admit or drop it independently of the others.
pub fn collect_change_set(repo: &Repository) -> Result<ChangeSet, CollectError> {
    let head_tree = resolve_head_tree(repo)?;

    let mut opts = DiffOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .show_untracked_content(true);
    let mut diff = repo
        .diff_tree_to_workdir_with_index(head_tree.as_ref(), Some(&mut opts))
        .map_err(CollectError::DiffFailed)?;

    let mut find_opts = DiffFindOptions::new();
    find_opts.renames(true);
    diff.find_similar(Some(&mut find_opts))
        .map_err(CollectError::DiffFailed)?;

    let changes = collect_file_changes(&diff)?;
    if changes.is_empty() {
        return Err(CollectError::NoChanges);
    }

    debug!(files = changes.len(), "Collected working tree changes");

    Ok(ChangeSet {
        project: project_info(repo),
        statistics: compute_statistics(&changes),
        changes,
        metadata: Default::default(),
    })
}

fn change_kind(status: Delta) -> ChangeKind {
    match status {
        Delta::Added | Delta::Untracked => ChangeKind::Added,
        Delta::Modified => ChangeKind::Modified,
        Delta::Deleted => ChangeKind::Deleted,
        Delta::Renamed => ChangeKind::Renamed,
        Delta::Copied => ChangeKind::Copied,
        _ => ChangeKind::Unknown,
    }
}

/// Build one [`FileChange`] per delta, in diff order.
fn collect_file_changes(diff: &Diff<'_>) -> Result<Vec<FileChange>, CollectError> {
    let mut changes = Vec::new();

    for (idx, delta) in diff.deltas().enumerate() {
        let kind = change_kind(delta.status());

        let new_path = delta
            .new_file()
            .path()
            .map(|p| p.to_string_lossy().to_string());
        let old_path = delta
            .old_file()
            .path()
            .map(|p| p.to_string_lossy().to_string());
        let path = new_path.or_else(|| old_path.clone()).unwrap_or_default();
        if path.is_empty() {
            continue;
        }

        let (diff_content, lines_added, lines_deleted) = match Patch::from_diff(diff, idx) {
            Ok(Some(mut patch)) => {
                let (_, added, deleted) = patch.line_stats().map_err(CollectError::DiffFailed)?;
                let text = tagged_patch_text(&mut patch, kind, old_path.as_deref(), &path);
                (Some(text), added, deleted)
            }
            Ok(None) => (None, 0, 0),
            Err(e) => {
                warn!(path = %path, "Failed to build patch: {e}");
                (None, 0, 0)
            }
        };

        let summary = match (kind, old_path.as_deref()) {
            (ChangeKind::Renamed, Some(old)) if old != path => {
                format!("Renamed {old} -> {path}")
            }
            _ => format!("{kind} {path} (+{lines_added}/-{lines_deleted})"),
        };

        changes.push(FileChange {
            language: language_of(&path).to_string(),
            extension: extension_of(&path),
            path,
            kind,
            lines_added,
            lines_deleted,
            summary,
            diff_content,
        });
    }

    Ok(changes)
}

/// Render a patch as tagged lines.
///
/// Additions become `[ADD]:`, removals `[DELETE]:` and a rename opens with a
/// `[MOVE]:` line. Hunk headers and context lines are kept untagged.
fn tagged_patch_text(
    patch: &mut Patch<'_>,
    kind: ChangeKind,
    old_path: Option<&str>,
    path: &str,
) -> String {
    let mut text = String::new();

    if kind == ChangeKind::Renamed
        && let Some(old) = old_path
    {
        text.push_str(&format!("[MOVE]: {old} -> {path}\n"));
    }

    let result = patch.print(&mut |_delta, _hunk, line| {
        let content = String::from_utf8_lossy(line.content());
        let content = content.trim_end_matches(['\n', '\r']);
        match line.origin() {
            '+' => text.push_str(&format!("[ADD]: {content}\n")),
            '-' => text.push_str(&format!("[DELETE]: {content}\n")),
            ' ' => text.push_str(&format!(" {content}\n")),
            'H' => text.push_str(&format!("{content}\n")),
            // File headers and end-of-file markers
            _ => {}
        }
        true
    });

    if let Err(e) = result {
        warn!(path = %path, "Failed to render patch text: {e}");
    }

    text
}

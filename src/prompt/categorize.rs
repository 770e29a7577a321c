//! Grouping of projected changes for the prompt's changes section.

use std::collections::{BTreeMap, HashMap};

use serde::ser::{Serialize, Serializer};
use tracing::warn;

use crate::context::{AnalysisResult, FileChange};
use crate::prompt::budget::DiffBudget;
use crate::prompt::projector::{ProjectedChange, project_change};

/// The changes section of the prompt document.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangesSection {
    /// Category key to members, in category order then input order.
    Categorized(Vec<(String, Vec<ProjectedChange>)>),
    /// Path to change, ordered by path.
    ByPath(BTreeMap<String, ProjectedChange>),
}

impl ChangesSection {
    /// All projected changes in rendering order.
    pub fn changes(&self) -> Vec<&ProjectedChange> {
        match self {
            ChangesSection::Categorized(buckets) => {
                buckets.iter().flat_map(|(_, changes)| changes.iter()).collect()
            }
            ChangesSection::ByPath(by_path) => by_path.values().collect(),
        }
    }
}

impl Serialize for ChangesSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChangesSection::Categorized(buckets) => {
                serializer.collect_map(buckets.iter().map(|(key, changes)| (key, changes)))
            }
            ChangesSection::ByPath(by_path) => by_path.serialize(serializer),
        }
    }
}

/// Project changes bucketed by the analyzer's categories.
///
/// Buckets are visited in category order and members in the analyzer's order,
/// which is also the order the diff budget is spent in. Empty buckets are
/// left out. Changes the analyzer did not place in any bucket are not added.
pub fn categorize_changes(
    analysis: &AnalysisResult,
    all_changes: &[FileChange],
    budget: &mut DiffBudget,
) -> ChangesSection {
    let missing = analysis.uncategorized(all_changes);
    if !missing.is_empty() {
        let paths: Vec<&str> = missing.iter().map(|c| c.path.as_str()).collect();
        warn!(
            count = paths.len(),
            "Analysis left changes uncategorized, they will not appear in the prompt: {}",
            paths.join(", ")
        );
    }

    let buckets = analysis
        .categorized_changes
        .iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(category, members)| {
            let projected = members
                .iter()
                .map(|change| project_change(change, budget))
                .collect();
            (category.key().to_string(), projected)
        })
        .collect();

    ChangesSection::Categorized(buckets)
}

/// Project every change in input order and key the results by path.
///
/// A repeated path keeps only its last entry. Earlier entries for that path
/// are skipped before projection and spend no budget.
pub fn key_by_path(changes: &[FileChange], budget: &mut DiffBudget) -> ChangesSection {
    let mut last_index = HashMap::new();
    for (idx, change) in changes.iter().enumerate() {
        if last_index.insert(change.path.as_str(), idx).is_some() {
            warn!(path = %change.path, "Duplicate path in change set, keeping the last entry");
        }
    }

    let by_path = changes
        .iter()
        .enumerate()
        .filter(|(idx, change)| last_index.get(change.path.as_str()) == Some(idx))
        .map(|(_, change)| (change.path.clone(), project_change(change, budget)))
        .collect();

    ChangesSection::ByPath(by_path)
}

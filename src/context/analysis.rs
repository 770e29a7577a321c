//! Semantic analysis results supplied by an external analyzer.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::context::change::FileChange;
use crate::context::null_as_default;

/// Overall shape of a change set as detected by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangePattern {
    NewFeature,
    BugFix,
    Refactoring,
    Documentation,
    Testing,
    Configuration,
    Dependencies,
    Styling,
    Mixed,
    /// Any pattern this crate does not know about
    #[serde(other)]
    Unknown,
}

impl ChangePattern {
    /// Upper snake-case identifier used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ChangePattern::NewFeature => "NEW_FEATURE",
            ChangePattern::BugFix => "BUG_FIX",
            ChangePattern::Refactoring => "REFACTORING",
            ChangePattern::Documentation => "DOCUMENTATION",
            ChangePattern::Testing => "TESTING",
            ChangePattern::Configuration => "CONFIGURATION",
            ChangePattern::Dependencies => "DEPENDENCIES",
            ChangePattern::Styling => "STYLING",
            ChangePattern::Mixed => "MIXED",
            ChangePattern::Unknown => "UNKNOWN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChangePattern::NewFeature => "New functionality added",
            ChangePattern::BugFix => "Fixes incorrect behavior",
            ChangePattern::Refactoring => "Code restructured without behavior change",
            ChangePattern::Documentation => "Documentation updates",
            ChangePattern::Testing => "Test additions or changes",
            ChangePattern::Configuration => "Configuration changes",
            ChangePattern::Dependencies => "Dependency updates",
            ChangePattern::Styling => "Formatting and style changes",
            ChangePattern::Mixed => "Multiple unrelated concerns",
            ChangePattern::Unknown => "Unclassified changes",
        }
    }
}

/// Semantic bucket a file change is placed in.
///
/// Declaration order is the order buckets appear in the prompt. Identifiers
/// are matched case-insensitively; anything unrecognized becomes
/// [`ChangeCategory::Custom`] and sorts after the known categories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeCategory {
    Core,
    Api,
    Ui,
    Tests,
    Docs,
    Config,
    Build,
    Resources,
    Other,
    /// Lower-cased identifier of a category outside the known set
    Custom(String),
}

impl ChangeCategory {
    /// Parse an analyzer identifier, ignoring case.
    pub fn from_identifier(identifier: &str) -> Self {
        let key = identifier.to_lowercase();
        match key.as_str() {
            "core" => ChangeCategory::Core,
            "api" => ChangeCategory::Api,
            "ui" => ChangeCategory::Ui,
            "tests" => ChangeCategory::Tests,
            "docs" => ChangeCategory::Docs,
            "config" => ChangeCategory::Config,
            "build" => ChangeCategory::Build,
            "resources" => ChangeCategory::Resources,
            "other" => ChangeCategory::Other,
            _ => ChangeCategory::Custom(key),
        }
    }

    /// Lower-cased identifier used as the bucket key.
    pub fn key(&self) -> &str {
        match self {
            ChangeCategory::Core => "core",
            ChangeCategory::Api => "api",
            ChangeCategory::Ui => "ui",
            ChangeCategory::Tests => "tests",
            ChangeCategory::Docs => "docs",
            ChangeCategory::Config => "config",
            ChangeCategory::Build => "build",
            ChangeCategory::Resources => "resources",
            ChangeCategory::Other => "other",
            ChangeCategory::Custom(key) => key,
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for ChangeCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for ChangeCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let identifier = String::deserialize(deserializer)?;
        Ok(ChangeCategory::from_identifier(&identifier))
    }
}

/// Category buckets keyed by category.
pub type CategorizedChanges = BTreeMap<ChangeCategory, Vec<FileChange>>;

/// Category map whose keys may repeat once case is folded.
///
/// Buckets that resolve to the same category are concatenated in the order
/// they appear, so `"core"` and `"CORE"` both survive. A `null` bucket is empty.
struct MergedBuckets(CategorizedChanges);

impl<'de> Deserialize<'de> for MergedBuckets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BucketVisitor;

        impl<'de> Visitor<'de> for BucketVisitor {
            type Value = MergedBuckets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category to file changes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut buckets = CategorizedChanges::new();
                while let Some((category, members)) =
                    map.next_entry::<ChangeCategory, Option<Vec<FileChange>>>()?
                {
                    buckets
                        .entry(category)
                        .or_default()
                        .extend(members.unwrap_or_default());
                }
                Ok(MergedBuckets(buckets))
            }
        }

        deserializer.deserialize_map(BucketVisitor)
    }
}

fn merge_buckets<'de, D>(deserializer: D) -> Result<CategorizedChanges, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MergedBuckets>::deserialize(deserializer)?
        .map(|merged| merged.0)
        .unwrap_or_default())
}

/// Output of the semantic analyzer for one change set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub pattern: ChangePattern,
    pub complexity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_insights: Vec<String>,
    /// Category to member changes. Buckets are expected to partition the
    /// change set; empty buckets are allowed and skipped when rendering.
    #[serde(default, deserialize_with = "merge_buckets")]
    pub categorized_changes: CategorizedChanges,
}

impl AnalysisResult {
    /// Human label for [`AnalysisResult::complexity`].
    pub fn complexity_level(&self) -> &'static str {
        match self.complexity {
            0..=5 => "simple",
            6..=15 => "moderate",
            16..=30 => "complex",
            _ => "very complex",
        }
    }

    /// Changes from `all` that no category mentions, in input order.
    pub fn uncategorized<'a>(&self, all: &'a [FileChange]) -> Vec<&'a FileChange> {
        let categorized: HashSet<&str> = self
            .categorized_changes
            .values()
            .flatten()
            .map(|c| c.path.as_str())
            .collect();
        all.iter()
            .filter(|c| !categorized.contains(c.path.as_str()))
            .collect()
    }
}

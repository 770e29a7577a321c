//! Change set and analysis types consumed by the prompt builder.

pub mod analysis;
pub mod change;

use serde::{Deserialize, Deserializer};

pub use analysis::{AnalysisResult, CategorizedChanges, ChangeCategory, ChangePattern};
pub use change::{ChangeKind, ChangeSet, ChangeStatistics, ChangeType, FileChange, ProjectInfo};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

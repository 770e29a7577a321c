//! The structured document embedded in the prompt.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::context::AnalysisResult;
use crate::error::PromptError;
use crate::prompt::categorize::ChangesSection;
use crate::prompt::projector::{ProjectedProject, ProjectedStatistics};

/// Analyzer findings as shown to the model. Empty without analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_insights: Option<Vec<String>>,
}

impl AnalysisBlock {
    pub fn from_analysis(analysis: Option<&AnalysisResult>) -> Self {
        match analysis {
            Some(analysis) => Self {
                pattern: Some(analysis.pattern.name()),
                pattern_description: Some(analysis.pattern.description()),
                complexity: Some(analysis.complexity),
                complexity_level: Some(analysis.complexity_level()),
                key_insights: Some(analysis.key_insights.clone()),
            },
            None => Self::default(),
        }
    }
}

/// Full prompt document. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedDocument {
    pub analysis: AnalysisBlock,
    pub project: ProjectedProject,
    pub statistics: ProjectedStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorized_changes: Option<ChangesSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<ChangesSection>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ProjectedDocument {
    /// The changes section, whichever key it lives under.
    pub fn changes_section(&self) -> Option<&ChangesSection> {
        self.categorized_changes.as_ref().or(self.changes.as_ref())
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, PromptError> {
        serde_json::to_string_pretty(self).map_err(PromptError::SerializationFailed)
    }
}

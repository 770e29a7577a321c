//! Entry points that turn a change set into a commit message prompt.

use tracing::debug;

use crate::context::{AnalysisResult, ChangeSet};
use crate::error::PromptError;
use crate::prompt::budget::{DEFAULT_MAX_DIFF_CHARS, DiffBudget};
use crate::prompt::categorize::{categorize_changes, key_by_path};
use crate::prompt::document::{AnalysisBlock, ProjectedDocument};
use crate::prompt::projector::{project_project, project_statistics};
use crate::prompt::template::{PromptTemplate, render_simple};

/// Prompt builder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptConfig {
    /// Ceiling on verbatim diff characters per prompt.
    pub max_diff_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
        }
    }
}

/// Which kind of prompt to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// JSON document wrapped in the builder's template, with budgeted diffs.
    #[default]
    Structured,
    /// Plain-text summary list without diffs.
    Simple,
}

/// How the diff budget was spent during one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetReport {
    /// Changes whose full diff was included.
    pub admitted: usize,
    /// Changes whose diff was omitted for size.
    pub truncated: usize,
    /// Diff characters included.
    pub used: usize,
    pub ceiling: usize,
}

/// Builds commit message prompts for one (optional) analysis result.
///
/// The template is fixed at construction. The builder keeps no state between
/// builds: every call starts from a fresh [`DiffBudget`], so a shared
/// `&PromptBuilder` can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    analysis: Option<AnalysisResult>,
    template: PromptTemplate,
    config: PromptConfig,
}

impl PromptBuilder {
    pub fn new(analysis: Option<AnalysisResult>) -> Self {
        let template = PromptTemplate::for_analysis(analysis.as_ref());
        Self {
            analysis,
            template,
            config: PromptConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PromptConfig) -> Self {
        self.config = config;
        self
    }

    pub fn template(&self) -> PromptTemplate {
        self.template
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Build the prompt in the given mode.
    pub fn build_with_mode(
        &self,
        change_set: &ChangeSet,
        mode: BuildMode,
    ) -> Result<String, PromptError> {
        match mode {
            BuildMode::Structured => self.build(change_set),
            BuildMode::Simple => Ok(self.build_simple(change_set)),
        }
    }

    /// Build the structured prompt: budgeted JSON document plus instructions.
    pub fn build(&self, change_set: &ChangeSet) -> Result<String, PromptError> {
        let (document, report) = self.build_document(change_set);
        let json = document.to_json()?;
        let prompt = self.template.render(&json);

        debug!(
            template = ?self.template,
            admitted = report.admitted,
            truncated = report.truncated,
            used = report.used,
            ceiling = report.ceiling,
            "Commit prompt length: {} chars",
            prompt.len()
        );

        Ok(prompt)
    }

    /// Assemble the structured document without rendering it.
    pub fn build_document(&self, change_set: &ChangeSet) -> (ProjectedDocument, BudgetReport) {
        let mut budget = DiffBudget::new(self.config.max_diff_chars);

        let project = project_project(&change_set.project);
        let statistics = project_statistics(&change_set.statistics);

        let (categorized_changes, changes) = match &self.analysis {
            Some(analysis) => (
                Some(categorize_changes(analysis, &change_set.changes, &mut budget)),
                None,
            ),
            None => (None, Some(key_by_path(&change_set.changes, &mut budget))),
        };

        let document = ProjectedDocument {
            analysis: AnalysisBlock::from_analysis(self.analysis.as_ref()),
            project,
            statistics,
            categorized_changes,
            changes,
            metadata: change_set.metadata.clone(),
        };

        let (admitted, truncated) = document
            .changes_section()
            .map(|section| {
                section.changes().iter().fold((0, 0), |(admitted, truncated), c| {
                    (
                        admitted + usize::from(c.full_diff_content.is_some()),
                        truncated + usize::from(c.is_truncated()),
                    )
                })
            })
            .unwrap_or((0, 0));

        let report = BudgetReport {
            admitted,
            truncated,
            used: budget.used(),
            ceiling: budget.ceiling(),
        };

        (document, report)
    }

    /// Build the plain-text prompt. Diffs are never included.
    pub fn build_simple(&self, change_set: &ChangeSet) -> String {
        render_simple(change_set, self.analysis.as_ref())
    }
}

//! commitpack - Builds size-bounded commit message prompts from change sets.
//!
//! # Overview
//!
//! commitpack turns a description of pending changes (files, diffs,
//! statistics and an optional semantic analysis) into a prompt for a language
//! model. Verbatim diff content is admitted under a fixed character budget in
//! input order; diffs that do not fit are replaced by an explicit truncation
//! marker so every file still appears in the prompt.

pub mod collect;
pub mod context;
pub mod error;
pub mod input;
pub mod prompt;

// Re-export commonly used types
pub use context::{
    AnalysisResult, ChangeCategory, ChangeKind, ChangePattern, ChangeSet, ChangeStatistics,
    ChangeType, FileChange, ProjectInfo,
};
pub use error::{CollectError, InputError, PromptError};
pub use prompt::{BudgetReport, BuildMode, DiffBudget, PromptBuilder, PromptConfig, PromptTemplate};

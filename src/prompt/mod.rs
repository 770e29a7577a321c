//! Budgeted prompt construction for commit message generation.

pub mod budget;
pub mod builder;
pub mod categorize;
pub mod diff_summary;
pub mod document;
pub mod projector;
pub mod template;

pub use budget::{DEFAULT_MAX_DIFF_CHARS, DiffBudget};
pub use builder::{BudgetReport, BuildMode, PromptBuilder, PromptConfig};
pub use categorize::ChangesSection;
pub use diff_summary::{OMITTED_DIFF_SUMMARY, extract_diff_summary};
pub use document::ProjectedDocument;
pub use projector::ProjectedChange;
pub use template::PromptTemplate;

//! Instruction templates wrapped around the prompt document.

use crate::context::{AnalysisResult, ChangeSet};

/// Which instructions wrap the structured document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Analysis is available; points the model at categories and insights.
    Intelligent,
    /// No analysis; relies on statistics and file summaries.
    Baseline,
}

impl PromptTemplate {
    pub fn for_analysis(analysis: Option<&AnalysisResult>) -> Self {
        match analysis {
            Some(_) => PromptTemplate::Intelligent,
            None => PromptTemplate::Baseline,
        }
    }

    /// Wrap the serialized document in this template's instructions.
    pub fn render(&self, document_json: &str) -> String {
        match self {
            PromptTemplate::Intelligent => render_intelligent(document_json),
            PromptTemplate::Baseline => render_baseline(document_json),
        }
    }
}

fn render_intelligent(document_json: &str) -> String {
    format!(
        r#"Analyze this intelligently structured commit data and generate a conventional commit message:

{document_json}

Enhanced Requirements:
1. Use conventional commit format: type(scope): description
2. Leverage the analysis.pattern and complexity_level for better type selection
3. Use categorized_changes to understand the change structure
4. Consider key_insights for important context
5. IMPORTANT: Use full_diff_content to see actual code changes and understand developer intent
6. Write clear, concise description focusing on WHAT changed
7. Keep description under 50 characters if possible
8. Use present tense ("add" not "added")

The analysis section provides intelligent insights and full_diff_content shows actual code changes - use both to generate more accurate commit messages."#
    )
}

fn render_baseline(document_json: &str) -> String {
    format!(
        r#"Analyze this structured commit data and generate a conventional commit message:

{document_json}

Requirements:
1. Use conventional commit format: type(scope): description
2. Choose appropriate type based on change_type and file analysis
3. Use scope from statistics or infer from file paths
4. IMPORTANT: Use full_diff_content to see actual code changes and understand developer intent
5. Write clear, concise description focusing on WHAT changed
6. Keep description under 50 characters if possible
7. Use present tense ("add" not "added")

Focus on the change statistics, file summaries, and full_diff_content to determine the appropriate type and scope."#
    )
}

/// Plain-text prompt listing change summaries only.
///
/// No diff content and no budget: meant for cheap or diagnostic calls.
pub fn render_simple(change_set: &ChangeSet, analysis: Option<&AnalysisResult>) -> String {
    let stats = &change_set.statistics;
    let mut prompt = String::from("Generate a conventional commit message for these changes:\n\n");

    if let Some(analysis) = analysis {
        prompt.push_str(&format!(
            "Analysis: {} (complexity: {})\n\n",
            analysis.pattern.description(),
            analysis.complexity_level()
        ));
    }

    prompt.push_str(&format!(
        "Statistics: {} files, +{}/-{} lines, type: {}, scope: {}\n\n",
        stats.files_changed,
        stats.lines_added,
        stats.lines_deleted,
        stats.primary_type.code(),
        stats.scope
    ));

    prompt.push_str("Changes:\n");
    for change in &change_set.changes {
        prompt.push_str(&format!("- {}\n", change.summary));
    }

    prompt.push_str("\nFormat: type(scope): description");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::context::{
        ChangeKind, ChangePattern, ChangeStatistics, ChangeType, FileChange, ProjectInfo,
    };

    fn change_set() -> ChangeSet {
        ChangeSet {
            project: ProjectInfo {
                name: "demo".to_string(),
                branch: "main".to_string(),
                is_git_repository: true,
            },
            statistics: ChangeStatistics {
                files_changed: 2,
                lines_added: 12,
                lines_deleted: 3,
                total_lines: 15,
                primary_type: ChangeType::Fix,
                scope: "auth".to_string(),
                complexity: 4,
                language_distribution: BTreeMap::new(),
            },
            changes: ["Fix token refresh", "Add regression test"]
                .iter()
                .enumerate()
                .map(|(i, summary)| FileChange {
                    path: format!("src/f{i}.rs"),
                    kind: ChangeKind::Modified,
                    language: "Rust".to_string(),
                    extension: "rs".to_string(),
                    lines_added: 6,
                    lines_deleted: 1,
                    summary: summary.to_string(),
                    diff_content: Some("[MODIFY]: secret diff body".to_string()),
                })
                .collect(),
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn test_template_follows_analysis_presence() {
        let analysis = AnalysisResult {
            pattern: ChangePattern::BugFix,
            complexity: 4,
            key_insights: vec![],
            categorized_changes: BTreeMap::new(),
        };
        assert_eq!(PromptTemplate::for_analysis(Some(&analysis)), PromptTemplate::Intelligent);
        assert_eq!(PromptTemplate::for_analysis(None), PromptTemplate::Baseline);
    }

    #[test]
    fn test_intelligent_template_requirements() {
        let prompt = PromptTemplate::Intelligent.render("{}");
        assert!(prompt.contains("categorized_changes"));
        assert!(prompt.contains("key_insights"));
        assert!(prompt.contains("complexity_level"));
        assert!(prompt.contains("8. Use present tense"));
    }

    #[test]
    fn test_baseline_template_requirements() {
        let prompt = PromptTemplate::Baseline.render("{\"doc\": true}");
        assert!(prompt.contains("{\"doc\": true}"));
        assert!(prompt.contains("change_type"));
        assert!(prompt.contains("7. Use present tense"));
        assert!(!prompt.contains("8."));
        assert!(!prompt.contains("categorized_changes"));
    }

    #[test]
    fn test_simple_prompt_without_analysis() {
        let prompt = render_simple(&change_set(), None);
        assert!(prompt.starts_with("Generate a conventional commit message"));
        assert!(prompt.contains("Statistics: 2 files, +12/-3 lines, type: fix, scope: auth"));
        assert!(prompt.contains("- Fix token refresh\n- Add regression test\n"));
        assert!(prompt.ends_with("Format: type(scope): description"));
        assert!(!prompt.contains("Analysis:"));
        assert!(!prompt.contains("secret diff body"));
    }

    #[test]
    fn test_simple_prompt_with_analysis() {
        let analysis = AnalysisResult {
            pattern: ChangePattern::BugFix,
            complexity: 40,
            key_insights: vec![],
            categorized_changes: BTreeMap::new(),
        };
        let prompt = render_simple(&change_set(), Some(&analysis));
        assert!(prompt.contains("Analysis: Fixes incorrect behavior (complexity: very complex)"));
    }

    #[test]
    fn test_simple_prompt_layout() {
        let expected = "Generate a conventional commit message for these changes:\n\n\
            Statistics: 2 files, +12/-3 lines, type: fix, scope: auth\n\n\
            Changes:\n\
            - Fix token refresh\n\
            - Add regression test\n\
            \nFormat: type(scope): description";
        assert_eq!(render_simple(&change_set(), None), expected);
    }
}

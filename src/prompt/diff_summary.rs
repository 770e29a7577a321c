//! Structural summary of tagged diff text.

/// Line prefixes marking a line-level operation in the diff format.
pub const OPERATION_TAGS: [&str; 4] = ["[ADD]:", "[MODIFY]:", "[DELETE]:", "[MOVE]:"];

/// Placeholder summary used when a diff did not fit in the budget.
pub const OMITTED_DIFF_SUMMARY: &str = "(Diff omitted due to size limit)";

/// Keep only the operation-tagged lines of `diff`, in order.
///
/// Hunk headers, context and blank lines are dropped.
pub fn extract_diff_summary(diff: &str) -> String {
    diff.lines()
        .filter(|line| OPERATION_TAGS.iter().any(|tag| line.starts_with(tag)))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_tagged_lines_in_order() {
        let diff = "@@ -1,3 +1,4 @@\n[ADD]: fn new() {}\n context line\n\n[DELETE]: fn old() {}\n[MODIFY]: let x = 2;\n[MOVE]: mod a -> mod b\n";
        assert_eq!(
            extract_diff_summary(diff),
            "[ADD]: fn new() {}\n[DELETE]: fn old() {}\n[MODIFY]: let x = 2;\n[MOVE]: mod a -> mod b"
        );
    }

    #[test]
    fn test_untagged_diff_yields_empty_summary() {
        assert_eq!(extract_diff_summary("+added\n-removed\n context"), "");
    }

    #[test]
    fn test_tag_must_be_a_prefix() {
        assert_eq!(extract_diff_summary("  [ADD]: indented\nnote [ADD]: inline"), "");
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        assert_eq!(extract_diff_summary("[ADD]: value   \r\n"), "[ADD]: value");
    }

    #[test]
    fn test_crlf_lines() {
        let diff = "[ADD]: one\r\nctx\r\n[DELETE]: two\r\n";
        // `lines()` strips the `\r` of each line ending
        assert_eq!(extract_diff_summary(diff), "[ADD]: one\n[DELETE]: two");
    }
}

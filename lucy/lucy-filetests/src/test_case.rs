//! Test case files and expected IR extraction.

use std::path::{Path, PathBuf};

use crate::normalize::{Header, normalize_ir};

/// A single `.lc` test case.
///
/// The expected IR is derived from the case's own text only, once, when the
/// case is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    path: PathBuf,
    source: String,
    expected_ir: String,
}

impl TestCase {
    /// Build a case from its source text, extracting lines marked with `marker`.
    pub fn new(path: impl Into<PathBuf>, source: String, marker: &str) -> Self {
        let expected_ir = normalize_ir(&extract_expected_block(&source, marker), Header::Keep);
        Self {
            path: path.into(),
            source,
            expected_ir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used to identify the case in reports.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Expected IR with blank lines and trailing whitespace removed.
    pub fn expected_ir(&self) -> &str {
        &self.expected_ir
    }
}

/// Collect the comment-marked lines of `source`, in order, joined with newlines.
///
/// Each selected line loses its surrounding whitespace, the marker, and the one
/// separator character that follows the marker if it is whitespace. A line
/// holding only the marker contributes an empty line; normalization drops it
/// later.
pub fn extract_expected_block(source: &str, marker: &str) -> String {
    source
        .split('\n')
        .filter_map(|line| line.trim().strip_prefix(marker))
        .map(skip_separator)
        .collect::<Vec<_>>()
        .join("\n")
}

fn skip_separator(rest: &str) -> &str {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_strips_marker_and_separator() {
        let source = "# foo\nbar\n#baz";
        assert_eq!(extract_expected_block(source, "#"), "foo\nbaz");
    }

    #[test]
    fn test_extract_keeps_only_comment_lines_in_order() {
        let source = "# first\nfn main() -> i32 {\n    # second\n    return 0\n}\n# third";
        assert_eq!(extract_expected_block(source, "#"), "first\nsecond\nthird");
    }

    #[test]
    fn test_extract_marker_only_line_is_empty() {
        assert_eq!(extract_expected_block("#", "#"), "");
        assert_eq!(extract_expected_block("# ", "#"), "");
        assert_eq!(extract_expected_block("  #\t", "#"), "");
        assert_eq!(extract_expected_block("# a\n#\n# b", "#"), "a\n\nb");
    }

    #[test]
    fn test_extract_keeps_extra_indentation_after_marker() {
        assert_eq!(extract_expected_block("#   ret i32 0", "#"), "  ret i32 0");
    }

    #[test]
    fn test_extract_without_comments_is_empty() {
        assert_eq!(extract_expected_block("fn main() {}\n", "#"), "");
    }

    #[test]
    fn test_extract_multichar_marker() {
        let source = "// CHECK\n/ not this\n  //  x";
        assert_eq!(extract_expected_block(source, "//"), "CHECK\n x");
    }

    #[test]
    fn test_extract_keeps_multibyte_after_marker() {
        assert_eq!(extract_expected_block("#é foo", "#"), "é foo");
        assert_eq!(extract_expected_block("#\u{3000}foo", "#"), "foo");
    }

    #[test]
    fn test_case_drops_marker_only_lines_from_expected_ir() {
        let source = "# define i32 @f() {\n#\n#   ret i32 0\n# }\nfn f() -> i32 { 0 }\n";
        let case = TestCase::new("dir/f.lc", source.to_string(), "#");
        assert_eq!(case.expected_ir(), "define i32 @f() {\n  ret i32 0\n}");
        assert_eq!(case.name(), "f.lc");
        assert_eq!(case.path(), Path::new("dir/f.lc"));
    }
}

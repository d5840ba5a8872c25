//! Text normalization shared by expected and generated IR.
//!
//! Normalization happens in two passes:
//!
//! 1. [`normalize_ir`] optionally drops the compiler preamble, removes blank
//!    lines and trailing whitespace. Indentation survives, so this form is the
//!    one shown to humans when a test fails.
//! 2. [`canonicalize`] additionally trims leading whitespace. Both sides go
//!    through it right before comparison so hand-written expectations don't
//!    have to match the generator's indentation.

/// Number of preamble lines the compiler writes at the top of every IR file.
pub const HEADER_LINES: usize = 2;

/// Whether the first [`HEADER_LINES`] lines are compiler preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Text written by the compiler; the preamble is discarded unconditionally.
    Strip,
    /// Text with no preamble, such as an expected block extracted from comments.
    Keep,
}

/// Drop the header (if requested) and blank lines, and strip trailing whitespace.
pub fn normalize_ir(text: &str, header: Header) -> String {
    let skip = match header {
        Header::Strip => HEADER_LINES,
        Header::Keep => 0,
    };

    text.split('\n')
        .skip(skip)
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trim every line on both sides and drop blank lines.
pub fn canonicalize(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

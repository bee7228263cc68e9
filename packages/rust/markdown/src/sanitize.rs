//! Markup stripping passes for language-model context.
//!
//! Each pass is a function `&str -> String` applied in sequence.
//! Fenced blocks and inline spans are matched shortest-first.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Run every pass in order and trim the result.
pub(crate) fn run_pipeline(md: &str, code_placeholder: &str) -> String {
    let mut result = replace_fenced_code(md, code_placeholder);

    result = unwrap_inline_code(&result);
    result = strip_html_comments(&result);
    result = strip_html_tags(&result);
    result = collapse_blank_lines(&result);

    result.trim().to_string()
}

// ---------------------------------------------------------------------------
// Pass 1: Fenced code blocks
// ---------------------------------------------------------------------------

/// Replace each fenced block, fences included, with the placeholder.
///
/// A fence with no closing partner runs to end of input.
fn replace_fenced_code(md: &str, placeholder: &str) -> String {
    static FENCE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)```.*?(?:```|\z)").expect("valid regex"));

    FENCE_RE.replace_all(md, NoExpand(placeholder)).into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: Inline code
// ---------------------------------------------------------------------------

/// `` `code` `` becomes `code`.
fn unwrap_inline_code(md: &str) -> String {
    static INLINE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

    INLINE_RE.replace_all(md, "${1}").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 3: HTML comments
// ---------------------------------------------------------------------------

fn strip_html_comments(md: &str) -> String {
    static COMMENT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

    COMMENT_RE.replace_all(md, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 4: HTML tags
// ---------------------------------------------------------------------------

/// Remove angle-bracket tags, keeping the text between them.
fn strip_html_tags(md: &str) -> String {
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

    TAG_RE.replace_all(md, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 5: Blank lines
// ---------------------------------------------------------------------------

/// Collapse 3+ consecutive newlines, with any horizontal whitespace between
/// them, into exactly two.
pub(crate) fn collapse_blank_lines(md: &str) -> String {
    static MULTI_BLANK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n(?:[^\S\n]*\n){2,}").expect("valid regex"));

    MULTI_BLANK_RE.replace_all(md, "\n\n").into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

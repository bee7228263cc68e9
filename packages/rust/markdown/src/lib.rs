//! Markdown title extraction and markup stripping.
//!
//! Turns raw documentation markdown into plain readable text: fenced code is
//! replaced by a placeholder, inline code is unwrapped, HTML comments and tags
//! are removed, and runs of blank lines are collapsed.

mod sanitize;

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use docbundle_shared::{DEFAULT_CODE_PLACEHOLDER, SanitizedSegment, UNTITLED_DOCUMENT};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Options for [`sanitize_with`].
#[derive(Debug, Clone)]
pub struct SanitizeOptions {
    /// Text substituted for each fenced code block.
    pub code_placeholder: String,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            code_placeholder: DEFAULT_CODE_PLACEHOLDER.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Title extraction
// ---------------------------------------------------------------------------

/// Return the text of the first level-1 heading, or `"Untitled Document"`.
///
/// A level-1 heading is a line starting with a single `#`, then whitespace,
/// then text. `## Sub` does not qualify.
pub fn extract_title(md: &str) -> String {
    static H1_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(\S.*)$").expect("valid regex"));

    H1_RE
        .captures(md)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| UNTITLED_DOCUMENT.to_string())
}

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

/// Strip markup using the default code placeholder.
pub fn sanitize(md: &str) -> String {
    sanitize_with(md, &SanitizeOptions::default()).0
}

/// Strip markup, returning the trimmed result. An empty segment means the
/// document has nothing left to contribute.
pub fn sanitize_with(md: &str, opts: &SanitizeOptions) -> SanitizedSegment {
    let cleaned = sanitize::run_pipeline(md, &opts.code_placeholder);
    trace!(raw_len = md.len(), cleaned_len = cleaned.len(), "sanitized");
    SanitizedSegment(cleaned)
}

/// Collapse runs of 3+ newlines (with interleaved horizontal whitespace) to two.
///
/// Applying it twice gives the same result as applying it once.
pub fn collapse_blank_lines(md: &str) -> String {
    sanitize::collapse_blank_lines(md)
}

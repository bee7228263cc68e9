//! Core domain types for a documentation bundle build.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Title used when a document has no level-1 heading.
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// Replacement text for fenced code blocks.
pub const DEFAULT_CODE_PLACEHOLDER: &str = "[CODE BLOCK REMOVED]";

// ---------------------------------------------------------------------------
// SourceDocument
// ---------------------------------------------------------------------------

/// A markdown file read once from the documentation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path relative to the root, `/`-separated (e.g. `guide/setup.md`).
    pub relative_path: String,
    /// Raw file content.
    pub content: String,
    /// First level-1 heading, or [`UNTITLED_DOCUMENT`].
    pub title: String,
}

impl SourceDocument {
    /// Character count of the raw content (Unicode scalar values, not bytes).
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the raw content is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Sanitized text derived from one [`SourceDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSegment(pub String);

impl SanitizedSegment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Per-document outcomes
// ---------------------------------------------------------------------------

/// Why a document contributed nothing to the bundle. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The file was empty or whitespace only.
    Empty,
    /// Nothing was left once markup had been stripped.
    EmptyAfterSanitize,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty file"),
            Self::EmptyAfterSanitize => write!(f, "empty after sanitization"),
        }
    }
}

/// What happened to one located document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Processed,
    Skipped(SkipReason),
    /// The file could not be read; carries the error message.
    Failed(String),
}

// ---------------------------------------------------------------------------
// BuildReport
// ---------------------------------------------------------------------------

/// Summary of a completed bundle build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Documentation root that was scanned.
    pub source_dir: PathBuf,
    /// Where the bundle was written.
    pub output_path: PathBuf,
    /// Markdown files located under the root.
    pub documents_found: usize,
    /// Documents that made it into the bundle.
    pub documents_processed: usize,
    /// Documents skipped as empty.
    pub documents_skipped: usize,
    /// Documents that could not be read.
    pub documents_failed: usize,
    /// Character total reported in the footer (excludes the footer itself).
    pub total_characters: usize,
    /// Size of the written file in bytes.
    pub output_bytes: usize,
    /// Hex SHA-256 of the written file.
    pub sha256: String,
    /// Timestamp stamped into the header.
    pub generated_at: DateTime<Utc>,
    /// Wall-clock duration of the build.
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_count_counts_scalars_not_bytes() {
        let doc = SourceDocument {
            relative_path: "a.md".into(),
            content: "# Café ☕".into(),
            title: "Café ☕".into(),
        };
        assert_eq!(doc.char_count(), 8);
        assert!(doc.content.len() > 8);
    }

    #[test]
    fn whitespace_only_is_blank() {
        let doc = SourceDocument {
            relative_path: "d.md".into(),
            content: " \n\t\n".into(),
            title: UNTITLED_DOCUMENT.into(),
        };
        assert!(doc.is_blank());
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::Empty.to_string(), "empty file");
        assert_eq!(
            SkipReason::EmptyAfterSanitize.to_string(),
            "empty after sanitization"
        );
    }
}

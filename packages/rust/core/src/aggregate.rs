//! The aggregate bundle: header, framed document blocks, footer.
//!
//! Layout:
//! ```text
//! ================================================================================
//! DOCUMENTATION CONTEXT BUNDLE
//! ================================================================================
//!
//! Generated: 2026-01-01 12:00:00 UTC
//! Source Directory: docs
//! Purpose: ...
//!
//! ================================================================================
//!
//! DOCUMENT: guide/setup.md
//! Title: Setup Guide
//! File Size: 1234 characters
//! --------------------------------------------------------------------------------
//!
//! <sanitized text>
//!
//! ================================================================================
//!
//! ...
//! END OF DOCUMENTATION
//! Total Documents Processed: 2
//! Total Characters: 5678
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};

use docbundle_shared::{SanitizedSegment, SourceDocument};

/// Width of every separator rule.
pub const RULE_WIDTH: usize = 80;

/// First line of the header block.
pub const BUNDLE_TITLE: &str = "DOCUMENTATION CONTEXT BUNDLE";

/// Fixed purpose line in the header block.
pub const BUNDLE_PURPOSE: &str = "Combined project documentation for use as language model context. \
     Code blocks and markup have been removed.";

/// `strftime` format of the header timestamp (always UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ordered text segments making up one bundle.
///
/// Segments are appended in order and rendered once by [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct AggregateDocument {
    segments: Vec<String>,
    char_count: usize,
    documents: usize,
}

impl AggregateDocument {
    /// Start a bundle with its header block.
    pub fn new(source_dir: &Path, generated_at: DateTime<Utc>) -> Self {
        let mut aggregate = Self {
            segments: Vec::new(),
            char_count: 0,
            documents: 0,
        };
        aggregate.push(header_block(source_dir, generated_at));
        aggregate
    }

    /// Append one document block followed by the section separator.
    pub fn push_document(&mut self, doc: &SourceDocument, sanitized: &SanitizedSegment) {
        self.push(document_block(doc, sanitized));
        self.push(section_separator());
        self.documents += 1;
    }

    /// Number of documents appended so far.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Running character total of all segments appended so far.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Append the footer and join every segment.
    ///
    /// The footer's character total covers everything before the footer.
    pub fn finish(mut self) -> String {
        let footer = footer_block(self.documents, self.char_count);
        self.push(footer);
        self.segments.concat()
    }

    fn push(&mut self, segment: String) {
        self.char_count += segment.chars().count();
        self.segments.push(segment);
    }
}

fn rule(ch: char) -> String {
    std::iter::repeat_n(ch, RULE_WIDTH).collect()
}

fn header_block(source_dir: &Path, generated_at: DateTime<Utc>) -> String {
    let eq = rule('=');
    format!(
        "{eq}\n{BUNDLE_TITLE}\n{eq}\n\n\
         Generated: {} UTC\n\
         Source Directory: {}\n\
         Purpose: {BUNDLE_PURPOSE}\n\n\
         {eq}\n\n",
        generated_at.format(TIMESTAMP_FORMAT),
        source_dir.display(),
    )
}

fn document_block(doc: &SourceDocument, sanitized: &SanitizedSegment) -> String {
    format!(
        "DOCUMENT: {}\nTitle: {}\nFile Size: {} characters\n{}\n\n{}",
        doc.relative_path,
        doc.title,
        doc.char_count(),
        rule('-'),
        sanitized.as_str(),
    )
}

fn section_separator() -> String {
    format!("\n\n{}\n\n", rule('='))
}

fn footer_block(documents: usize, characters: usize) -> String {
    format!(
        "END OF DOCUMENTATION\n\
         Total Documents Processed: {documents}\n\
         Total Characters: {characters}\n"
    )
}

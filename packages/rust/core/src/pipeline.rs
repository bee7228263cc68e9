//! End-to-end bundle build: root → locate → read → sanitize → frame → write.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use docbundle_markdown::{SanitizeOptions, sanitize_with};
use docbundle_shared::{BuildConfig, BuildReport, DocumentOutcome, Result, SkipReason};

use crate::aggregate::AggregateDocument;
use crate::discovery::{LocatedDocument, locate_documents, read_document};
use crate::writer::write_output;

/// Progress callback for reporting build status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called once the document list is known.
    fn documents_located(&self, total: usize);
    /// Called when a document is added to the bundle.
    fn document_processed(&self, path: &str, current: usize, total: usize);
    /// Called when a document contributes nothing.
    fn document_skipped(&self, path: &str, reason: SkipReason);
    /// Called when a document cannot be read. The build continues.
    fn document_failed(&self, path: &str, error: &str);
    /// Called when the build completes.
    fn done(&self, report: &BuildReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn documents_located(&self, _total: usize) {}
    fn document_processed(&self, _path: &str, _current: usize, _total: usize) {}
    fn document_skipped(&self, _path: &str, _reason: SkipReason) {}
    fn document_failed(&self, _path: &str, _error: &str) {}
    fn done(&self, _report: &BuildReport) {}
}

/// Build the bundle, stamping the header with the current UTC time.
pub fn build_aggregate(
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    build_aggregate_at(config, Utc::now(), progress)
}

/// Build the bundle with an explicit header timestamp.
///
/// 1. Locate markdown files (fatal if the root is missing)
/// 2. Read, title, and sanitize each file; unreadable or empty files are skipped
/// 3. Frame each document and append the footer
/// 4. Write the bundle (fatal on failure)
#[instrument(skip_all, fields(source = %config.source_dir.display(), output = %config.output_path.display()))]
pub fn build_aggregate_at(
    config: &BuildConfig,
    generated_at: DateTime<Utc>,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    let start = Instant::now();
    config.validate()?;

    // --- Phase 1: Discovery ---
    progress.phase("Locating documents");
    let located = locate_documents(&config.source_dir, &config.extensions)?;
    let total = located.len();
    info!(count = total, "located markdown documents");
    progress.documents_located(total);

    // --- Phase 2: Sanitize + frame ---
    progress.phase("Processing documents");
    let opts = SanitizeOptions {
        code_placeholder: config.code_placeholder.clone(),
    };
    let mut aggregate = AggregateDocument::new(&config.source_dir, generated_at);
    let mut skipped = 0;
    let mut failed = 0;

    for (index, doc) in located.iter().enumerate() {
        match process_document(doc, &opts, &mut aggregate) {
            DocumentOutcome::Processed => {
                info!(path = %doc.relative_path, "processed");
                progress.document_processed(&doc.relative_path, index + 1, total);
            }
            DocumentOutcome::Skipped(reason) => {
                info!(path = %doc.relative_path, %reason, "skipped");
                skipped += 1;
                progress.document_skipped(&doc.relative_path, reason);
            }
            DocumentOutcome::Failed(error) => {
                warn!(path = %doc.relative_path, %error, "failed to read document, skipping");
                failed += 1;
                progress.document_failed(&doc.relative_path, &error);
            }
        }
    }

    let documents_processed = aggregate.document_count();
    let total_characters = aggregate.char_count();
    let contents = aggregate.finish();

    // --- Phase 3: Write ---
    progress.phase("Writing output");
    let meta = write_output(&config.output_path, &contents)?;

    let report = BuildReport {
        source_dir: config.source_dir.clone(),
        output_path: meta.path,
        documents_found: total,
        documents_processed,
        documents_skipped: skipped,
        documents_failed: failed,
        total_characters,
        output_bytes: meta.size_bytes,
        sha256: meta.sha256,
        generated_at,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        processed = report.documents_processed,
        skipped = report.documents_skipped,
        failed = report.documents_failed,
        characters = report.total_characters,
        path = %report.output_path.display(),
        "bundle written"
    );
    progress.done(&report);

    Ok(report)
}

/// Read, sanitize, and append one document. Read errors stay inside this call.
fn process_document(
    located: &LocatedDocument,
    opts: &SanitizeOptions,
    aggregate: &mut AggregateDocument,
) -> DocumentOutcome {
    let doc = match read_document(located) {
        Ok(doc) => doc,
        Err(e) => return DocumentOutcome::Failed(e.to_string()),
    };

    if doc.is_blank() {
        return DocumentOutcome::Skipped(SkipReason::Empty);
    }

    let sanitized = sanitize_with(&doc.content, opts);
    if sanitized.is_empty() {
        return DocumentOutcome::Skipped(SkipReason::EmptyAfterSanitize);
    }

    debug!(
        path = %doc.relative_path,
        title = %doc.title,
        raw_chars = doc.char_count(),
        "framing document"
    );
    aggregate.push_document(&doc, &sanitized);

    DocumentOutcome::Processed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

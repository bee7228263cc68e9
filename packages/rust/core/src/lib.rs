//! Core pipeline orchestration for docbundle.
//!
//! This crate ties together document discovery, markdown sanitization, and
//! bundle framing into one end-to-end build (`build_aggregate`).

pub mod aggregate;
pub mod discovery;
pub mod pipeline;
pub mod writer;

pub use aggregate::AggregateDocument;
pub use discovery::{LocatedDocument, locate_documents, read_document};
pub use pipeline::{ProgressReporter, SilentProgress, build_aggregate, build_aggregate_at};
pub use writer::{OutputMeta, write_output};

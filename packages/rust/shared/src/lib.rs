//! Shared types, error model, and configuration for docbundle.
//!
//! This crate is the foundation depended on by all other docbundle crates.
//! It provides:
//! - [`DocBundleError`] — the unified error type
//! - Domain types ([`SourceDocument`], [`SanitizedSegment`], [`BuildReport`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, DefaultsConfig, DiscoveryConfig, SanitizeConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{DocBundleError, Result};
pub use types::{
    BuildReport, DEFAULT_CODE_PLACEHOLDER, DocumentOutcome, SanitizedSegment, SkipReason,
    SourceDocument, UNTITLED_DOCUMENT,
};

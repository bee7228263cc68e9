//! Application configuration for docbundle.
//!
//! User config lives at `~/.docbundle/docbundle.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocBundleError, Result};
use crate::types::DEFAULT_CODE_PLACEHOLDER;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docbundle.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docbundle";

// ---------------------------------------------------------------------------
// Config structs (matching docbundle.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Document discovery settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Markup stripping settings.
    #[serde(default)]
    pub sanitize: SanitizeConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Documentation root to scan.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Bundle file to write.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_path: default_output_path(),
        }
    }
}

fn default_source_dir() -> String {
    "docs".into()
}
fn default_output_path() -> String {
    "docs_context.txt".into()
}

/// `[discovery]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File extensions treated as markdown, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["md".into()]
}

/// `[sanitize]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeConfig {
    /// Text substituted for each fenced code block.
    #[serde(default = "default_code_placeholder")]
    pub code_placeholder: String,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            code_placeholder: default_code_placeholder(),
        }
    }
}

fn default_code_placeholder() -> String {
    DEFAULT_CODE_PLACEHOLDER.into()
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Documentation root to scan.
    pub source_dir: PathBuf,
    /// Bundle file to write (overwritten on each run).
    pub output_path: PathBuf,
    /// Markdown extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Replacement for fenced code blocks.
    pub code_placeholder: String,
}

impl BuildConfig {
    /// Reject settings that would make every build meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.iter().all(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(DocBundleError::validation(
                "at least one markdown extension is required",
            ));
        }
        if self.code_placeholder.trim().is_empty() {
            return Err(DocBundleError::validation(
                "code_placeholder must not be empty",
            ));
        }
        Ok(())
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for BuildConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            source_dir: PathBuf::from(&config.defaults.source_dir),
            output_path: PathBuf::from(&config.defaults.output_path),
            extensions: config.discovery.extensions.clone(),
            code_placeholder: config.sanitize.code_placeholder.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docbundle/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocBundleError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docbundle/docbundle.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocBundleError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocBundleError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| DocBundleError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocBundleError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocBundleError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

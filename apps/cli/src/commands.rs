//! CLI command definitions, routing, and tracing setup.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use docbundle_core::{ProgressReporter, build_aggregate, locate_documents};
use docbundle_shared::{
    AppConfig, BuildConfig, BuildReport, SkipReason, init_config, load_config, load_config_from,
};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docbundle — turn a documentation tree into one AI-ready text file.
#[derive(Parser)]
#[command(
    name = "docbundle",
    version,
    about = "Aggregate markdown documentation into a single sanitized text file for LLM context.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.docbundle/docbundle.toml.
    #[arg(long, global = true, env = "DOCBUNDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Defaults to `build` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the documentation bundle.
    Build {
        /// Documentation root to scan.
        #[arg(short, long, env = "DOCBUNDLE_SOURCE")]
        source: Option<PathBuf>,

        /// Bundle file to write (overwritten).
        #[arg(short, long, env = "DOCBUNDLE_OUTPUT")]
        output: Option<PathBuf>,

        /// Print the build report as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// List the documents a build would include, in bundle order.
    List {
        /// Documentation root to scan.
        #[arg(short, long, env = "DOCBUNDLE_SOURCE")]
        source: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Log lines are written through `bar` so an active progress bar is cleared
/// and redrawn around each line.
pub(crate) fn init_tracing(cli: &Cli, bar: ProgressBar) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["docbundle", "docbundle_core", "docbundle_markdown", "docbundle_shared"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so `build --json` keeps stdout clean.
    let writer = BarWriter(bar);
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(writer)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .init();
        }
    }
}

/// Stderr log writer that suspends the progress bar for each write.
#[derive(Clone)]
struct BarWriter(ProgressBar);

impl Write for BarWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.suspend(|| std::io::stderr().write(buf))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for BarWriter {
    type Writer = BarWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli, bar: ProgressBar) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Build {
        source: None,
        output: None,
        json: false,
    }) {
        Command::Build {
            source,
            output,
            json,
        } => cmd_build(&config, source, output, json, bar),
        Command::List { source } => cmd_list(&config, source),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge CLI overrides on top of the loaded config.
fn build_config(
    config: &AppConfig,
    source: Option<PathBuf>,
    output: Option<PathBuf>,
) -> BuildConfig {
    let mut build = BuildConfig::from(config);
    if let Some(source) = source {
        build.source_dir = source;
    }
    if let Some(output) = output {
        build.output_path = output;
    }
    build
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_build(
    config: &AppConfig,
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
    bar: ProgressBar,
) -> Result<()> {
    let build = build_config(config, source, output);

    info!(
        source = %build.source_dir.display(),
        output = %build.output_path.display(),
        "building documentation bundle"
    );

    let reporter = CliProgress::attach(bar, !json);

    let report = build_aggregate(&build, &reporter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  Documentation bundle written!");
    println!("  Processed:  {}", report.documents_processed);
    println!("  Skipped:    {}", report.documents_skipped);
    println!("  Failed:     {}", report.documents_failed);
    println!("  Characters: {}", report.total_characters);
    println!("  Output:     {}", report.output_path.display());
    println!("  SHA-256:    {}", report.sha256);
    println!("  Time:       {}ms", report.elapsed_ms);
    println!();

    Ok(())
}

fn cmd_list(config: &AppConfig, source: Option<PathBuf>) -> Result<()> {
    let build = build_config(config, source, None);
    let documents = locate_documents(&build.source_dir, &build.extensions)?;

    for doc in &documents {
        println!("{}", doc.relative_path);
    }
    info!(count = documents.len(), source = %build.source_dir.display(), "listed documents");

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Drive the shared bar, drawing it on stderr only when `visible`.
    fn attach(bar: ProgressBar, visible: bool) -> Self {
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        if visible {
            bar.set_draw_target(ProgressDrawTarget::stderr());
        }
        Self { bar }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn documents_located(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn document_processed(&self, path: &str, _current: usize, _total: usize) {
        self.bar.set_message(path.to_string());
        self.bar.inc(1);
    }

    fn document_skipped(&self, path: &str, reason: SkipReason) {
        self.bar.set_message(format!("{path} (skipped: {reason})"));
        self.bar.inc(1);
    }

    fn document_failed(&self, path: &str, _error: &str) {
        self.bar.set_message(format!("{path} (unreadable)"));
        self.bar.inc(1);
    }

    fn done(&self, _report: &BuildReport) {
        self.bar.finish_and_clear();
    }
}

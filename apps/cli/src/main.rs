//! docbundle CLI — flatten a markdown documentation tree into one text file
//! for language model context.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::ProgressBar;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    // Shared with the log writer so log lines never tear the bar.
    let bar = ProgressBar::hidden();
    commands::init_tracing(&cli, bar.clone());
    commands::run(cli, bar)
}

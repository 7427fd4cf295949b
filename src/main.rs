//! CLI entry point for force-map analysis

use clap::Parser;
use forcemap::io::cli::{Cli, FileProcessor};

fn main() -> forcemap::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let processor = FileProcessor::from_cli(&cli)?;
    processor.run(&cli.command)
}

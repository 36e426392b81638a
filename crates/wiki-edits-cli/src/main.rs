//! wiki-edits - Fetch wiki edit histories and export per-editor statistics
//!
//! Usage:
//!   wiki-edits users [--manual NAME] [OPTIONS]     Analyse user contributions
//!   wiki-edits articles [TITLE...] [OPTIONS]       Analyse article histories
//!   wiki-edits --help                              Show help

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);
    cli::run(args)
}

fn init_logging(verbose: u8) {
    // Logs go to stderr so stdout stays clean for --json
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

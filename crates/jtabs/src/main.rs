//! jtabs CLI - Tabbed widgets for static sites.
//!
//! Provides commands for:
//! - `build`: Turn tab markers in generated HTML into tab widgets
//! - `inspect`: List the tab groups of a page
//! - `copy`: Copy a code block from a tab panel to the clipboard

mod clipboard;
mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CopyArgs, InspectArgs};
use output::Output;

/// jtabs - Tabbed widgets for static sites.
#[derive(Parser)]
#[command(name = "jtabs", version, about)]
struct Cli {
    /// Enable verbose output (per-group logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build tab widgets in one page or a whole site.
    Build(BuildArgs),
    /// Show the tab groups of a page.
    Inspect(InspectArgs),
    /// Copy a code block from a tab panel.
    Copy(CopyArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Inspect(args) => args.execute(),
        Commands::Copy(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

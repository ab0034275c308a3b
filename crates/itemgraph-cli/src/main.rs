//! Itemgraph CLI - Command-line interface for itemgraph
//!
//! Builds the item/trader relation graph from record files and inspects
//! graphs that were already written out.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "itemgraph")]
#[command(author = "Itemgraph Contributors")]
#[command(version)]
#[command(about = "Builds the item and trader relation graph", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .itemgraph/config.json with default paths
    Init {
        /// Project root (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Build the relation graph and write it as JSON
    Build {
        /// Item records (overrides config)
        #[arg(long)]
        items: Option<PathBuf>,

        /// Trader records (overrides config)
        #[arg(long)]
        traders: Option<PathBuf>,

        /// Corrections applied to item records (overrides config)
        #[arg(long)]
        corrections: Option<PathBuf>,

        /// Output file for the graph JSON (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ignore trader records even if present
        #[arg(long)]
        no_traders: bool,
    },

    /// Show statistics for a graph file
    Stats {
        /// Graph JSON written by `build`
        graph: PathBuf,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Check a graph file for invariant violations
    Validate {
        /// Graph JSON written by `build`
        graph: PathBuf,
    },

    /// Remove records that repeat an earlier name
    Dedupe {
        /// Item records
        input: PathBuf,

        /// Output file (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Build {
            items,
            traders,
            corrections,
            output,
            no_traders,
        } => commands::build(
            Path::new("."),
            &commands::BuildOptions {
                items,
                traders,
                corrections,
                output,
                no_traders,
            },
        ),
        Commands::Stats { graph, json } => commands::stats(&graph, json),
        Commands::Validate { graph } => commands::validate(&graph),
        Commands::Dedupe { input, output } => commands::dedupe(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

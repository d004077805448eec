//! GraphXT CLI - run step-by-step graph algorithms from the terminal.
//!
//! Graphs are given inline as edge arguments; the algorithm's message log is
//! streamed as it runs and its result is printed when it terminates.

mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Step-by-step graph algorithm runner.
///
/// Builds a graph from command-line edges, runs one of the built-in
/// algorithms tick by tick, and reports what it did.
#[derive(Parser)]
#[command(name = "graphxt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Suppress the message log and results
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List the available algorithms
    List,

    /// Run an algorithm to completion
    Run(RunArgs),
}

/// Arguments of the `run` command.
#[derive(Args)]
struct RunArgs {
    /// Algorithm name (see `graphxt list`)
    algorithm: String,

    /// Edge as `A>B:3` (directed) or `A-B:3` (undirected); weight defaults to 1
    #[arg(long = "edge", short = 'e')]
    edges: Vec<String>,

    /// Extra vertex with no edges
    #[arg(long = "vertex")]
    vertices: Vec<String>,

    /// Start vertex, or flow source (defaults to the first vertex)
    #[arg(long, short)]
    start: Option<String>,

    /// Flow sink
    #[arg(long)]
    sink: Option<String>,

    /// Delay between ticks in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Give up after this many ticks
    #[arg(long)]
    max_ticks: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::List => commands::list::run(cli.format, cli.quiet),
        Commands::Run(args) => commands::run::run(args, cli.format, cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

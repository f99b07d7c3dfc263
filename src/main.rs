//! Graphsync CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "graphsync")]
#[command(about = "Policy-driven one-way graph reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a target graph snapshot from a source graph snapshot
    Sync {
        /// Source graph snapshot (JSON)
        #[arg(short, long)]
        source: PathBuf,

        /// Target graph snapshot (JSON)
        #[arg(short, long)]
        target: PathBuf,

        /// Sync policy (TOML). Without one, every node and edge is merged.
        #[arg(short, long)]
        policy: Option<PathBuf>,

        /// Where to write the updated target (defaults to the target path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a summary of a graph snapshot
    Inspect {
        /// Graph snapshot (JSON)
        path: PathBuf,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "graphsync={0},graphsync_core={0},graphsync_engine={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Sync {
            source,
            target,
            policy,
            output,
            dry_run,
        } => commands::sync(source, target, policy, output, dry_run),
        Commands::Inspect { path } => commands::inspect(path),
        Commands::Version => {
            println!("Graphsync v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

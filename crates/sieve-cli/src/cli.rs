//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sieve: deterministic validation of generated dataset insights
#[derive(Parser)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate and rank candidate insights from a request file
    Validate {
        /// Path to the request JSON (candidates, statistics, columns)
        #[arg(value_name = "REQUEST")]
        request: PathBuf,

        /// Output the validated list as JSON
        #[arg(long)]
        json: bool,

        /// Show why each dropped candidate was rejected
        #[arg(long)]
        explain: bool,

        /// Ignore the request's candidates and generate them with the mock generator
        #[arg(long)]
        mock_generator: bool,

        /// Save the validated list as a new snapshot version in this directory
        #[arg(long, value_name = "DIR", requires = "dataset")]
        save_dir: Option<PathBuf>,

        /// Dataset identifier used when saving snapshots
        #[arg(long)]
        dataset: Option<String>,
    },

    /// Show stored insight snapshots
    History {
        /// Snapshot directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Dataset identifier
        #[arg(long)]
        dataset: String,

        /// Decision metric
        #[arg(long)]
        metric: String,

        /// Show a specific version instead of the latest
        #[arg(long)]
        version: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

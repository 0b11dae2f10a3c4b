//! Sieve CLI - validate and rank generated dataset insights.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging(verbose: bool) {
    let default = if verbose { "sieve=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SIEVE_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate {
            request,
            json,
            explain,
            mock_generator,
            save_dir,
            dataset,
        } => commands::validate::run(
            request,
            commands::validate::Options {
                json,
                explain,
                mock_generator,
                save_dir,
                dataset,
            },
            cli.verbose,
        ),

        Commands::History {
            dir,
            dataset,
            metric,
            version,
            json,
        } => commands::history::run(dir, dataset, metric, version, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Example: Validate generator insights from a request file.
//!
//! Usage:
//!   cargo run --example validate -- <request.json>
//!
//! Example:
//!   cargo run --example validate -- demos/retail_request.json

use std::env;
use std::path::Path;

use sieve::{InsightValidator, ValidationRequest};

fn main() -> sieve::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example validate -- <request.json>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example validate -- demos/retail_request.json");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let request = ValidationRequest::load(path)?;
    let report = request.validate(&InsightValidator::new())?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Insight Validation: {}", path.display());
    println!("{}", separator);
    println!();

    println!("## Decision metric: {}", request.stats.decision_metric);
    println!("  Candidates: {}", report.candidate_count());
    println!("  Accepted:   {}", report.insights.len());
    println!("  Rejected:   {}", report.rejections.len());
    println!();

    println!("## Ranked insights");
    for insight in &report.insights {
        println!(
            "  {:>2}. {:20} [{}] {}",
            insight.rank(),
            insight.factor(),
            insight.confidence(),
            insight.why_it_matters()
        );
    }
    println!();

    println!("## Rejections");
    for rejection in &report.rejections {
        println!(
            "  #{:<2} {:30} {}",
            rejection.input_index,
            rejection.factor.as_deref().unwrap_or("<missing>"),
            rejection.reason
        );
    }

    Ok(())
}

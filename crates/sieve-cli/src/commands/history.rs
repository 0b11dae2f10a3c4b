//! History command - show stored insight snapshots.

use std::path::PathBuf;

use colored::Colorize;
use sieve::SnapshotStore;

pub fn run(
    dir: PathBuf,
    dataset: String,
    metric: String,
    version: Option<u32>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SnapshotStore::new(&dir);
    let versions = store.versions(&dataset, &metric)?;

    let snapshot = store.load(&dataset, &metric, version)?.ok_or_else(|| {
        let which = version.map_or("latest".to_string(), |v| format!("v{}", v));
        format!(
            "No {} snapshot for {} / {} in {}",
            which,
            dataset,
            metric,
            dir.display()
        )
    })?;

    if json_output {
        let output = serde_json::json!({
            "versions": versions,
            "snapshot": snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} / {}",
        "Insight history for".cyan().bold(),
        dataset.white(),
        metric.white()
    );
    let listed: Vec<String> = versions.iter().map(|v| format!("v{}", v)).collect();
    println!("Versions: {}", listed.join(", "));
    println!();

    println!(
        "{} v{} saved {}",
        "Snapshot".bold(),
        snapshot.version,
        snapshot.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if verbose {
        println!("Fingerprint: {}", snapshot.fingerprint.dimmed());
    }
    for insight in &snapshot.insights {
        println!(
            "{:>3}. {} [{}] {}",
            insight.rank(),
            insight.factor().white().bold(),
            insight.confidence(),
            insight.why_it_matters()
        );
    }

    Ok(())
}

//! Validate command - validate and rank candidate insights.

use std::path::PathBuf;

use colored::Colorize;
use sieve::{
    Confidence, InsightPipeline, InsightSnapshot, InsightValidator, MockGenerator, SnapshotStore,
    ValidationReport, ValidationRequest,
};
use tracing::debug;

/// Flags for the validate command.
pub struct Options {
    pub json: bool,
    pub explain: bool,
    pub mock_generator: bool,
    pub save_dir: Option<PathBuf>,
    pub dataset: Option<String>,
}

pub fn run(
    request_path: PathBuf,
    options: Options,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !request_path.exists() {
        return Err(format!("File not found: {}", request_path.display()).into());
    }

    let request = ValidationRequest::load(&request_path)?;
    debug!(
        path = %request_path.display(),
        candidates = request.insights.len(),
        columns = request.columns.len(),
        "loaded request"
    );

    let report = if options.mock_generator {
        InsightPipeline::new()
            .with_generator(MockGenerator::new())
            .run(&request.stats, &request.columns)?
    } else {
        request.validate(&InsightValidator::new())?
    };

    let saved_version = match (&options.save_dir, &options.dataset) {
        (Some(dir), Some(dataset)) => {
            let snapshot = InsightSnapshot::new(
                dataset.as_str(),
                request.stats.clone(),
                request.columns.clone(),
                report.insights.clone(),
            )?;
            Some(SnapshotStore::new(dir).save(snapshot)?.version)
        }
        _ => None,
    };

    if options.json {
        let output = if options.explain {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string_pretty(&report.insights)?
        };
        println!("{}", output);
        return Ok(());
    }

    print_report(&request, &report, options.explain || verbose);

    if let (Some(version), Some(dir)) = (saved_version, &options.save_dir) {
        println!();
        println!(
            "{} v{} to {}",
            "Saved snapshot".green().bold(),
            version,
            dir.display().to_string().white()
        );
    }

    Ok(())
}

fn print_report(request: &ValidationRequest, report: &ValidationReport, explain: bool) {
    println!(
        "{} {}",
        "Validated insights for".cyan().bold(),
        request.stats.decision_metric.white()
    );
    println!(
        "Kept {} of {} candidates ({} rejected, {} hallucinated)",
        report.insights.len().to_string().white().bold(),
        report.candidate_count(),
        report.rejections.len().to_string().yellow(),
        report.hallucinations().count().to_string().red()
    );
    println!();

    if report.insights.is_empty() {
        println!("{}", "No insights survived validation.".yellow());
    }

    for insight in &report.insights {
        let confidence = match insight.confidence() {
            Confidence::High => insight.confidence().to_string().green(),
            Confidence::Medium => insight.confidence().to_string().yellow(),
            Confidence::Low => insight.confidence().to_string().normal(),
        };
        println!(
            "{:>3}. {} [{}]",
            insight.rank(),
            insight.factor().white().bold(),
            confidence
        );
        println!("     {}", insight.why_it_matters());
        if !insight.evidence().is_empty() {
            println!("     {}", insight.evidence().dimmed());
        }
    }

    if explain && !report.rejections.is_empty() {
        println!();
        println!("{}", "Rejected:".yellow().bold());
        for rejection in &report.rejections {
            println!(
                "  #{:<3} {:30} {}",
                rejection.input_index,
                rejection.factor.as_deref().unwrap_or("<missing>"),
                rejection.reason.to_string().red()
            );
        }

        println!();
        for (label, count) in report.rejection_summary() {
            println!("  {:22} {}", label, count);
        }
    }
}

//! Scan command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use colored::Colorize;
use mintguard_core::{MatchOutcome, MatcherConfig, SimilarityMatcher};
use tracing::info;

use crate::utils::{load_corpus, read_file, validate_threshold};

/// Options for a scan run.
pub struct ScanArgs {
    pub file: PathBuf,
    pub corpus: PathBuf,
    pub threshold: f64,
    pub max_results: usize,
    pub json: bool,
    pub fail_on_match: bool,
}

/// Execute the scan command.
///
/// Runs the same gate as the server's `/verify` endpoint, with a JSON catalog
/// export as the corpus.
pub async fn execute(args: ScanArgs, quiet: bool) -> Result<()> {
    validate_threshold(args.threshold)?;

    let corpus = load_corpus(&args.corpus)?;
    let content = read_file(&args.file)?;

    let config = MatcherConfig {
        threshold: args.threshold,
        max_results: args.max_results.max(1),
        ..MatcherConfig::default()
    };
    let matcher = SimilarityMatcher::new(Arc::new(corpus), config);
    let outcome = matcher.find_matches(content).await;

    info!(
        query = ?outcome.query.map(|q| q.to_hex()),
        matches = outcome.matches.len(),
        "Scan complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if !quiet {
        print_outcome(&outcome);
    }

    if args.fail_on_match && !outcome.matches.is_empty() {
        bail!("Near-duplicate found: {} match(es)", outcome.matches.len());
    }

    Ok(())
}

fn print_outcome(outcome: &MatchOutcome) {
    println!();
    let Some(query) = outcome.query else {
        println!("   {}", "No fingerprint: not a decodable image".yellow());
        return;
    };

    println!("   {} {}", "Query:".dimmed(), query);

    if outcome.matches.is_empty() {
        println!("   {}", "No near-duplicates found".green().bold());
        return;
    }

    println!(
        "   {}",
        format!("{} near-duplicate(s) found", outcome.matches.len())
            .red()
            .bold()
    );
    println!();
    for m in &outcome.matches {
        println!(
            "   {:.4}  {:>2}/64  {}  {} {}",
            m.score,
            m.distance,
            m.title.bold(),
            "owner".dimmed(),
            m.owner_id
        );
        println!("          {}", m.image_url.dimmed());
    }
}

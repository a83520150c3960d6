//! Compare command implementation.

use anyhow::{bail, Result};
use colored::Colorize;
use mintguard_core::score_from_distance;
use tracing::info;

use crate::utils::{resolve_operand, validate_threshold};

/// Execute the compare command.
///
/// Succeeds when the score reaches `threshold`, fails with a "not similar"
/// error otherwise.
pub async fn execute(a: String, b: String, threshold: f64, quiet: bool) -> Result<()> {
    validate_threshold(threshold)?;

    let left = resolve_operand(&a).await?;
    let right = resolve_operand(&b).await?;

    let distance = left.distance(right);
    let score = score_from_distance(distance);
    let similar = score >= threshold;

    info!(a = %left, b = %right, distance, score, similar, "Compared fingerprints");

    if !quiet {
        println!();
        println!("   {} {}  {}", "A:".dimmed(), left, a.dimmed());
        println!("   {} {}  {}", "B:".dimmed(), right, b.dimmed());
        println!("   {} {}/64", "Distance:".dimmed(), distance);
        println!("   {} {:.4}", "Score:".dimmed(), score);
        println!();
        if similar {
            println!("   {}", "SIMILAR".green().bold());
        } else {
            println!("   {}", "DIFFERENT".red().bold());
        }
    }

    if !similar {
        bail!(
            "Images are not similar: score {:.4} < threshold {:.4}",
            score,
            threshold
        );
    }

    Ok(())
}

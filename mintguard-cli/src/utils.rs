//! Common utility functions shared across CLI commands.

use std::path::Path;

use anyhow::{bail, Context, Result};
use mintguard_core::{Fingerprint, MemoryCorpus, PerceptualHasher};
use tracing::{debug, info};

/// Read an input file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let content =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "Read file");
    Ok(content)
}

/// Fingerprint raw bytes on a blocking thread.
pub async fn fingerprint_bytes(data: Vec<u8>) -> Result<Fingerprint> {
    let fingerprint =
        tokio::task::spawn_blocking(move || PerceptualHasher::default().hash_bytes(&data))
            .await
            .context("Fingerprint task failed")??;
    Ok(fingerprint)
}

/// Resolve a `compare` operand: an existing image file, or a hex fingerprint.
pub async fn resolve_operand(operand: &str) -> Result<Fingerprint> {
    let path = Path::new(operand);
    if !path.exists() {
        if let Ok(fingerprint) = operand.parse::<Fingerprint>() {
            debug!(operand, "Using operand as a fingerprint");
            return Ok(fingerprint);
        }
    }

    let data = read_file(path)?;
    if !PerceptualHasher::is_supported_format(&data) {
        bail!("Not an image: {}", path.display());
    }
    fingerprint_bytes(data)
        .await
        .with_context(|| format!("Failed to fingerprint {}", path.display()))
}

/// Load a JSON catalog export.
pub fn load_corpus(path: &Path) -> Result<MemoryCorpus> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
    let corpus = MemoryCorpus::from_json(&json)
        .with_context(|| format!("Failed to parse corpus file: {}", path.display()))?;
    info!(path = %path.display(), listings = corpus.len(), "Loaded corpus");
    Ok(corpus)
}

/// Reject thresholds outside [0, 1].
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        bail!("Threshold must be between 0 and 1, got {}", threshold);
    }
    Ok(())
}

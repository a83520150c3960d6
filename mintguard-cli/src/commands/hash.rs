//! Hash command implementation.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use mintguard_core::{digest, PerceptualHasher};
use tracing::warn;

use crate::utils::{fingerprint_bytes, read_file};

/// Execute the hash command.
///
/// Non-image files still get a SHA-256; the fingerprint is then absent and a
/// note says why, mirroring the server's `/hash` response.
pub async fn execute(file: PathBuf, json: bool, quiet: bool) -> Result<()> {
    let content = read_file(&file)?;
    let sha256 = digest(&content).to_hex();

    let (dhash64, note) = if PerceptualHasher::is_supported_format(&content) {
        match fingerprint_bytes(content).await {
            Ok(fingerprint) => (Some(fingerprint.to_hex()), None),
            Err(e) => {
                warn!(path = %file.display(), error = %e, "Image did not decode");
                (None, Some("image could not be decoded"))
            }
        }
    } else {
        (None, Some("not an image"))
    };

    if json {
        let mut out = serde_json::json!({
            "dhash64": dhash64,
            "sha256": sha256,
        });
        if let Some(note) = note {
            out["note"] = note.into();
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if quiet {
        println!("{} {}", dhash64.as_deref().unwrap_or("-"), sha256);
        return Ok(());
    }

    println!();
    println!("   {} {}", "File:".dimmed(), file.display());
    match &dhash64 {
        Some(hash) => println!("   {} {}", "dHash64:".dimmed(), hash.green().bold()),
        None => println!("   {} {}", "dHash64:".dimmed(), "none".yellow()),
    }
    println!("   {} {}", "SHA-256:".dimmed(), sha256);
    if let Some(note) = note {
        println!("   {} {}", "Note:".dimmed(), note.yellow());
    }

    Ok(())
}

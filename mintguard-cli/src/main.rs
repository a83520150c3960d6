//! MintGuard CLI - offline image fingerprints and near-duplicate checks.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;
mod utils;

use exit_codes::ExitCode;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  65  Images are not similar (compare) or a near-duplicate was found (scan --fail-on-match)
  66  Cannot read an input file or corpus";

#[derive(Parser)]
#[command(name = "mintguard")]
#[command(author, version, about = "Perceptual fingerprints and near-duplicate detection for images", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Print nothing but essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the 64-bit perceptual fingerprint and SHA-256 of a file
    Hash {
        /// Path to the file to fingerprint
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two images (or stored fingerprints) by Hamming distance
    Compare {
        /// First image, or a 16-character hex fingerprint
        #[arg(value_name = "A")]
        a: String,

        /// Second image, or a 16-character hex fingerprint
        #[arg(value_name = "B")]
        b: String,

        /// Minimum similarity score in [0, 1] for the images to count as similar
        #[arg(short, long, default_value_t = mintguard_core::DEFAULT_THRESHOLD)]
        threshold: f64,
    },

    /// Check an image against a JSON catalog export
    Scan {
        /// Path to the image to check
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON array of catalog listings
        #[arg(short, long, value_name = "JSON")]
        corpus: PathBuf,

        /// Minimum similarity score in [0, 1]
        #[arg(short, long, default_value_t = mintguard_core::DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Maximum number of matches to report
        #[arg(long, default_value_t = mintguard_core::DEFAULT_MAX_RESULTS)]
        max_results: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Exit with code 65 when a near-duplicate is found
        #[arg(long)]
        fail_on_match: bool,
    },
}

fn init_tracing(verbose: bool, quiet: bool, ansi: bool) {
    let default_level = if verbose {
        "mintguard=debug,mintguard_core=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Hash { file, json } => commands::hash::execute(file, json, quiet).await,
        Commands::Compare { a, b, threshold } => {
            commands::compare::execute(a, b, threshold, quiet).await
        }
        Commands::Scan {
            file,
            corpus,
            threshold,
            max_results,
            json,
            fail_on_match,
        } => {
            commands::scan::execute(
                commands::scan::ScanArgs {
                    file,
                    corpus,
                    threshold,
                    max_results,
                    json,
                    fail_on_match,
                },
                quiet,
            )
            .await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }
    let ansi = !matches!(cli.color, ColorChoice::Never);
    init_tracing(cli.verbose, cli.quiet, ansi);

    let exit = match run(cli).await {
        Ok(()) => ExitCode::success(),
        Err(err) => {
            let exit = ExitCode::from_anyhow(&err);
            if let Some(message) = &exit.message {
                eprintln!("{} {}", "error:".red().bold(), message);
            }
            exit
        }
    };

    std::process::exit(exit.code);
}

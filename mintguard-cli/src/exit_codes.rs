//! Exit codes following sysexits.h conventions.
//!
//! These codes let scripts and CI pipelines tell a failed similarity check
//! apart from a missing input or an internal error.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// The images are not similar, or a scan found a near-duplicate with
/// `--fail-on-match`.
/// Maps to EX_DATAERR from sysexits.h.
pub const CHECK_FAILED: i32 = 65;

/// Cannot open or parse an input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Classify error by inspecting the chain
        let code = if message.contains("Failed to read") || message.contains("Failed to parse") {
            INPUT_ERROR
        } else if message.contains("not similar") || message.contains("Near-duplicate found") {
            CHECK_FAILED
        } else {
            GENERAL_ERROR
        };

        Self {
            code,
            message: Some(message),
        }
    }
}

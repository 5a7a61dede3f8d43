use std::process::ExitStatus;

use thiserror::Error;

/// Failure categories surfaced to the user. Everything else (I/O, parse
/// errors) bubbles up as plain anyhow context.
#[derive(Debug, Error)]
pub enum SignError {
    /// Build directory checks that -f/--force may bypass.
    #[error("{0}")]
    Precondition(String),

    /// No -d/--build-dir given and no build directory could be found.
    #[error("no --build-dir given and no build directory found (tried ./build and .)")]
    Discovery,

    /// Required key absent from the build's generated configuration.
    #[error("build configuration is missing required key {0}")]
    MissingKey(String),

    /// The signing tool exited with a non-zero status.
    #[error("{tool} failed with {status} (see stdout/stderr for details)")]
    Tool { tool: String, status: ExitStatus },
}

//! Error types for the mediamix CLI.

use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation, filtering or configuration failure.
    #[error("{0}")]
    MediaMix(#[from] mediamix::MediaMixError),

    /// JSON encoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Argument that parsed but makes no sense.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

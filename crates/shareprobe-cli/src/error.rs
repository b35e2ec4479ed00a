//! CLI-specific error types and mappings.
//!
//! This module provides the CLI error type and the mapping from export
//! errors to exit codes and user-facing messages.

use shareprobe_export::ExportError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Any other fatal failure.
    #[error("{0}")]
    Core(String),

    /// Local I/O failure (writing output, reading input).
    #[error("IO error: {0}")]
    Io(String),

    /// Profile missing, malformed or rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The sharing endpoint could not be used.
    #[error("Sharing endpoint unavailable: {0}")]
    Unavailable(String),

    /// Interrupted by the user.
    #[error("Interrupted")]
    Cancelled,
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (reported by clap before dispatch)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    /// - 130: Terminated by Ctrl-C
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
            Self::Cancelled => 130,
        }
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        if err.is_configuration() {
            return Self::Config(err.to_string());
        }
        match err {
            ExportError::Cancelled => Self::Cancelled,
            ExportError::Credentials(_) => Self::Config(err.to_string()),
            ExportError::Connect(_) | ExportError::Discovery { .. } | ExportError::Query { .. } => {
                Self::Unavailable(err.to_string())
            }
            ExportError::TableNotFound { .. } | ExportError::NoFiles { .. } => {
                Self::Core(err.to_string())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(format!("failed to encode output: {err}"))
    }
}

//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use mcpdeck_core::{ConfigError, CoreError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument or request document error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (stdin, stdout, directory creation).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The container runtime or a provisioning script could not be run.
    #[error("Process error: {0}")]
    Process(String),

    /// An operation ran and reported failure.
    #[error("{0}")]
    Failed(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error (including failed operations)
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) | Self::Failed(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Process(_) => 71,  // EX_OSERR
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Exec(e) => Self::Process(e.to_string()),
            CoreError::Runtime(e) => Self::Process(e.to_string()),
            CoreError::Config(e) => Self::Config(e.to_string()),
            CoreError::Invalid(e) => Self::Arguments(e.to_string()),
            other @ (CoreError::Catalog(_)
            | CoreError::Settings(_)
            | CoreError::Transition(_)
            | CoreError::TargetBusy(_)) => Self::Core(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Arguments(err.to_string())
    }
}

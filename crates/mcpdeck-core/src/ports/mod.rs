//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - The command executor is the only seam to external processes
//! - No filesystem types beyond `PathBuf` in any signature
//! - Non-zero exits are results, not errors

pub mod catalog_source;
pub mod command_executor;
pub mod settings_store;

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{IdentifierError, InvalidTransition};

pub use catalog_source::CatalogSource;
pub use command_executor::{CommandExecutor, CommandOutput, CommandSpec, RunOptions};
pub use settings_store::SettingsStore;

#[cfg(test)]
pub use command_executor::MockCommandExecutor;

/// The process could not be run to completion as a normal result.
///
/// A non-zero exit is NOT an `ExecError`; it is reported through
/// [`CommandOutput::exit_code`].
#[derive(Debug, Clone, Error)]
pub enum ExecError {
    /// The process could not be spawned (missing binary, permission denied).
    #[error("Failed to launch {program}: {reason}")]
    Launch { program: String, reason: String },

    /// Combined output exceeded the caller-supplied cap.
    #[error("Output of {program} exceeded {limit} bytes")]
    OutputLimitExceeded { program: String, limit: usize },

    /// The optional deadline elapsed before the process exited.
    #[error("{program} did not finish within {after_secs}s")]
    TimedOut { program: String, after_secs: u64 },
}

/// Failures talking to the container runtime.
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    /// The listing query could not be run or reported failure.
    #[error("Container runtime unavailable: {0}")]
    Unavailable(String),

    /// A runtime command ran but reported failure.
    #[error("{command} exited with {}: {}", exit_label(.code), .stderr.trim())]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Invalid(#[from] IdentifierError),
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("code {c}"))
}

/// Catalog directory access failures.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog directory {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    #[error(transparent)]
    Invalid(#[from] IdentifierError),
}

/// Settings store failures.
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error(transparent)]
    Invalid(#[from] IdentifierError),

    /// Values are written one per line, so embedded line breaks are refused.
    #[error("Value for setting {key} must not contain line breaks")]
    InvalidValue { key: String },

    #[error("Missing required settings for {server_type}: {}", .names.join(", "))]
    MissingRequired {
        server_type: String,
        names: Vec<String>,
    },
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain. The request
/// dispatcher maps it to the `error` field of a response payload; the CLI maps
/// it to exit codes.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Invalid(#[from] IdentifierError),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    /// Another operation is already running against the same target.
    #[error("An operation is already in progress for {0}")]
    TargetBusy(String),
}

//! Engine configuration and validation.
//!
//! `FleetConfig` is plain data: the CLI fills it from flags and `MCPDECK_*`
//! environment variables, then calls [`FleetConfig::validate`] once before
//! wiring adapters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{DEFAULT_IMAGE_NAMESPACE, OperationKind};
use crate::paths::{PathError, default_catalog_dir, default_settings_dir};
use crate::ports::command_executor::DEFAULT_MAX_OUTPUT_BYTES;

/// Default container runtime CLI.
pub const DEFAULT_RUNTIME_BINARY: &str = "docker";

/// Default PowerShell host for `.ps1` scripts.
#[cfg(windows)]
pub const DEFAULT_POWERSHELL_BINARY: &str = "powershell";
#[cfg(not(windows))]
pub const DEFAULT_POWERSHELL_BINARY: &str = "pwsh";

/// Default shell for `.sh` scripts.
pub const DEFAULT_SHELL_BINARY: &str = "bash";

/// Lines of log history fetched per request.
pub const DEFAULT_LOG_TAIL_LINES: u32 = 500;

/// Upper bound accepted for `log_tail_lines`.
pub const MAX_LOG_TAIL_LINES: u32 = 100_000;

/// Settle delay after start/stop/restart/remove.
pub const DEFAULT_ACTION_SETTLE_MS: u64 = 1_000;

/// Settle delay after deploy/redeploy.
pub const DEFAULT_DEPLOY_SETTLE_MS: u64 = 2_000;

pub const DEFAULT_REFRESH_MAX_POLLS: u32 = 5;
pub const DEFAULT_REFRESH_POLL_INTERVAL_MS: u64 = 1_000;

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Runtime binary cannot be empty")]
    EmptyRuntimeBinary,

    #[error("Image namespace cannot be empty")]
    EmptyImageNamespace,

    #[error("Output limit must be greater than zero")]
    ZeroOutputLimit,

    #[error("Log tail must be between 1 and {MAX_LOG_TAIL_LINES}, got {0}")]
    InvalidLogTail(u32),

    #[error("Refresh poll count must be between 1 and 100, got {0}")]
    InvalidPollCount(u32),

    #[error("Script timeout must be greater than zero")]
    ZeroScriptTimeout,

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Everything the engine needs to know about its environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetConfig {
    /// Directory scanned for provisioning scripts.
    pub catalog_dir: PathBuf,
    /// Directory holding settings files and templates.
    pub settings_dir: PathBuf,
    pub runtime_binary: String,
    pub powershell_binary: String,
    pub shell_binary: String,
    /// Image substring marking an instance as one of ours.
    pub image_namespace: String,
    pub script_output_limit: usize,
    pub listing_output_limit: usize,
    pub log_tail_lines: u32,
    pub action_settle_ms: u64,
    pub deploy_settle_ms: u64,
    pub refresh_max_polls: u32,
    pub refresh_poll_interval_ms: u64,
    /// `None` lets a provisioning script run for as long as it needs.
    pub script_timeout_secs: Option<u64>,
}

impl FleetConfig {
    /// Defaults rooted at explicit directories.
    #[must_use]
    pub fn with_defaults(catalog_dir: impl Into<PathBuf>, settings_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_dir: catalog_dir.into(),
            settings_dir: settings_dir.into(),
            runtime_binary: DEFAULT_RUNTIME_BINARY.to_string(),
            powershell_binary: DEFAULT_POWERSHELL_BINARY.to_string(),
            shell_binary: DEFAULT_SHELL_BINARY.to_string(),
            image_namespace: DEFAULT_IMAGE_NAMESPACE.to_string(),
            script_output_limit: DEFAULT_MAX_OUTPUT_BYTES,
            listing_output_limit: DEFAULT_MAX_OUTPUT_BYTES,
            log_tail_lines: DEFAULT_LOG_TAIL_LINES,
            action_settle_ms: DEFAULT_ACTION_SETTLE_MS,
            deploy_settle_ms: DEFAULT_DEPLOY_SETTLE_MS,
            refresh_max_polls: DEFAULT_REFRESH_MAX_POLLS,
            refresh_poll_interval_ms: DEFAULT_REFRESH_POLL_INTERVAL_MS,
            script_timeout_secs: None,
        }
    }

    /// Defaults rooted at the resolved data root.
    pub fn from_data_root() -> Result<Self, ConfigError> {
        Ok(Self::with_defaults(
            default_catalog_dir()?,
            default_settings_dir()?,
        ))
    }

    /// Zero every delay. Used by tests and by callers that never await a refresh.
    #[must_use]
    pub const fn without_delays(mut self) -> Self {
        self.action_settle_ms = 0;
        self.deploy_settle_ms = 0;
        self.refresh_poll_interval_ms = 0;
        self
    }

    /// Delay before the first post-operation listing.
    pub const fn settle_delay(&self, kind: OperationKind) -> Duration {
        match kind {
            OperationKind::Deploy | OperationKind::Redeploy => {
                Duration::from_millis(self.deploy_settle_ms)
            }
            OperationKind::SaveSettings => Duration::ZERO,
            _ => Duration::from_millis(self.action_settle_ms),
        }
    }

    pub const fn refresh_poll_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_poll_interval_ms)
    }

    pub fn script_timeout(&self) -> Option<Duration> {
        self.script_timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runtime_binary.trim().is_empty() {
            return Err(ConfigError::EmptyRuntimeBinary);
        }
        if self.image_namespace.trim().is_empty() {
            return Err(ConfigError::EmptyImageNamespace);
        }
        if self.script_output_limit == 0 || self.listing_output_limit == 0 {
            return Err(ConfigError::ZeroOutputLimit);
        }
        if !(1..=MAX_LOG_TAIL_LINES).contains(&self.log_tail_lines) {
            return Err(ConfigError::InvalidLogTail(self.log_tail_lines));
        }
        if !(1..=100).contains(&self.refresh_max_polls) {
            return Err(ConfigError::InvalidPollCount(self.refresh_max_polls));
        }
        if self.script_timeout_secs == Some(0) {
            return Err(ConfigError::ZeroScriptTimeout);
        }
        Ok(())
    }
}

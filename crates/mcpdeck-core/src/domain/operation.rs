//! In-flight lifecycle operations and their state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle action requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    Deploy,
    Redeploy,
    Remove,
    Start,
    Stop,
    Restart,
    SaveSettings,
}

impl OperationKind {
    /// Action label used in response payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::Redeploy => "redeploy",
            Self::Remove => "remove",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::SaveSettings => "save-settings",
        }
    }

    /// Whether this operation changes runtime state and warrants a refresh.
    pub const fn mutates_runtime(self) -> bool {
        !matches!(self, Self::SaveSettings)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Pending -> Running -> {Succeeded, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl OperationStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Rejected state transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation {kind} on '{target}' cannot move from {from:?} to {to:?}")]
pub struct InvalidTransition {
    pub kind: OperationKind,
    pub target: String,
    pub from: OperationStatus,
    pub to: OperationStatus,
}

/// One accepted lifecycle request. Lives only for the caller's round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: Uuid,
    pub kind: OperationKind,
    /// Catalog entry id, instance name, or instance id.
    pub target: String,
    pub status: OperationStatus,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Operation {
    pub fn new(kind: OperationKind, target: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            target: target.into(),
            status: OperationStatus::Pending,
            created_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn begin(&mut self) -> Result<(), InvalidTransition> {
        self.transition(OperationStatus::Pending, OperationStatus::Running)
    }

    pub fn succeed(&mut self) -> Result<(), InvalidTransition> {
        self.transition(OperationStatus::Running, OperationStatus::Succeeded)
    }

    pub fn fail(&mut self) -> Result<(), InvalidTransition> {
        self.transition(OperationStatus::Running, OperationStatus::Failed)
    }

    fn transition(
        &mut self,
        expected: OperationStatus,
        to: OperationStatus,
    ) -> Result<(), InvalidTransition> {
        if self.status != expected {
            return Err(InvalidTransition {
                kind: self.kind,
                target: self.target.clone(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        if to.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        Ok(())
    }
}

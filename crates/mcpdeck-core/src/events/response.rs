//! Response events and their payloads.
//!
//! Every payload either carries data or an `error` string; absent fields are
//! omitted from the JSON form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::{Instance, ServerView, SettingsDocument, SettingsValues};
use crate::services::{OperationReport, RefreshPlan};

/// One response event, tagged by `event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Response {
    InstancesData(InstancesPayload),
    CatalogData(CatalogPayload),
    LogsData(LogsPayload),
    ActionResult(ActionPayload),
    DeployResult(DeployPayload),
    SettingsData(SettingsPayload),
}

impl Response {
    /// Wire name of the event.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InstancesData(_) => "instances-data",
            Self::CatalogData(_) => "catalog-data",
            Self::LogsData(_) => "logs-data",
            Self::ActionResult(_) => "action-result",
            Self::DeployResult(_) => "deploy-result",
            Self::SettingsData(_) => "settings-data",
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The payload's `error`, if this response reports a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::InstancesData(p) => p.error.as_deref(),
            Self::CatalogData(p) => p.error.as_deref(),
            Self::LogsData(p) => p.error.as_deref(),
            Self::ActionResult(p) => p.error.as_deref(),
            Self::DeployResult(p) => p.error.as_deref(),
            Self::SettingsData(p) => p.error.as_deref(),
        }
    }
}

/// A response plus the refresh the caller may choose to await.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub response: Response,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshPlan>,
}

impl Reply {
    pub const fn new(response: Response) -> Self {
        Self {
            response,
            refresh: None,
        }
    }
}

/// Instance as listed, with the running predicate precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSummary {
    #[serde(flatten)]
    pub instance: Instance,
    pub is_running: bool,
}

impl From<Instance> for InstanceSummary {
    fn from(instance: Instance) -> Self {
        Self {
            is_running: instance.is_running(),
            instance,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstancesPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<InstanceSummary>>,
    /// Set only for post-operation refreshes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InstancesPayload {
    pub fn servers(instances: Vec<Instance>) -> Self {
        Self {
            servers: Some(instances.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// A catalog entry joined with its instance, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogServer {
    pub id: String,
    pub name: String,
    pub script_name: String,
    pub description: String,
    pub script_path: PathBuf,
    /// Key of this server's settings files.
    pub server_type: String,
    pub is_deployed: bool,
    pub is_running: bool,
    pub container_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CatalogServer {
    /// `None` for views without a catalog entry.
    pub fn from_view(view: &ServerView) -> Option<Self> {
        let entry = view.entry.as_ref()?;
        Some(Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            script_name: entry.script.file_name.clone(),
            description: entry.description.clone(),
            script_path: entry.script.path.clone(),
            server_type: entry.settings_key(),
            is_deployed: view.is_deployed(),
            is_running: view.is_running(),
            container_name: entry.instance_name.clone(),
            container_id: view.instance.as_ref().map(|i| i.runtime_id.clone()),
            status: view.instance.as_ref().map(|i| i.status_text.clone()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<CatalogServer>>,
    /// Namespace instances that match no catalog entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmanaged: Option<Vec<InstanceSummary>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsPayload {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of start, stop, restart, remove and redeploy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl ActionPayload {
    fn from_report(report: &OperationReport) -> Self {
        let output = report.output();
        Self {
            action: report.operation.kind.as_str().to_string(),
            success: report.is_success().then_some(true),
            message: report.message().map(str::to_string),
            warning: report.warning().map(str::to_string),
            error: report.error().map(str::to_string),
            stdout: output.map(|o| o.stdout.clone()),
            stderr: output.map(|o| o.stderr.clone()),
            ..Self::default()
        }
    }

    /// Payload for operations addressed by instance id.
    pub fn for_id(report: &OperationReport, id: &str) -> Self {
        Self {
            container_id: Some(id.to_string()),
            ..Self::from_report(report)
        }
    }

    /// Payload for operations addressed by instance name.
    pub fn for_name(report: &OperationReport, name: &str) -> Self {
        Self {
            container_name: Some(name.to_string()),
            ..Self::from_report(report)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployPayload {
    pub script_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl DeployPayload {
    pub fn from_report(report: &OperationReport, script_ref: &str) -> Self {
        let output = report.output();
        Self {
            script_ref: script_ref.to_string(),
            success: report.is_success().then_some(true),
            message: report.message().map(str::to_string),
            error: report.error().map(str::to_string),
            stdout: output.map(|o| o.stdout.clone()),
            stderr: output.map(|o| o.stderr.clone()),
        }
    }
}

/// Settings document, save acknowledgement, or error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    pub server_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_settings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_settings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SettingsPayload {
    pub fn document(document: SettingsDocument) -> Self {
        Self {
            server_type: document.server_type,
            settings: Some(document.values),
            required_settings: Some(document.required_names),
            optional_settings: Some(document.optional_names),
            descriptions: Some(document.descriptions),
            ..Self::default()
        }
    }

    pub fn saved(report: &OperationReport, server_type: &str) -> Self {
        Self {
            server_type: server_type.to_string(),
            success: report.is_success().then_some(true),
            message: report.message().map(str::to_string),
            error: report.error().map(str::to_string),
            ..Self::default()
        }
    }

    pub fn error(server_type: &str, error: impl Into<String>) -> Self {
        Self {
            server_type: server_type.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

//! Requests accepted from the presentation layer.

use serde::{Deserialize, Serialize};

use crate::domain::SettingsValues;

/// One request. Serialized with a `request` tag, e.g.
/// `{"request":"remove","containerName":"brave-mcp-server","removeImage":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "kebab-case")]
pub enum Request {
    ListInstances,
    ListCatalog,
    GetLogs {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tail: Option<u32>,
    },
    Start {
        id: String,
    },
    Stop {
        id: String,
    },
    Restart {
        id: String,
    },
    #[serde(rename_all = "camelCase")]
    Remove {
        container_name: String,
        #[serde(default)]
        remove_image: bool,
    },
    #[serde(rename_all = "camelCase")]
    Deploy {
        script_ref: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<SettingsValues>,
    },
    #[serde(rename_all = "camelCase")]
    Redeploy {
        container_name: String,
        script_ref: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<SettingsValues>,
    },
    #[serde(rename_all = "camelCase")]
    GetSettings {
        server_type: String,
    },
    #[serde(rename_all = "camelCase")]
    SaveSettings {
        server_type: String,
        settings: SettingsValues,
    },
}

impl Request {
    /// Parse a JSON request document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Wire name of the request.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ListInstances => "list-instances",
            Self::ListCatalog => "list-catalog",
            Self::GetLogs { .. } => "get-logs",
            Self::Start { .. } => "start",
            Self::Stop { .. } => "stop",
            Self::Restart { .. } => "restart",
            Self::Remove { .. } => "remove",
            Self::Deploy { .. } => "deploy",
            Self::Redeploy { .. } => "redeploy",
            Self::GetSettings { .. } => "get-settings",
            Self::SaveSettings { .. } => "save-settings",
        }
    }
}

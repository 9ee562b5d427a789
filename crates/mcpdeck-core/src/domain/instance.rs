//! Runtime-reported container instances.

use serde::{Deserialize, Serialize};

use super::status::indicates_running;

/// Image namespace marker identifying containers that belong to this system.
pub const DEFAULT_IMAGE_NAMESPACE: &str = "mcp/";

/// A container as reported by one runtime listing.
///
/// Snapshots are replaced wholesale on every poll, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Runtime identifier.
    #[serde(rename = "id")]
    pub runtime_id: String,
    /// Container name.
    pub name: String,
    /// Image reference, e.g. `mcp/brave-search:latest`.
    pub image: String,
    /// Free-form status text.
    #[serde(rename = "status")]
    pub status_text: String,
}

impl Instance {
    pub fn new(
        runtime_id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        status_text: impl Into<String>,
    ) -> Self {
        Self {
            runtime_id: runtime_id.into(),
            name: name.into(),
            image: image.into(),
            status_text: status_text.into(),
        }
    }

    pub fn is_running(&self) -> bool {
        indicates_running(&self.status_text)
    }

    /// Whether the image lives under the given namespace marker (case-insensitive).
    pub fn is_mcp(&self, namespace: &str) -> bool {
        self.image
            .to_lowercase()
            .contains(&namespace.to_lowercase())
    }

    /// Case-insensitive name comparison used by reconciliation.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

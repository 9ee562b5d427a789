//! Settings store trait definition.
//!
//! This port defines the interface for per-server settings persistence.
//! Implementations handle file layout and the text format internally.

use async_trait::async_trait;

use super::SettingsError;
use crate::domain::{SettingsTemplate, SettingsValues};

/// Per-server settings persistence.
///
/// # Design Rules
///
/// - Absent files are not errors: they yield an empty template or mapping
/// - Templates are read-only inputs and are never written
/// - `save` omits empty values entirely
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load_template(&self, server_type: &str) -> Result<SettingsTemplate, SettingsError>;

    async fn load_values(&self, server_type: &str) -> Result<SettingsValues, SettingsError>;

    async fn save(&self, server_type: &str, values: &SettingsValues) -> Result<(), SettingsError>;
}

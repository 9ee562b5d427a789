//! Per-server settings documents and their templates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Setting name to value mapping. Keys are unique; order is irrelevant.
pub type SettingsValues = BTreeMap<String, String>;

/// Field declarations parsed from a read-only `.example` template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsTemplate {
    /// Required setting names in declaration order.
    pub required_names: Vec<String>,
    /// Optional setting names in declaration order.
    pub optional_names: Vec<String>,
    /// Human descriptions keyed by setting name.
    pub descriptions: BTreeMap<String, String>,
    /// Defaults seeded by commented `# NAME=value` lines.
    pub defaults: SettingsValues,
}

impl SettingsTemplate {
    pub fn is_empty(&self) -> bool {
        self.required_names.is_empty()
            && self.optional_names.is_empty()
            && self.descriptions.is_empty()
            && self.defaults.is_empty()
    }

    /// Drop defaults seeded for required names. A required name's commented
    /// default is a placeholder, never a usable value.
    pub fn without_required_defaults(mut self) -> Self {
        let required = &self.required_names;
        self.defaults.retain(|name, _| !required.contains(name));
        self
    }
}

/// Settings for one server type: template declarations plus current values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    pub server_type: String,
    pub values: SettingsValues,
    pub required_names: Vec<String>,
    pub optional_names: Vec<String>,
    pub descriptions: BTreeMap<String, String>,
}

impl SettingsDocument {
    /// Combine a template with stored values; stored values win over defaults.
    pub fn from_parts(
        server_type: impl Into<String>,
        template: SettingsTemplate,
        stored: SettingsValues,
    ) -> Self {
        let mut values = template.defaults;
        values.extend(stored);
        Self {
            server_type: server_type.into(),
            values,
            required_names: template.required_names,
            optional_names: template.optional_names,
            descriptions: template.descriptions,
        }
    }

    /// Required names that have no non-empty value.
    pub fn missing_required(&self) -> Vec<String> {
        self.required_names
            .iter()
            .filter(|name| {
                self.values
                    .get(name.as_str())
                    .is_none_or(|v| v.trim().is_empty())
            })
            .cloned()
            .collect()
    }
}

/// Values as they are persisted: trimmed, with blank entries dropped.
pub fn without_empty(values: &SettingsValues) -> SettingsValues {
    values
        .iter()
        .map(|(k, v)| (k, v.trim()))
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect()
}

//! Catalog entries: deployable server definitions backed by provisioning scripts.
//!
//! Script files follow the `load<Name>MCP.<ext>` naming pattern. Everything in
//! this module is pure: the filesystem walk lives in the runtime crate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File-name prefix shared by all provisioning scripts.
pub const SCRIPT_PREFIX: &str = "load";

/// Stem suffix shared by all provisioning scripts.
pub const SCRIPT_SUFFIX: &str = "MCP";

/// Suffix appended to the lower-cased entry name to form its instance name.
pub const INSTANCE_SUFFIX: &str = "-mcp-server";

/// Number of leading script lines scanned for description comments.
pub const DESCRIPTION_SCAN_LINES: usize = 10;

/// Comment lines containing this token are step banners, not description.
pub const STEP_MARKER: &str = "Step";

/// Interpreter family of a provisioning script, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    /// `.ps1` scripts run under PowerShell.
    PowerShell,
    /// `.sh` scripts run under bash.
    Shell,
}

impl ScriptKind {
    /// Map a file extension (without the dot) to a script kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ps1" => Some(Self::PowerShell),
            "sh" => Some(Self::Shell),
            _ => None,
        }
    }
}

/// Opaque handle to a provisioning script, owned by the catalog scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRef {
    /// Bare file name, e.g. `loadBraveMCP.ps1`. This is the public reference.
    pub file_name: String,
    /// Absolute location on disk.
    pub path: PathBuf,
    /// Interpreter family.
    pub kind: ScriptKind,
}

/// A deployable server definition.
///
/// Rebuilt on every catalog scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Lower-cased unique key.
    pub id: String,
    /// Display name recovered from the script file name.
    pub name: String,
    /// Script handle.
    pub script: ScriptRef,
    /// Free text from the script's header comments (may be empty).
    pub description: String,
    /// Runtime instance name this entry deploys as.
    pub instance_name: String,
}

impl CatalogEntry {
    /// Build an entry, deriving `id` and `instance_name` from `name`.
    pub fn new(name: impl Into<String>, script: ScriptRef, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.to_lowercase(),
            instance_name: instance_name_for(&name),
            name,
            script,
            description: description.into(),
        }
    }

    /// Key used to locate this entry's settings files.
    pub fn settings_key(&self) -> String {
        settings_key_for(&self.name)
    }
}

/// Naming convention correlating a catalog entry with its runtime instance.
pub fn instance_name_for(name: &str) -> String {
    format!("{}{INSTANCE_SUFFIX}", name.to_lowercase())
}

/// Settings key for an entry name: the name with its first character lower-cased.
///
/// `GoogleMaps` becomes `googleMaps`, `Brave` becomes `brave`.
pub fn settings_key_for(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Recover the entry name and script kind from a script file name.
///
/// Returns `None` for anything that does not match `load<Name>MCP.<ext>` with a
/// non-empty name and a supported extension.
pub fn parse_script_file_name(file_name: &str) -> Option<(String, ScriptKind)> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    let kind = ScriptKind::from_extension(ext)?;
    let name = stem
        .strip_prefix(SCRIPT_PREFIX)?
        .strip_suffix(SCRIPT_SUFFIX)?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), kind))
}

/// Extract a description from the leading comment lines of a script.
///
/// Best effort: keeps `#` comment lines among the first
/// [`DESCRIPTION_SCAN_LINES`] lines that are not a shebang and do not mention
/// [`STEP_MARKER`],
/// strips the marker and joins the remainder with single spaces.
pub fn extract_description(content: &str) -> String {
    content
        .lines()
        .take(DESCRIPTION_SCAN_LINES)
        .map(str::trim)
        .filter(|line| line.starts_with('#') && !line.starts_with("#!"))
        .filter(|line| !line.contains(STEP_MARKER))
        .map(|line| line.trim_start_matches('#').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

//! Default catalog and settings locations under the data root.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Catalog directory relative to the data root.
pub const CATALOG_DIR_RELATIVE: &str = "scripts";

/// Settings directory relative to the data root.
pub const SETTINGS_DIR_RELATIVE: &str = "scripts/settings";

/// Directory scanned for `load<Name>MCP.<ext>` provisioning scripts.
pub fn default_catalog_dir() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(CATALOG_DIR_RELATIVE))
}

/// Directory holding `<serverType>Settings.env` files and their templates.
pub fn default_settings_dir() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(SETTINGS_DIR_RELATIVE))
}

//! Paths command handler.
//!
//! Displays the resolved directories for diagnostics.

use mcpdeck_core::paths::{DATA_DIR_ENV, data_root, ensure_directory};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print resolved paths in `key = value` form; with `create`, make sure the
/// catalog and settings directories exist.
pub fn execute(ctx: &CliContext, create: bool) -> Result<(), CliError> {
    let config = ctx.core().config();
    if create {
        ensure_directory(&config.catalog_dir)?;
        ensure_directory(&config.settings_dir)?;
    }

    let root = data_root().map_or_else(|e| format!("<unavailable: {e}>"), |p| p.display().to_string());
    println!("data_root = {root}  (override with {DATA_DIR_ENV})");
    println!("catalog_dir = {}", config.catalog_dir.display());
    println!("settings_dir = {}", config.settings_dir.display());
    Ok(())
}

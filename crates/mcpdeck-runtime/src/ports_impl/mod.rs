//! Port implementations backed by the local filesystem.
//!
//! These adapters implement the catalog and settings ports from
//! `mcpdeck-core`. The process-backed `CommandExecutor` lives in
//! [`crate::process`].

mod catalog_scanner;
mod settings_files;

pub use catalog_scanner::FsCatalogScanner;
pub use settings_files::FsSettingsStore;

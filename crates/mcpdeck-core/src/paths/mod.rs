//! Path utilities for the mcpdeck data root and its catalog/settings directories.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O
//! - OS-specific logic is kept private in `platform`

mod locations;
mod ensure;
mod error;
mod platform;

#[cfg(test)]
mod test_utils;

pub use locations::{
    CATALOG_DIR_RELATIVE, SETTINGS_DIR_RELATIVE, default_catalog_dir, default_settings_dir,
};
pub use ensure::ensure_directory;
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, normalize_user_path};

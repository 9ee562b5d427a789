//! `SettingsStore` implementation over plain `.env` files.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use mcpdeck_core::domain::{SettingsTemplate, SettingsValues};
use mcpdeck_core::ports::{SettingsError, SettingsStore};
use mcpdeck_core::settings::{
    parse_template, parse_values, render_values, settings_file_name, template_file_name,
};

/// Reads templates and reads/writes values under one settings directory.
///
/// The directory is created on first save. Concurrent saves for the same
/// server type are not coordinated here; the last write wins.
#[derive(Debug, Clone)]
pub struct FsSettingsStore {
    dir: PathBuf,
}

impl FsSettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the live settings file for a server type.
    pub fn settings_path(&self, server_type: &str) -> Result<PathBuf, SettingsError> {
        Ok(self.dir.join(settings_file_name(server_type)?))
    }

    /// Full path of the template for a server type.
    pub fn template_path(&self, server_type: &str) -> Result<PathBuf, SettingsError> {
        Ok(self.dir.join(template_file_name(server_type)?))
    }
}

fn io_error(path: &Path, e: &io::Error) -> SettingsError {
    SettingsError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Read a file, treating absence as `None`.
async fn read_optional(path: &Path) -> Result<Option<String>, SettingsError> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, &e)),
    }
}

#[async_trait]
impl SettingsStore for FsSettingsStore {
    async fn load_template(&self, server_type: &str) -> Result<SettingsTemplate, SettingsError> {
        let path = self.template_path(server_type)?;
        let template = read_optional(&path)
            .await?
            .map(|content| parse_template(&content))
            .unwrap_or_default();
        debug!(server_type, path = %path.display(), "Loaded settings template");
        Ok(template)
    }

    async fn load_values(&self, server_type: &str) -> Result<SettingsValues, SettingsError> {
        let path = self.settings_path(server_type)?;
        Ok(read_optional(&path)
            .await?
            .map(|content| parse_values(&content))
            .unwrap_or_default())
    }

    async fn save(&self, server_type: &str, values: &SettingsValues) -> Result<(), SettingsError> {
        let path = self.settings_path(server_type)?;
        let body = render_values(server_type, values)?;
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, &e))?;
        fs::write(&path, body).await.map_err(|e| io_error(&path, &e))?;
        info!(server_type, path = %path.display(), "Settings saved");
        Ok(())
    }
}

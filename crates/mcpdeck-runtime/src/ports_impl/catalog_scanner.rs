//! `CatalogSource` implementation over a scripts directory.
//!
//! Every scan re-reads the directory, so scripts added or removed on disk show
//! up on the next listing without a restart.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use mcpdeck_core::domain::catalog::DESCRIPTION_SCAN_LINES;
use mcpdeck_core::domain::{
    CatalogEntry, ScriptRef, extract_description, parse_script_file_name, validate_script_ref,
};
use mcpdeck_core::ports::{CatalogError, CatalogSource};

/// Scans a directory for `load<Name>MCP.{ps1,sh}` scripts.
#[derive(Debug, Clone)]
pub struct FsCatalogScanner {
    dir: PathBuf,
}

impl FsCatalogScanner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn io_error(&self, e: &io::Error) -> CatalogError {
        CatalogError::Io {
            path: self.dir.clone(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl CatalogSource for FsCatalogScanner {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let mut read_dir = fs::read_dir(&self.dir)
            .await
            .map_err(|e| self.io_error(&e))?;

        let mut entries = Vec::new();
        while let Some(item) = read_dir.next_entry().await.map_err(|e| self.io_error(&e))? {
            let os_name = item.file_name();
            let Some(file_name) = os_name.to_str() else {
                continue;
            };
            let Some((name, kind)) = parse_script_file_name(file_name) else {
                continue;
            };
            if let Err(e) = validate_script_ref(file_name) {
                debug!(file_name, error = %e, "Skipping script with unusable name");
                continue;
            }
            if !item.file_type().await.is_ok_and(|t| !t.is_dir()) {
                continue;
            }

            let path = item.path();
            let description = match read_header(&path).await {
                Ok(header) => extract_description(&header),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not read script header");
                    String::new()
                }
            };

            entries.push(CatalogEntry::new(
                name,
                ScriptRef {
                    file_name: file_name.to_string(),
                    path,
                    kind,
                },
                description,
            ));
        }

        entries.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.script.file_name.cmp(&b.script.file_name))
        });
        debug!(dir = %self.dir.display(), count = entries.len(), "Scanned catalog");
        Ok(entries)
    }
}

/// First lines of a script, enough for description extraction.
async fn read_header(path: &Path) -> io::Result<String> {
    let file = fs::File::open(path).await?;
    let mut lines = BufReader::new(file).lines();
    let mut header = String::new();
    for _ in 0..DESCRIPTION_SCAN_LINES {
        match lines.next_line().await? {
            Some(line) => {
                header.push_str(&line);
                header.push('\n');
            }
            None => break,
        }
    }
    Ok(header)
}

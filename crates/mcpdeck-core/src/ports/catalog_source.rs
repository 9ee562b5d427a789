//! Catalog source trait definition.
//!
//! This port enumerates deployable server definitions. The filesystem scanner
//! in the runtime crate is the production implementation.

use async_trait::async_trait;

use super::CatalogError;
use crate::domain::{CatalogEntry, validate_script_ref};

/// Source of catalog entries.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Produce a fresh snapshot of all catalog entries.
    ///
    /// Fails only when the catalog location itself is unreadable; a single
    /// malformed script degrades to an empty description.
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError>;

    /// Resolve a script reference (bare file name) to its catalog entry.
    async fn resolve(&self, script_ref: &str) -> Result<CatalogEntry, CatalogError> {
        let script_ref = validate_script_ref(script_ref)?;
        self.list_entries()
            .await?
            .into_iter()
            .find(|entry| entry.script.file_name == script_ref)
            .ok_or_else(|| CatalogError::ScriptNotFound(script_ref.to_string()))
    }
}

//! Settings service - per-server settings documents and the deploy gate.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{SettingsDocument, SettingsValues, validate_identifier};
use crate::ports::{CoreError, SettingsError, SettingsStore};
use crate::settings::validate_values;

/// Service for settings operations.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Template declarations with defaults, overridden by stored values.
    pub async fn get(&self, server_type: &str) -> Result<SettingsDocument, CoreError> {
        let server_type = validate_identifier("server type", server_type)?;
        let template = self.store.load_template(server_type).await?;
        let stored = self.store.load_values(server_type).await?;
        debug!(
            server_type,
            required = template.required_names.len(),
            stored = stored.len(),
            "Loaded settings"
        );
        Ok(SettingsDocument::from_parts(server_type, template, stored))
    }

    /// Persist values as given. Empty values are dropped by the store.
    pub async fn save(&self, server_type: &str, values: &SettingsValues) -> Result<(), CoreError> {
        let server_type = validate_identifier("server type", server_type)?;
        validate_values(values)?;
        self.store.save(server_type, values).await?;
        info!(server_type, keys = values.len(), "Saved settings");
        Ok(())
    }

    /// Merge `supplied` over the stored values and check required names.
    ///
    /// Template defaults seed optional names only. A required name counts as
    /// set when a stored or supplied value is non-blank. Returns the merged
    /// values without writing anything.
    pub async fn prepare(
        &self,
        server_type: &str,
        supplied: &SettingsValues,
    ) -> Result<SettingsValues, CoreError> {
        validate_values(supplied)?;
        let server_type = validate_identifier("server type", server_type)?;
        let template = self.store.load_template(server_type).await?;
        let mut provided = self.store.load_values(server_type).await?;
        provided.extend(supplied.iter().map(|(k, v)| (k.clone(), v.clone())));

        let document =
            SettingsDocument::from_parts(server_type, template.without_required_defaults(), provided);
        let missing = document.missing_required();
        if !missing.is_empty() {
            return Err(SettingsError::MissingRequired {
                server_type: document.server_type,
                names: missing,
            }
            .into());
        }
        Ok(document.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SettingsTemplate;
    use crate::testing::InMemorySettingsStore;
    use std::collections::BTreeMap;

    fn values(pairs: &[(&str, &str)]) -> SettingsValues {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn brave_template() -> SettingsTemplate {
        SettingsTemplate {
            required_names: vec!["BRAVE_API_KEY".to_string()],
            optional_names: vec!["BRAVE_REGION".to_string()],
            descriptions: BTreeMap::from([("BRAVE_API_KEY".to_string(), "your key".to_string())]),
            defaults: values(&[("BRAVE_REGION", "us")]),
        }
    }

    fn service(store: InMemorySettingsStore) -> (SettingsService, Arc<InMemorySettingsStore>) {
        let store = Arc::new(store);
        (SettingsService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_get_merges_defaults_and_stored() {
        let (service, _) = service(
            InMemorySettingsStore::new()
                .with_template("brave", brave_template())
                .with_values("brave", values(&[("BRAVE_API_KEY", "k1")])),
        );

        let doc = service.get("brave").await.unwrap();
        assert_eq!(doc.values, values(&[("BRAVE_API_KEY", "k1"), ("BRAVE_REGION", "us")]));
        assert_eq!(doc.required_names, vec!["BRAVE_API_KEY"]);
        assert_eq!(doc.descriptions["BRAVE_API_KEY"], "your key");
    }

    #[tokio::test]
    async fn test_get_without_files_is_empty() {
        let (service, _) = service(InMemorySettingsStore::new());
        let doc = service.get("unknown").await.unwrap();
        assert!(doc.values.is_empty());
        assert!(doc.required_names.is_empty());
    }

    #[tokio::test]
    async fn test_get_rejects_traversal() {
        let (service, _) = service(InMemorySettingsStore::new());
        assert!(matches!(
            service.get("../secrets").await,
            Err(CoreError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_save_drops_empty_values() {
        let (service, store) = service(InMemorySettingsStore::new());
        service
            .save("brave", &values(&[("A", "1"), ("B", "")]))
            .await
            .unwrap();
        assert_eq!(store.stored("brave").unwrap(), values(&[("A", "1")]));
    }

    #[tokio::test]
    async fn test_save_rejects_multiline_value() {
        let (service, store) = service(InMemorySettingsStore::new());
        let err = service
            .save("brave", &values(&[("A", "1\nB=2")]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Settings(SettingsError::InvalidValue { .. })));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_prepare_reports_missing_required() {
        let (service, store) = service(InMemorySettingsStore::new().with_template("brave", brave_template()));
        let err = service
            .prepare("brave", &values(&[("BRAVE_API_KEY", "  ")]))
            .await
            .unwrap_err();
        match err {
            CoreError::Settings(SettingsError::MissingRequired { names, .. }) => {
                assert_eq!(names, vec!["BRAVE_API_KEY"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_prepare_ignores_required_placeholder_default() {
        let mut template = brave_template();
        template.defaults.insert("BRAVE_API_KEY".to_string(), "your-key".to_string());
        let (service, store) = service(InMemorySettingsStore::new().with_template("brave", template));

        let err = service.prepare("brave", &SettingsValues::new()).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Settings(SettingsError::MissingRequired { ref names, .. }) if names == &["BRAVE_API_KEY"]
        ));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_prepare_accepts_stored_required_value() {
        let (service, _) = service(
            InMemorySettingsStore::new()
                .with_template("brave", brave_template())
                .with_values("brave", values(&[("BRAVE_API_KEY", "stored")])),
        );
        let merged = service.prepare("brave", &SettingsValues::new()).await.unwrap();
        assert_eq!(merged["BRAVE_API_KEY"], "stored");
    }

    #[tokio::test]
    async fn test_prepare_merges_supplied_over_stored() {
        let (service, _) = service(
            InMemorySettingsStore::new()
                .with_template("brave", brave_template())
                .with_values("brave", values(&[("BRAVE_API_KEY", "old"), ("EXTRA", "x")])),
        );
        let merged = service
            .prepare("brave", &values(&[("BRAVE_API_KEY", "new")]))
            .await
            .unwrap();
        assert_eq!(
            merged,
            values(&[("BRAVE_API_KEY", "new"), ("BRAVE_REGION", "us"), ("EXTRA", "x")])
        );
    }
}

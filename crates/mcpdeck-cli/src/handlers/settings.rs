//! Settings command handler.

use mcpdeck_core::Request;

use super::respond;
use crate::bootstrap::CliContext;
use crate::commands::SettingsCommand;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, command: SettingsCommand) -> Result<(), CliError> {
    match command {
        SettingsCommand::Show { server_type } => {
            let reply = ctx.core().handle(Request::GetSettings { server_type }).await;
            respond(ctx, reply, false).await
        }
        SettingsCommand::Set { server_type, pairs } => set(ctx, server_type, pairs).await,
    }
}

/// Apply `pairs` over the current merged settings and save the result.
///
/// Saving replaces the whole file, so unchanged values (including template
/// defaults) are written back alongside the new ones.
async fn set(ctx: &CliContext, server_type: String, pairs: Vec<(String, String)>) -> Result<(), CliError> {
    let mut settings = ctx.core().settings().get(&server_type).await?.values;
    settings.extend(pairs);
    let reply = ctx
        .core()
        .handle(Request::SaveSettings {
            server_type,
            settings,
        })
        .await;
    respond(ctx, reply, false).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpdeck_core::testing::{InMemoryCatalog, InMemorySettingsStore, ScriptedExecutor};
    use mcpdeck_core::{FleetConfig, FleetCore, SettingsTemplate};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn context(store: &Arc<InMemorySettingsStore>) -> CliContext {
        let core = FleetCore::new(
            FleetConfig::with_defaults("/srv/scripts", "/srv/scripts/settings").without_delays(),
            Arc::new(ScriptedExecutor::new()),
            Arc::new(InMemoryCatalog::default()),
            Arc::clone(store) as Arc<dyn mcpdeck_core::SettingsStore>,
        )
        .unwrap();
        CliContext::new(core, true)
    }

    #[test]
    fn test_set_merges_over_current_values() {
        let template = SettingsTemplate {
            defaults: BTreeMap::from([("REGION".to_string(), "us".to_string())]),
            ..SettingsTemplate::default()
        };
        let store = Arc::new(
            InMemorySettingsStore::new()
                .with_template("brave", template)
                .with_values("brave", BTreeMap::from([("API_KEY".to_string(), "old".to_string())])),
        );
        let ctx = context(&store);

        tokio_test::block_on(set(
            &ctx,
            "brave".to_string(),
            vec![("API_KEY".to_string(), "new".to_string())],
        ))
        .unwrap();

        let stored = store.stored("brave").unwrap();
        assert_eq!(stored["API_KEY"], "new");
        assert_eq!(stored["REGION"], "us");
    }

    #[test]
    fn test_set_rejects_bad_server_type() {
        let store = Arc::new(InMemorySettingsStore::new());
        let ctx = context(&store);

        let err = tokio_test::block_on(set(
            &ctx,
            "../etc".to_string(),
            vec![("A".to_string(), "1".to_string())],
        ))
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(store.save_count(), 0);
    }
}

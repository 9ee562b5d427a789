//! Lifecycle orchestrator - sequences deploy, redeploy, remove, start, stop,
//! restart and settings saves against the runtime and provisioning scripts.
//!
//! Every operation runs its command executor calls strictly in order. A failed
//! stop ahead of a removal is logged and the chain continues, since the target
//! may already be stopped. Operations never return `Err`: the outcome is always
//! an [`OperationReport`] whose operation reached a terminal status.

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info, warn};

use super::locks::{TargetGuard, TargetLocks};
use super::refresh::{Expectation, RefreshPlan};
use super::settings_service::SettingsService;
use crate::config::FleetConfig;
use crate::container::{RuntimeCommands, find_image_id, image_pattern, run_checked};
use crate::domain::{
    CatalogEntry, IdentifierError, Operation, OperationKind, SettingsValues, validate_identifier,
};
use crate::ports::{
    CatalogSource, CommandExecutor, CommandOutput, CommandSpec, CoreError, RunOptions,
    RuntimeError,
};
use crate::provisioning::ScriptInvoker;

/// Result of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub message: String,
    /// Set when a secondary step failed without failing the operation.
    pub warning: Option<String>,
    /// Captured script output for deploy and redeploy.
    pub output: Option<CommandOutput>,
    expect: Option<Expectation>,
}

impl Completed {
    fn new(message: impl Into<String>, expect: Expectation) -> Self {
        Self {
            message: message.into(),
            warning: None,
            output: None,
            expect: Some(expect),
        }
    }

    fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    fn with_output(mut self, output: CommandOutput) -> Self {
        self.output = Some(output);
        self
    }
}

/// Terminal outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded(Completed),
    Failed {
        error: String,
        /// Captured output when the failing step ran to a non-zero exit.
        output: Option<CommandOutput>,
    },
}

/// An operation in its terminal state plus what the caller should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    pub operation: Operation,
    pub outcome: Outcome,
    /// Present after a successful runtime mutation.
    pub refresh: Option<RefreshPlan>,
}

impl OperationReport {
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded(_))
    }

    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Succeeded(done) => Some(&done.message),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Succeeded(done) => done.warning.as_deref(),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { error, .. } => Some(error),
            Outcome::Succeeded(_) => None,
        }
    }

    pub const fn output(&self) -> Option<&CommandOutput> {
        match &self.outcome {
            Outcome::Succeeded(done) => done.output.as_ref(),
            Outcome::Failed { output, .. } => output.as_ref(),
        }
    }
}

/// What a failed operation was trying to do, for error messages.
const fn failure_phrase(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Deploy => "deploy server",
        OperationKind::Redeploy => "re-deploy server",
        OperationKind::Remove => "remove container",
        OperationKind::Start => "start container",
        OperationKind::Stop => "stop container",
        OperationKind::Restart => "restart container",
        OperationKind::SaveSettings => "save server settings",
    }
}

/// Output worth surfacing from a failure.
fn failure_output(err: &CoreError) -> Option<CommandOutput> {
    match err {
        CoreError::Runtime(RuntimeError::NonZeroExit {
            code,
            stdout,
            stderr,
            ..
        }) => Some(CommandOutput {
            exit_code: *code,
            stdout: stdout.clone(),
            stderr: stderr.clone(),
        }),
        _ => None,
    }
}

/// Sequences lifecycle operations.
#[derive(Clone)]
pub struct LifecycleOrchestrator {
    executor: Arc<dyn CommandExecutor>,
    catalog: Arc<dyn CatalogSource>,
    settings: SettingsService,
    commands: RuntimeCommands,
    scripts: ScriptInvoker,
    namespace: String,
    runtime_options: RunOptions,
    config: FleetConfig,
    locks: TargetLocks,
}

impl LifecycleOrchestrator {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        catalog: Arc<dyn CatalogSource>,
        settings: SettingsService,
        config: &FleetConfig,
        locks: TargetLocks,
    ) -> Self {
        Self {
            executor,
            catalog,
            settings,
            commands: RuntimeCommands::new(&config.runtime_binary),
            scripts: ScriptInvoker::new(
                &config.powershell_binary,
                &config.shell_binary,
                config.script_output_limit,
                config.script_timeout(),
            ),
            namespace: config.image_namespace.clone(),
            runtime_options: RunOptions::default().with_max_output(config.listing_output_limit),
            config: config.clone(),
            locks,
        }
    }

    pub const fn locks(&self) -> &TargetLocks {
        &self.locks
    }

    pub async fn start(&self, id: &str) -> OperationReport {
        let done = Completed::new("Container started successfully", Expectation::Running(id.to_string()));
        self.track(OperationKind::Start, id, self.single_step(id, self.commands.start(id), done))
            .await
    }

    pub async fn stop(&self, id: &str) -> OperationReport {
        let done = Completed::new("Container stopped successfully", Expectation::Stopped(id.to_string()));
        self.track(OperationKind::Stop, id, self.single_step(id, self.commands.stop(id), done))
            .await
    }

    pub async fn restart(&self, id: &str) -> OperationReport {
        let done = Completed::new("Container restarted successfully", Expectation::Running(id.to_string()));
        self.track(OperationKind::Restart, id, self.single_step(id, self.commands.restart(id), done))
            .await
    }

    /// Stop (best-effort), remove, and optionally force-remove the image.
    pub async fn remove(&self, container_name: &str, remove_image: bool) -> OperationReport {
        self.track(
            OperationKind::Remove,
            container_name,
            self.remove_steps(container_name, remove_image),
        )
        .await
    }

    /// Persist supplied settings, then run the entry's provisioning script.
    pub async fn deploy(&self, script_ref: &str, settings: Option<&SettingsValues>) -> OperationReport {
        self.track(
            OperationKind::Deploy,
            script_ref,
            self.deploy_steps(script_ref, settings),
        )
        .await
    }

    /// Persist settings, stop and remove the old instance (best-effort), then
    /// run the provisioning script again.
    pub async fn redeploy(
        &self,
        container_name: &str,
        script_ref: &str,
        settings: Option<&SettingsValues>,
    ) -> OperationReport {
        self.track(
            OperationKind::Redeploy,
            container_name,
            self.redeploy_steps(container_name, script_ref, settings),
        )
        .await
    }

    pub async fn save_settings(&self, server_type: &str, values: &SettingsValues) -> OperationReport {
        self.track(
            OperationKind::SaveSettings,
            server_type,
            self.save_settings_steps(server_type, values),
        )
        .await
    }

    /// Drive an operation through `Pending -> Running -> {Succeeded, Failed}`.
    async fn track(
        &self,
        kind: OperationKind,
        target: &str,
        work: impl Future<Output = Result<Completed, CoreError>>,
    ) -> OperationReport {
        let mut operation = Operation::new(kind, target);
        let result = match operation.begin() {
            Ok(()) => work.await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(mut done) => {
                if let Err(e) = operation.succeed() {
                    warn!(error = %e, "Operation state out of sync");
                }
                info!(
                    operation = %operation.id,
                    kind = %kind,
                    target,
                    warning = done.warning.as_deref(),
                    "{}",
                    done.message
                );
                let refresh = done
                    .expect
                    .take()
                    .filter(|_| kind.mutates_runtime())
                    .map(|expectation| RefreshPlan {
                        delay: self.config.settle_delay(kind),
                        expectation,
                    });
                OperationReport {
                    operation,
                    outcome: Outcome::Succeeded(done),
                    refresh,
                }
            }
            Err(err) => {
                if let Err(e) = operation.fail() {
                    warn!(error = %e, "Operation state out of sync");
                }
                error!(operation = %operation.id, kind = %kind, target, error = %err, "Operation failed");
                OperationReport {
                    outcome: Outcome::Failed {
                        error: format!("Failed to {}: {err}", failure_phrase(kind)),
                        output: failure_output(&err),
                    },
                    operation,
                    refresh: None,
                }
            }
        }
    }

    fn acquire(&self, target: &str) -> Result<TargetGuard, CoreError> {
        self.locks.try_acquire(target)
    }

    async fn run_runtime(&self, spec: &CommandSpec) -> Result<CommandOutput, RuntimeError> {
        run_checked(self.executor.as_ref(), spec, &self.runtime_options).await
    }

    /// Run a step whose failure must not abort the chain.
    async fn best_effort(&self, step: &'static str, spec: &CommandSpec) {
        if let Err(e) = self.run_runtime(spec).await {
            warn!(step, command = %spec, error = %e, "Best-effort step failed, continuing");
        }
    }

    /// Run one runtime command built by the caller.
    async fn single_step(
        &self,
        id: &str,
        spec: Result<CommandSpec, IdentifierError>,
        done: Completed,
    ) -> Result<Completed, CoreError> {
        let spec = spec?;
        let _guard = self.acquire(id)?;
        self.run_runtime(&spec).await?;
        Ok(done)
    }

    async fn remove_steps(&self, name: &str, remove_image: bool) -> Result<Completed, CoreError> {
        let stop = self.commands.stop(name)?;
        let rm = self.commands.remove(name)?;
        let _guard = self.acquire(name)?;

        self.best_effort("stop", &stop).await;
        self.run_runtime(&rm).await?;

        let removed = Expectation::Removed(name.to_string());
        if !remove_image {
            return Ok(Completed::new(
                format!("Container {name} removed successfully"),
                removed,
            ));
        }
        Ok(self.remove_image_for(name, removed).await)
    }

    /// Image removal never fails the operation; problems become a warning.
    async fn remove_image_for(&self, name: &str, removed: Expectation) -> Completed {
        let container_only = Completed::new(format!("Container {name} removed successfully"), removed.clone());
        let pattern = image_pattern(&self.namespace, name);

        let listing = match self.run_runtime(&self.commands.list_images()).await {
            Ok(output) => output.stdout,
            Err(e) => {
                warn!(container = name, pattern, error = %e, "Image lookup failed");
                return container_only.with_warning(format!("Could not look up image {pattern}: {e}"));
            }
        };
        let Some(image_id) = find_image_id(&listing, &pattern) else {
            warn!(container = name, pattern, "No matching image");
            return container_only.with_warning(format!("No matching image found for {pattern}"));
        };

        let rmi = match self.commands.remove_image(&image_id) {
            Ok(spec) => spec,
            Err(e) => {
                return container_only
                    .with_warning(format!("Container removed but failed to remove image: {e}"));
            }
        };
        match self.run_runtime(&rmi).await {
            Ok(_) => {
                info!(container = name, image = %image_id, "Image removed");
                Completed::new("Container and image removed successfully", removed)
            }
            Err(e) => {
                warn!(container = name, image = %image_id, error = %e, "Image removal failed");
                container_only.with_warning(format!("Container removed but failed to remove image: {e}"))
            }
        }
    }

    async fn deploy_steps(
        &self,
        script_ref: &str,
        settings: Option<&SettingsValues>,
    ) -> Result<Completed, CoreError> {
        let entry = self.catalog.resolve(script_ref).await?;
        let _guard = self.acquire(&entry.instance_name)?;

        if let Some(settings) = settings {
            self.persist_settings(&entry, settings).await?;
        }
        let output = self.run_script(&entry).await?;
        Ok(
            Completed::new("Server deployed successfully", Expectation::Deployed(entry.instance_name))
                .with_output(output),
        )
    }

    async fn redeploy_steps(
        &self,
        container_name: &str,
        script_ref: &str,
        settings: Option<&SettingsValues>,
    ) -> Result<Completed, CoreError> {
        let container_name = validate_identifier("container name", container_name)?;
        let entry = self.catalog.resolve(script_ref).await?;

        let _guard = self.acquire(container_name)?;
        let _entry_guard = if entry.instance_name.eq_ignore_ascii_case(container_name) {
            None
        } else {
            Some(self.acquire(&entry.instance_name)?)
        };

        if let Some(settings) = settings {
            self.persist_settings(&entry, settings).await?;
        }
        self.best_effort("stop", &self.commands.stop(container_name)?)
            .await;
        self.best_effort("remove", &self.commands.remove(container_name)?)
            .await;

        let output = self.run_script(&entry).await?;
        Ok(
            Completed::new("Server re-deployed successfully", Expectation::Deployed(entry.instance_name))
                .with_output(output),
        )
    }

    async fn save_settings_steps(
        &self,
        server_type: &str,
        values: &SettingsValues,
    ) -> Result<Completed, CoreError> {
        let server_type = validate_identifier("server type", server_type)?;
        let _guard = self.acquire(&format!("settings:{server_type}"))?;
        self.settings.save(server_type, values).await?;
        Ok(Completed {
            message: "Settings saved successfully".to_string(),
            warning: None,
            output: None,
            expect: None,
        })
    }

    /// Check required names against the merged values, then write them.
    async fn persist_settings(&self, entry: &CatalogEntry, supplied: &SettingsValues) -> Result<(), CoreError> {
        let server_type = entry.settings_key();
        let merged = self.settings.prepare(&server_type, supplied).await?;
        self.settings.save(&server_type, &merged).await
    }

    async fn run_script(&self, entry: &CatalogEntry) -> Result<CommandOutput, CoreError> {
        let spec = self.scripts.command_for(&entry.script);
        info!(entry = %entry.id, script = %entry.script.file_name, "Running provisioning script");
        let output = self.executor.run(&spec, self.scripts.options()).await?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(RuntimeError::NonZeroExit {
                command: entry.script.file_name.clone(),
                code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OperationStatus, ScriptKind, ScriptRef, SettingsTemplate};
    use crate::ports::ExecError;
    use crate::testing::{InMemoryCatalog, InMemorySettingsStore, ScriptedExecutor};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn brave() -> CatalogEntry {
        CatalogEntry::new(
            "Brave",
            ScriptRef {
                file_name: "loadBraveMCP.ps1".to_string(),
                path: PathBuf::from("/srv/scripts/loadBraveMCP.ps1"),
                kind: ScriptKind::PowerShell,
            },
            "Brave search",
        )
    }

    struct Harness {
        executor: Arc<ScriptedExecutor>,
        store: Arc<InMemorySettingsStore>,
        orchestrator: LifecycleOrchestrator,
    }

    fn harness_with(store: InMemorySettingsStore) -> Harness {
        let executor = Arc::new(ScriptedExecutor::new());
        let store = Arc::new(store);
        let mut config = FleetConfig::with_defaults("/srv/scripts", "/srv/scripts/settings");
        config.powershell_binary = "pwsh".to_string();
        let orchestrator = LifecycleOrchestrator::new(
            executor.clone(),
            Arc::new(InMemoryCatalog::new(vec![brave()])),
            SettingsService::new(store.clone()),
            &config,
            TargetLocks::new(),
        );
        Harness {
            executor,
            store,
            orchestrator,
        }
    }

    fn harness() -> Harness {
        harness_with(InMemorySettingsStore::new())
    }

    fn brave_template() -> SettingsTemplate {
        SettingsTemplate {
            required_names: vec!["BRAVE_API_KEY".to_string()],
            ..Default::default()
        }
    }

    fn values(pairs: &[(&str, &str)]) -> SettingsValues {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_start_success_schedules_refresh() {
        let h = harness();
        let report = h.orchestrator.start("abc123").await;

        assert!(report.is_success());
        assert_eq!(report.message(), Some("Container started successfully"));
        assert_eq!(report.operation.status, OperationStatus::Succeeded);
        assert!(report.operation.finished_at.is_some());
        let plan = report.refresh.unwrap();
        assert_eq!(plan.delay, Duration::from_secs(1));
        assert_eq!(plan.expectation, Expectation::Running("abc123".to_string()));
        assert_eq!(h.executor.call_lines(), ["docker start abc123"]);
    }

    #[tokio::test]
    async fn test_stop_non_zero_fails() {
        let h = harness();
        h.executor.on(
            "docker",
            &["stop"],
            Ok(CommandOutput::failure(1, "Error: No such container: abc")),
        );
        let report = h.orchestrator.stop("abc").await;

        assert!(!report.is_success());
        assert_eq!(report.operation.status, OperationStatus::Failed);
        let error = report.error().unwrap();
        assert!(error.starts_with("Failed to stop container:"));
        assert!(error.contains("No such container"));
        assert!(report.refresh.is_none());
    }

    #[tokio::test]
    async fn test_restart_launch_error_fails() {
        let h = harness();
        h.executor.on(
            "docker",
            &["restart"],
            Err(ExecError::Launch {
                program: "docker".to_string(),
                reason: "No such file or directory".to_string(),
            }),
        );
        let report = h.orchestrator.restart("abc").await;
        assert!(report.error().unwrap().contains("Failed to launch docker"));
    }

    #[tokio::test]
    async fn test_each_action_runs_its_own_command() {
        let h = harness();
        assert!(h.orchestrator.start("a1").await.is_success());
        assert!(h.orchestrator.stop("a1").await.is_success());
        let report = h.orchestrator.restart("a1").await;

        assert_eq!(report.message(), Some("Container restarted successfully"));
        assert_eq!(report.refresh.unwrap().expectation, Expectation::Running("a1".to_string()));
        assert_eq!(
            h.executor.call_lines(),
            ["docker start a1", "docker stop a1", "docker restart a1"]
        );
    }

    #[tokio::test]
    async fn test_invalid_identifier_never_reaches_executor() {
        let h = harness();
        let report = h.orchestrator.start("abc; rm -rf /").await;
        assert!(!report.is_success());
        assert!(h.executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remove_continues_after_failed_stop() {
        let h = harness();
        h.executor
            .on("docker", &["stop"], Ok(CommandOutput::failure(1, "already stopped")));
        let report = h.orchestrator.remove("brave-mcp-server", false).await;

        assert!(report.is_success());
        assert_eq!(report.message(), Some("Container brave-mcp-server removed successfully"));
        assert_eq!(
            h.executor.call_lines(),
            ["docker stop brave-mcp-server", "docker rm brave-mcp-server"]
        );
        assert_eq!(
            report.refresh.unwrap().expectation,
            Expectation::Removed("brave-mcp-server".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_fails_when_rm_fails() {
        let h = harness();
        h.executor
            .on("docker", &["rm"], Ok(CommandOutput::failure(1, "No such container")));
        let report = h.orchestrator.remove("brave-mcp-server", true).await;

        assert!(report.error().unwrap().starts_with("Failed to remove container:"));
        assert!(!h.executor.call_lines().iter().any(|c| c.contains("images")));
    }

    #[tokio::test]
    async fn test_remove_with_image() {
        let h = harness();
        h.executor.on(
            "docker",
            &["images"],
            Ok(CommandOutput::success("111 postgres\n222 mcp/brave-search\n")),
        );
        let report = h.orchestrator.remove("brave-mcp-server", true).await;

        assert!(report.is_success());
        assert_eq!(report.message(), Some("Container and image removed successfully"));
        assert_eq!(report.warning(), None);
        assert_eq!(h.executor.call_lines().last().unwrap(), "docker rmi -f 222");
    }

    #[tokio::test]
    async fn test_remove_image_lookup_failure_is_warning() {
        let h = harness();
        h.executor
            .on("docker", &["images"], Ok(CommandOutput::failure(1, "daemon error")));
        let report = h.orchestrator.remove("brave-mcp-server", true).await;

        assert!(report.is_success());
        assert!(report.warning().unwrap().contains("mcp/brave"));
        assert!(report.refresh.is_some());
    }

    #[tokio::test]
    async fn test_remove_no_matching_image_is_warning() {
        let h = harness();
        h.executor
            .on("docker", &["images"], Ok(CommandOutput::success("111 postgres\n")));
        let report = h.orchestrator.remove("brave-mcp-server", true).await;

        assert!(report.is_success());
        assert_eq!(report.warning(), Some("No matching image found for mcp/brave"));
    }

    #[tokio::test]
    async fn test_remove_rmi_failure_is_warning() {
        let h = harness();
        h.executor
            .on("docker", &["images"], Ok(CommandOutput::success("222 mcp/brave\n")))
            .on("docker", &["rmi"], Ok(CommandOutput::failure(1, "image is in use")));
        let report = h.orchestrator.remove("brave-mcp-server", true).await;

        assert!(report.is_success());
        assert!(report.warning().unwrap().starts_with("Container removed but failed to remove image"));
    }

    #[tokio::test]
    async fn test_deploy_runs_script_with_hardened_profile() {
        let h = harness();
        h.executor.on(
            "pwsh",
            &["-NoProfile"],
            Ok(CommandOutput::success("Container started")),
        );
        let report = h.orchestrator.deploy("loadBraveMCP.ps1", None).await;

        assert!(report.is_success(), "{report:?}");
        assert_eq!(report.output().unwrap().stdout, "Container started");
        let calls = h.executor.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].args.contains(&"-NonInteractive".to_string()));
        assert_eq!(calls[0].working_dir, Some(PathBuf::from("/srv/scripts")));
        let plan = report.refresh.unwrap();
        assert_eq!(plan.delay, Duration::from_secs(2));
        assert_eq!(plan.expectation, Expectation::Deployed("brave-mcp-server".to_string()));
    }

    #[tokio::test]
    async fn test_deploy_failure_surfaces_output() {
        let h = harness();
        h.executor.on(
            "pwsh",
            &["-NoProfile"],
            Ok(CommandOutput {
                exit_code: Some(2),
                stdout: "pulling image".to_string(),
                stderr: "pull access denied".to_string(),
            }),
        );
        let report = h.orchestrator.deploy("loadBraveMCP.ps1", None).await;

        assert!(report.error().unwrap().starts_with("Failed to deploy server:"));
        let output = report.output().unwrap();
        assert_eq!(output.stdout, "pulling image");
        assert_eq!(output.stderr, "pull access denied");
    }

    #[tokio::test]
    async fn test_deploy_unknown_script() {
        let h = harness();
        let report = h.orchestrator.deploy("loadMissingMCP.ps1", None).await;
        assert!(report.error().unwrap().contains("Script not found"));
        assert!(h.executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_rejects_path_traversal() {
        let h = harness();
        let report = h.orchestrator.deploy("../loadBraveMCP.ps1", None).await;
        assert!(!report.is_success());
        assert!(h.executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_persists_settings_first() {
        let h = harness_with(InMemorySettingsStore::new().with_template("brave", brave_template()));
        let supplied = values(&[("BRAVE_API_KEY", "k"), ("BRAVE_REGION", "")]);
        let report = h.orchestrator.deploy("loadBraveMCP.ps1", Some(&supplied)).await;

        assert!(report.is_success());
        assert_eq!(h.store.stored("brave").unwrap(), values(&[("BRAVE_API_KEY", "k")]));
    }

    #[tokio::test]
    async fn test_deploy_gate_blocks_missing_required() {
        let h = harness_with(InMemorySettingsStore::new().with_template("brave", brave_template()));
        let report = h
            .orchestrator
            .deploy("loadBraveMCP.ps1", Some(&BTreeMap::new()))
            .await;

        assert!(report.error().unwrap().contains("BRAVE_API_KEY"));
        assert_eq!(h.store.save_count(), 0);
        assert!(h.executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_gate_ignores_required_placeholder_default() {
        let mut template = brave_template();
        template.defaults.insert("BRAVE_API_KEY".to_string(), "your-key".to_string());
        let h = harness_with(InMemorySettingsStore::new().with_template("brave", template));
        let report = h
            .orchestrator
            .deploy("loadBraveMCP.ps1", Some(&BTreeMap::new()))
            .await;

        assert_eq!(report.operation.status, OperationStatus::Failed);
        assert!(report.error().unwrap().contains("BRAVE_API_KEY"));
        assert_eq!(h.store.save_count(), 0);
        assert!(h.executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_persists_optional_defaults() {
        let mut template = brave_template();
        template.optional_names.push("BRAVE_REGION".to_string());
        template.defaults.insert("BRAVE_REGION".to_string(), "us".to_string());
        let h = harness_with(InMemorySettingsStore::new().with_template("brave", template));
        let supplied = values(&[("BRAVE_API_KEY", "k")]);
        let report = h.orchestrator.deploy("loadBraveMCP.ps1", Some(&supplied)).await;

        assert!(report.is_success());
        assert_eq!(
            h.store.stored("brave").unwrap(),
            values(&[("BRAVE_API_KEY", "k"), ("BRAVE_REGION", "us")])
        );
    }

    #[tokio::test]
    async fn test_redeploy_sequence() {
        let h = harness();
        h.executor
            .on("docker", &["stop"], Ok(CommandOutput::failure(1, "not running")))
            .on("docker", &["rm"], Ok(CommandOutput::failure(1, "No such container")));
        let report = h
            .orchestrator
            .redeploy("brave-mcp-server", "loadBraveMCP.ps1", None)
            .await;

        assert!(report.is_success());
        assert_eq!(report.message(), Some("Server re-deployed successfully"));
        let lines = h.executor.call_lines();
        assert_eq!(lines[0], "docker stop brave-mcp-server");
        assert_eq!(lines[1], "docker rm brave-mcp-server");
        assert!(lines[2].starts_with("pwsh -NoProfile"));
    }

    #[tokio::test]
    async fn test_redeploy_checks_script_before_touching_instance() {
        let h = harness();
        let report = h
            .orchestrator
            .redeploy("brave-mcp-server", "loadGoneMCP.ps1", None)
            .await;
        assert!(report.error().unwrap().starts_with("Failed to re-deploy server:"));
        assert!(h.executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_busy_target_is_rejected() {
        let h = harness();
        let _held = h.orchestrator.locks().try_acquire("brave-mcp-server").unwrap();

        let report = h.orchestrator.remove("brave-mcp-server", false).await;
        assert!(report.error().unwrap().contains("already in progress"));
        let report = h.orchestrator.deploy("loadBraveMCP.ps1", None).await;
        assert!(report.error().unwrap().contains("already in progress"));
        assert!(h.executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_lock_released_after_operation() {
        let h = harness();
        let _ = h.orchestrator.stop("abc").await;
        assert!(!h.orchestrator.locks().is_busy("abc"));
    }

    #[tokio::test]
    async fn test_save_settings_has_no_refresh() {
        let h = harness();
        let report = h
            .orchestrator
            .save_settings("brave", &values(&[("BRAVE_API_KEY", "k")]))
            .await;

        assert_eq!(report.message(), Some("Settings saved successfully"));
        assert!(report.refresh.is_none());
        assert!(h.executor.calls().is_empty());
        assert_eq!(h.store.save_count(), 1);
    }
}

//! `FleetCore` - the composition root of core services and the request
//! dispatcher.
//!
//! Adapters (CLI, GUI bridges) build one `FleetCore` with concrete ports and
//! call [`FleetCore::handle`] per request. Mutating requests come back with a
//! [`RefreshPlan`]; whether to await [`FleetCore::settle`] (the listing) or
//! [`FleetCore::settle_catalog`] (the reconciled catalog) is the caller's call.

use std::sync::Arc;

use tracing::debug;

use super::{FleetService, LifecycleOrchestrator, RefreshPlan, SettingsService, TargetLocks};
use crate::config::FleetConfig;
use crate::events::{
    ActionPayload, CatalogPayload, CatalogServer, DeployPayload, InstancesPayload, LogsPayload,
    Reply, Request, Response, SettingsPayload,
};
use crate::ports::{CatalogSource, CommandExecutor, CoreError, SettingsStore};
use crate::reconcile::ReconcileReport;

/// Added to a settled catalog when the poll budget ran out first.
pub const UNSETTLED_WARNING: &str = "Runtime had not reached the expected state yet";

/// The core facade.
pub struct FleetCore {
    config: FleetConfig,
    fleet: FleetService,
    settings: SettingsService,
    orchestrator: LifecycleOrchestrator,
}

impl FleetCore {
    /// Validate `config` and wire the services over the given ports.
    pub fn new(
        config: FleetConfig,
        executor: Arc<dyn CommandExecutor>,
        catalog: Arc<dyn CatalogSource>,
        store: Arc<dyn SettingsStore>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let settings = SettingsService::new(store);
        let fleet = FleetService::new(Arc::clone(&executor), Arc::clone(&catalog), &config);
        let orchestrator = LifecycleOrchestrator::new(
            executor,
            catalog,
            settings.clone(),
            &config,
            TargetLocks::new(),
        );
        Ok(Self {
            config,
            fleet,
            settings,
            orchestrator,
        })
    }

    pub const fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub const fn fleet(&self) -> &FleetService {
        &self.fleet
    }

    pub const fn settings(&self) -> &SettingsService {
        &self.settings
    }

    pub const fn orchestrator(&self) -> &LifecycleOrchestrator {
        &self.orchestrator
    }

    /// Answer one request. Never fails: errors become the payload's `error`.
    pub async fn handle(&self, request: Request) -> Reply {
        debug!(request = request.name(), "Handling request");
        match request {
            Request::ListInstances => Reply::new(self.list_instances().await),
            Request::ListCatalog => Reply::new(self.list_catalog().await),
            Request::GetLogs { id, tail } => {
                let payload = match self.fleet.logs(&id, tail).await {
                    Ok(logs) => LogsPayload {
                        id,
                        logs: Some(logs),
                        error: None,
                    },
                    Err(e) => LogsPayload {
                        id,
                        logs: None,
                        error: Some(format!("Failed to get logs: {e}")),
                    },
                };
                Reply::new(Response::LogsData(payload))
            }
            Request::Start { id } => {
                let report = self.orchestrator.start(&id).await;
                action_reply(ActionPayload::for_id(&report, &id), report.refresh)
            }
            Request::Stop { id } => {
                let report = self.orchestrator.stop(&id).await;
                action_reply(ActionPayload::for_id(&report, &id), report.refresh)
            }
            Request::Restart { id } => {
                let report = self.orchestrator.restart(&id).await;
                action_reply(ActionPayload::for_id(&report, &id), report.refresh)
            }
            Request::Remove {
                container_name,
                remove_image,
            } => {
                let report = self.orchestrator.remove(&container_name, remove_image).await;
                action_reply(ActionPayload::for_name(&report, &container_name), report.refresh)
            }
            Request::Deploy { script_ref, settings } => {
                let report = self.orchestrator.deploy(&script_ref, settings.as_ref()).await;
                Reply {
                    response: Response::DeployResult(DeployPayload::from_report(&report, &script_ref)),
                    refresh: report.refresh,
                }
            }
            Request::Redeploy {
                container_name,
                script_ref,
                settings,
            } => {
                let report = self
                    .orchestrator
                    .redeploy(&container_name, &script_ref, settings.as_ref())
                    .await;
                action_reply(ActionPayload::for_name(&report, &container_name), report.refresh)
            }
            Request::GetSettings { server_type } => {
                let payload = match self.settings.get(&server_type).await {
                    Ok(document) => SettingsPayload::document(document),
                    Err(e) => SettingsPayload::error(
                        &server_type,
                        format!("Failed to get server settings: {e}"),
                    ),
                };
                Reply::new(Response::SettingsData(payload))
            }
            Request::SaveSettings {
                server_type,
                settings,
            } => {
                let report = self.orchestrator.save_settings(&server_type, &settings).await;
                Reply::new(Response::SettingsData(SettingsPayload::saved(
                    &report,
                    &server_type,
                )))
            }
        }
    }

    /// Run a refresh plan and report the resulting listing.
    pub async fn settle(&self, plan: &RefreshPlan) -> Response {
        let payload = match self.fleet.settle(plan).await {
            Ok(settled) => InstancesPayload {
                settled: Some(settled.settled),
                ..InstancesPayload::servers(settled.instances)
            },
            Err(e) => InstancesPayload::error(format!("Failed to refresh instances: {e}")),
        };
        Response::InstancesData(payload)
    }

    /// Run a refresh plan and report the catalog reconciled against the
    /// listing it ended on.
    pub async fn settle_catalog(&self, plan: &RefreshPlan) -> Response {
        let payload = match self.fleet.settled_overview(plan).await {
            Ok((mut report, settled)) => {
                if !settled.settled {
                    report.warnings.push(UNSETTLED_WARNING.to_string());
                }
                catalog_payload(report)
            }
            Err(e) => CatalogPayload {
                error: Some(format!("Failed to refresh available servers: {e}")),
                ..CatalogPayload::default()
            },
        };
        Response::CatalogData(payload)
    }

    async fn list_instances(&self) -> Response {
        let payload = match self.fleet.instances().await {
            Ok(instances) => InstancesPayload::servers(instances),
            Err(e) => InstancesPayload::error(format!("Failed to list instances: {e}")),
        };
        Response::InstancesData(payload)
    }

    async fn list_catalog(&self) -> Response {
        let payload = match self.fleet.overview().await {
            Ok(report) => catalog_payload(report),
            Err(e) => CatalogPayload {
                error: Some(format!("Failed to get available servers: {e}")),
                ..CatalogPayload::default()
            },
        };
        Response::CatalogData(payload)
    }
}

fn catalog_payload(report: ReconcileReport) -> CatalogPayload {
    CatalogPayload {
        servers: Some(report.views.iter().filter_map(CatalogServer::from_view).collect()),
        unmanaged: Some(
            report
                .unmanaged
                .into_iter()
                .filter_map(|view| view.instance)
                .map(Into::into)
                .collect(),
        ),
        warnings: report.warnings,
        error: None,
    }
}

fn action_reply(payload: ActionPayload, refresh: Option<RefreshPlan>) -> Reply {
    Reply {
        response: Response::ActionResult(payload),
        refresh,
    }
}

//! Fleet service - catalog/runtime queries, reconciliation and refresh.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::refresh::{RefreshPlan, Settled};
use crate::config::FleetConfig;
use crate::container::{RuntimeCommands, RuntimeInspector};
use crate::domain::{CatalogEntry, Instance};
use crate::ports::{CatalogSource, CommandExecutor, CoreError};
use crate::reconcile::{ReconcileReport, reconcile};

/// Read-side service over the catalog and the runtime.
#[derive(Clone)]
pub struct FleetService {
    catalog: Arc<dyn CatalogSource>,
    inspector: RuntimeInspector,
    config: FleetConfig,
}

impl FleetService {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        catalog: Arc<dyn CatalogSource>,
        config: &FleetConfig,
    ) -> Self {
        Self {
            catalog,
            inspector: RuntimeInspector::new(
                executor,
                RuntimeCommands::new(&config.runtime_binary),
                &config.image_namespace,
                config.listing_output_limit,
            ),
            config: config.clone(),
        }
    }

    pub async fn catalog_entries(&self) -> Result<Vec<CatalogEntry>, CoreError> {
        Ok(self.catalog.list_entries().await?)
    }

    /// Instances in our image namespace.
    pub async fn instances(&self) -> Result<Vec<Instance>, CoreError> {
        Ok(self.inspector.list_instances().await?)
    }

    /// Reconciled view of the whole fleet.
    ///
    /// An unreadable catalog is an error. An unavailable runtime is not: every
    /// entry is reported undeployed and the failure becomes a warning.
    pub async fn overview(&self) -> Result<ReconcileReport, CoreError> {
        let entries = self.catalog_entries().await?;
        match self.inspector.list_instances().await {
            Ok(instances) => Ok(reconcile(&entries, &instances)),
            Err(e) => {
                warn!(error = %e, "Runtime listing failed, reporting catalog as undeployed");
                let mut report = reconcile(&entries, &[]);
                report.warnings.push(e.to_string());
                Ok(report)
            }
        }
    }

    /// Recent log output for an instance. `None` uses the configured tail.
    pub async fn logs(&self, id: &str, tail_lines: Option<u32>) -> Result<String, CoreError> {
        let tail = tail_lines.unwrap_or(self.config.log_tail_lines);
        Ok(self.inspector.logs(id, tail).await?)
    }

    /// Wait out the settle delay, then poll until the plan's expectation
    /// holds or the poll budget is spent.
    pub async fn settle(&self, plan: &RefreshPlan) -> Result<Settled, CoreError> {
        sleep(plan.delay).await;

        let max_polls = self.config.refresh_max_polls.max(1);
        let mut polls = 0;
        loop {
            let instances = self.inspector.list_instances().await?;
            polls += 1;
            let settled = plan.expectation.is_met(&instances);
            if settled || polls >= max_polls {
                debug!(polls, settled, expectation = ?plan.expectation, "Refresh finished");
                if !settled {
                    warn!(polls, expectation = ?plan.expectation, "Runtime did not reach expected state");
                }
                return Ok(Settled {
                    instances,
                    settled,
                    polls,
                });
            }
            sleep(self.config.refresh_poll_interval()).await;
        }
    }

    /// Settle, then reconcile the catalog against the final listing.
    ///
    /// The runtime is not queried again; the report reflects the snapshot
    /// the refresh ended on.
    pub async fn settled_overview(
        &self,
        plan: &RefreshPlan,
    ) -> Result<(ReconcileReport, Settled), CoreError> {
        let settled = self.settle(plan).await?;
        let entries = self.catalog_entries().await?;
        Ok((reconcile(&entries, &settled.instances), settled))
    }
}

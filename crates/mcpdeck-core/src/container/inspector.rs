//! Read-only queries against the container runtime.

use std::sync::Arc;

use tracing::debug;

use super::commands::RuntimeCommands;
use super::listing::parse_listing;
use crate::domain::Instance;
use crate::ports::{CommandExecutor, RunOptions, RuntimeError};

/// Lists instances and fetches logs through the command executor.
#[derive(Clone)]
pub struct RuntimeInspector {
    executor: Arc<dyn CommandExecutor>,
    commands: RuntimeCommands,
    namespace: String,
    options: RunOptions,
}

impl RuntimeInspector {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        commands: RuntimeCommands,
        namespace: impl Into<String>,
        max_output_bytes: usize,
    ) -> Self {
        Self {
            executor,
            commands,
            namespace: namespace.into(),
            options: RunOptions::default().with_max_output(max_output_bytes),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Every instance the runtime reports whose image carries our namespace.
    ///
    /// Fails with [`RuntimeError::Unavailable`] when the query cannot run or
    /// exits non-zero. Malformed lines are dropped, not fatal.
    pub async fn list_instances(&self) -> Result<Vec<Instance>, RuntimeError> {
        let spec = self.commands.list_all();
        let output = self
            .executor
            .run(&spec, &self.options)
            .await
            .map_err(|e| RuntimeError::Unavailable(e.to_string()))?;

        if !output.is_success() {
            return Err(RuntimeError::Unavailable(format!(
                "{spec} failed: {}",
                output.stderr.trim()
            )));
        }

        let instances: Vec<Instance> = parse_listing(&output.stdout)
            .into_iter()
            .filter(|i| i.is_mcp(&self.namespace))
            .collect();
        debug!(count = instances.len(), "Listed runtime instances");
        Ok(instances)
    }

    /// Last `tail_lines` of an instance's logs, stderr appended after stdout.
    pub async fn logs(&self, id: &str, tail_lines: u32) -> Result<String, RuntimeError> {
        let spec = self.commands.logs(id, tail_lines)?;
        let output = super::run_checked(self.executor.as_ref(), &spec, &self.options).await?;
        if output.stderr.is_empty() {
            Ok(output.stdout)
        } else {
            Ok(format!("{}\n{}", output.stdout, output.stderr))
        }
    }
}

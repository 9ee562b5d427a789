//! In-memory port implementations for tests.
//!
//! Enabled for this crate's own tests and, through the `test-utils` feature,
//! for downstream integration tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{CatalogEntry, SettingsTemplate, SettingsValues, without_empty};
use crate::ports::{
    CatalogError, CatalogSource, CommandExecutor, CommandOutput, CommandSpec, ExecError,
    RunOptions, SettingsError, SettingsStore,
};
use crate::settings::validate_values;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Rule {
    program: String,
    args_prefix: Vec<String>,
    responses: VecDeque<Result<CommandOutput, ExecError>>,
}

impl Rule {
    fn matches(&self, spec: &CommandSpec) -> bool {
        spec.program == self.program && spec.args.starts_with(&self.args_prefix)
    }

    /// Queued responses are consumed in order; the last one repeats.
    fn next(&mut self) -> Result<CommandOutput, ExecError> {
        if self.responses.len() > 1 {
            self.responses.pop_front().unwrap_or_else(|| Ok(CommandOutput::success("")))
        } else {
            self.responses
                .front()
                .cloned()
                .unwrap_or_else(|| Ok(CommandOutput::success("")))
        }
    }
}

/// Command executor that answers from scripted rules and records every call.
///
/// A rule matches on program plus an argument prefix. Unmatched commands
/// succeed with empty output.
#[derive(Default)]
pub struct ScriptedExecutor {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for commands starting with `program args_prefix...`.
    pub fn on(
        &self,
        program: &str,
        args_prefix: &[&str],
        response: Result<CommandOutput, ExecError>,
    ) -> &Self {
        let args_prefix: Vec<String> = args_prefix.iter().map(ToString::to_string).collect();
        let mut rules = lock(&self.rules);
        if let Some(rule) = rules
            .iter_mut()
            .find(|r| r.program == program && r.args_prefix == args_prefix)
        {
            rule.responses.push_back(response);
        } else {
            rules.push(Rule {
                program: program.to_string(),
                args_prefix,
                responses: VecDeque::from([response]),
            });
        }
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        lock(&self.calls).clone()
    }

    /// Calls rendered as command lines.
    pub fn call_lines(&self) -> Vec<String> {
        lock(&self.calls).iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn run(&self, spec: &CommandSpec, _options: &RunOptions) -> Result<CommandOutput, ExecError> {
        lock(&self.calls).push(spec.clone());
        let mut rules = lock(&self.rules);
        // Longest prefix wins so specific rules can shadow general ones.
        rules
            .iter_mut()
            .filter(|rule| rule.matches(spec))
            .max_by_key(|rule| rule.args_prefix.len())
            .map_or_else(|| Ok(CommandOutput::success("")), Rule::next)
    }
}

/// Fixed catalog.
#[derive(Default)]
pub struct InMemoryCatalog {
    entries: Mutex<Vec<CatalogEntry>>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(lock(&self.entries).clone())
    }
}

/// Settings store backed by maps. Saves drop empty values like the file store.
#[derive(Default)]
pub struct InMemorySettingsStore {
    templates: Mutex<HashMap<String, SettingsTemplate>>,
    values: Mutex<HashMap<String, SettingsValues>>,
    saves: Mutex<usize>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_template(self, server_type: &str, template: SettingsTemplate) -> Self {
        lock(&self.templates).insert(server_type.to_string(), template);
        self
    }

    #[must_use]
    pub fn with_values(self, server_type: &str, values: SettingsValues) -> Self {
        lock(&self.values).insert(server_type.to_string(), values);
        self
    }

    pub fn stored(&self, server_type: &str) -> Option<SettingsValues> {
        lock(&self.values).get(server_type).cloned()
    }

    pub fn save_count(&self) -> usize {
        *lock(&self.saves)
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load_template(&self, server_type: &str) -> Result<SettingsTemplate, SettingsError> {
        Ok(lock(&self.templates)
            .get(server_type)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_values(&self, server_type: &str) -> Result<SettingsValues, SettingsError> {
        Ok(lock(&self.values)
            .get(server_type)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, server_type: &str, values: &SettingsValues) -> Result<(), SettingsError> {
        validate_values(values)?;
        lock(&self.values).insert(server_type.to_string(), without_empty(values));
        *lock(&self.saves) += 1;
        Ok(())
    }
}

//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Process executor (via mcpdeck-runtime)
//! - Filesystem catalog scanner and settings store (via mcpdeck-runtime)
//! - Core services (via mcpdeck-core)
//!
//! Command handlers receive the fully-composed `FleetCore` and delegate work to it.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use mcpdeck_core::paths::{default_catalog_dir, default_settings_dir, normalize_user_path};
use mcpdeck_core::{FleetConfig, FleetCore};
use mcpdeck_runtime::{FsCatalogScanner, FsSettingsStore, ProcessCommandExecutor};

use crate::error::CliError;
use crate::parser::Cli;

/// Settings live in this subdirectory of an explicitly chosen catalog dir.
const SETTINGS_SUBDIR: &str = "settings";

/// Fully composed application context for CLI commands.
pub struct CliContext {
    core: FleetCore,
    json: bool,
}

impl CliContext {
    pub fn new(core: FleetCore, json: bool) -> Self {
        Self { core, json }
    }

    /// Access the core facade.
    pub const fn core(&self) -> &FleetCore {
        &self.core
    }

    /// Whether output should be JSON documents rather than tables.
    pub const fn json(&self) -> bool {
        self.json
    }
}

/// Load `.env` from the working directory (or a parent), if present.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects `debug` and the default
/// is `warn`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build the engine configuration from global flags (and their env fallbacks).
///
/// An explicit `--catalog-dir` without `--settings-dir` puts settings in its
/// `settings/` subdirectory, matching the default layout.
pub fn build_config(cli: &Cli) -> Result<FleetConfig, CliError> {
    let catalog_dir = match cli.catalog_dir.as_deref() {
        Some(raw) => normalize_user_path(raw)?,
        None => default_catalog_dir()?,
    };
    let settings_dir: PathBuf = match (cli.settings_dir.as_deref(), cli.catalog_dir.is_some()) {
        (Some(raw), _) => normalize_user_path(raw)?,
        (None, true) => catalog_dir.join(SETTINGS_SUBDIR),
        (None, false) => default_settings_dir()?,
    };

    let mut config = FleetConfig::with_defaults(catalog_dir, settings_dir);
    if let Some(runtime) = &cli.runtime {
        config.runtime_binary.clone_from(runtime);
    }
    if let Some(namespace) = &cli.image_namespace {
        config.image_namespace.clone_from(namespace);
    }
    config.script_timeout_secs = cli.script_timeout;
    config.validate()?;
    debug!(
        catalog_dir = %config.catalog_dir.display(),
        settings_dir = %config.settings_dir.display(),
        runtime = %config.runtime_binary,
        "Configuration resolved"
    );
    Ok(config)
}

/// Bootstrap the CLI application over the production adapters.
pub fn bootstrap(config: FleetConfig, json: bool) -> Result<CliContext, CliError> {
    let catalog = Arc::new(FsCatalogScanner::new(&config.catalog_dir));
    let store = Arc::new(FsSettingsStore::new(&config.settings_dir));
    let core = FleetCore::new(config, Arc::new(ProcessCommandExecutor::new()), catalog, store)?;
    Ok(CliContext::new(core, json))
}

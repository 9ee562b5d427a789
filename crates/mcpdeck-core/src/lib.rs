//! Core of mcpdeck: discovers MCP server definitions from a catalog of
//! provisioning scripts, reconciles them with the container runtime, and
//! sequences lifecycle operations through an injected command executor.
//!
//! This crate never spawns processes or touches the filesystem outside
//! [`paths`]; adapters live in `mcpdeck-runtime`.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod container;
pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;
pub mod provisioning;
pub mod reconcile;
pub mod services;
pub mod settings;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use config::{ConfigError, FleetConfig};
pub use domain::{
    CatalogEntry, IdentifierError, Instance, Operation, OperationKind, OperationStatus,
    ScriptKind, ScriptRef, ServerView, SettingsDocument, SettingsTemplate, SettingsValues,
    indicates_running,
};
pub use events::{Reply, Request, Response};
pub use ports::{
    CatalogError, CatalogSource, CommandExecutor, CommandOutput, CommandSpec, CoreError,
    ExecError, RunOptions, RuntimeError, SettingsError, SettingsStore,
};
pub use reconcile::{ReconcileReport, reconcile};
pub use services::{
    FleetCore, FleetService, LifecycleOrchestrator, OperationReport, RefreshPlan,
    SettingsService, TargetLocks,
};

pub use paths::{PathError, data_root, default_catalog_dir, default_settings_dir};

//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports and domain logic. They never know which
//! concrete adapters they run against.

mod fleet_core;
mod fleet_service;
mod locks;
mod orchestrator;
mod refresh;
mod settings_service;

pub use fleet_core::FleetCore;
pub use fleet_service::FleetService;
pub use locks::{TargetGuard, TargetLocks};
pub use orchestrator::{Completed, LifecycleOrchestrator, OperationReport, Outcome};
pub use refresh::{Expectation, RefreshPlan, Settled};
pub use settings_service::SettingsService;

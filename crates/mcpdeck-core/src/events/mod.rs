//! Request/response surface exposed to presentation layers.
//!
//! Names and payload shapes are the contract with the UI. The core answers
//! each [`Request`] with exactly one [`Response`]; there is no event bus.

mod request;
mod response;

pub use request::Request;
pub use response::{
    ActionPayload, CatalogPayload, CatalogServer, DeployPayload, InstanceSummary,
    InstancesPayload, LogsPayload, Reply, Response, SettingsPayload,
};

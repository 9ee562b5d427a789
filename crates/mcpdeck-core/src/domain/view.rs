//! The reconciled server view consumed by callers.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use super::instance::Instance;

/// A catalog entry joined with at most one runtime instance.
///
/// `entry` is `None` only for unmanaged instances: containers in the system's
/// image namespace that no catalog entry claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerView {
    pub entry: Option<CatalogEntry>,
    pub instance: Option<Instance>,
}

impl ServerView {
    /// True iff a matching instance exists, running or not.
    pub const fn is_deployed(&self) -> bool {
        self.instance.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.instance.as_ref().is_some_and(Instance::is_running)
    }

    pub const fn is_managed(&self) -> bool {
        self.entry.is_some()
    }

    /// Name the runtime knows this server by, if any is known.
    pub fn instance_name(&self) -> Option<&str> {
        self.entry
            .as_ref()
            .map(|e| e.instance_name.as_str())
            .or_else(|| self.instance.as_ref().map(|i| i.name.as_str()))
    }
}

//! Post-operation refresh: settle delay, then bounded polling.
//!
//! The runtime's listing can lag a mutating command. A refresh waits the
//! settle delay, then lists until the expected state shows up or the poll
//! budget runs out.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::Instance;

/// State the runtime should report once an operation has taken effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "target", rename_all = "kebab-case")]
pub enum Expectation {
    /// An instance with this name exists.
    Deployed(String),
    /// No instance with this name exists.
    Removed(String),
    /// The instance (id or name) exists and is up.
    Running(String),
    /// The instance (id or name) is absent or not up.
    Stopped(String),
}

impl Expectation {
    /// Whether `instances` already reflect this expectation.
    pub fn is_met(&self, instances: &[Instance]) -> bool {
        match self {
            Self::Deployed(name) => instances.iter().any(|i| i.name_matches(name)),
            Self::Removed(name) => !instances.iter().any(|i| i.name_matches(name)),
            Self::Running(target) => find(instances, target).is_some_and(Instance::is_running),
            Self::Stopped(target) => !find(instances, target).is_some_and(Instance::is_running),
        }
    }
}

/// Match by name, or by id where either side may be the short form.
fn find<'a>(instances: &'a [Instance], target: &str) -> Option<&'a Instance> {
    instances.iter().find(|i| {
        i.name_matches(target)
            || i.runtime_id.starts_with(target)
            || target.starts_with(i.runtime_id.as_str())
    })
}

/// A scheduled refresh, handed to the caller alongside the operation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPlan {
    #[serde(with = "millis")]
    pub delay: Duration,
    pub expectation: Expectation,
}

/// Outcome of a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settled {
    /// Last listing taken.
    pub instances: Vec<Instance>,
    /// `false` when the poll budget ran out first.
    pub settled: bool,
    pub polls: u32,
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

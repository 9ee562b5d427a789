//! Joins catalog entries with runtime instances.
//!
//! Pure and deterministic: the same inputs always produce the same report.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{CatalogEntry, Instance, ServerView};

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// One view per catalog entry, in catalog order.
    pub views: Vec<ServerView>,
    /// Instances that match no catalog entry (views with `entry: None`).
    pub unmanaged: Vec<ServerView>,
    /// Naming-convention violations. Never fatal.
    pub warnings: Vec<String>,
}

/// Correlate each entry with the instance named `entry.instance_name`.
///
/// The match is case-insensitive. When several instances share a name the
/// first one wins and a warning is recorded.
pub fn reconcile(entries: &[CatalogEntry], instances: &[Instance]) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut claimed = vec![false; instances.len()];

    for entry in entries {
        let mut matches = instances
            .iter()
            .enumerate()
            .filter(|(_, instance)| instance.name_matches(&entry.instance_name));

        let first = matches.next().map(|(idx, instance)| {
            claimed[idx] = true;
            instance.clone()
        });

        let extra: Vec<&str> = matches
            .map(|(idx, instance)| {
                claimed[idx] = true;
                instance.runtime_id.as_str()
            })
            .collect();
        if let Some(winner) = first.as_ref().filter(|_| !extra.is_empty()) {
            let message = format!(
                "{} instances are named {}; using {} and ignoring {}",
                extra.len() + 1,
                entry.instance_name,
                winner.runtime_id,
                extra.join(", ")
            );
            warn!(entry = %entry.id, "{message}");
            report.warnings.push(message);
        }

        report.views.push(ServerView {
            entry: Some(entry.clone()),
            instance: first,
        });
    }

    report.unmanaged = instances
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(instance, _)| ServerView {
            entry: None,
            instance: Some(instance.clone()),
        })
        .collect();

    report
}

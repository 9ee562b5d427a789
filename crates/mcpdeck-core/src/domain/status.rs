//! Running-state heuristic over the runtime's free-form status text.
//!
//! The container runtime reports status as prose ("Up 3 hours",
//! "Exited (0) 2 minutes ago", "Created"). Only this module interprets it.

/// Prefix the runtime uses for every running state, including paused and
/// health-annotated variants ("Up 2 minutes (healthy)").
const RUNNING_PREFIX: &str = "up";

/// Whether a status string describes a running instance.
pub fn indicates_running(status_text: &str) -> bool {
    status_text
        .trim_start()
        .get(..RUNNING_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(RUNNING_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_statuses() {
        assert!(indicates_running("Up 3 hours"));
        assert!(indicates_running("Up 2 minutes (healthy)"));
        assert!(indicates_running("  up About a minute"));
    }

    #[test]
    fn test_stopped_statuses() {
        assert!(!indicates_running("Exited (0) 2 minutes ago"));
        assert!(!indicates_running("Created"));
        assert!(!indicates_running("Restarting (1) 5 seconds ago"));
        assert!(!indicates_running(""));
    }
}

//! Configuration for the coordinator and the debouncer.

use std::time::Duration;

/// Static configuration for a [`SearchCoordinator`](crate::SearchCoordinator).
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Store key holding the last attempted query.
    pub storage_key: String,

    /// Message shown for every genuine lookup failure.
    pub failure_message: String,

    /// Resume the stored query when the coordinator is opened.
    pub hydrate: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            storage_key: "lastSearch".into(),
            failure_message: "User not found".into(),
            hydrate: true,
        }
    }
}

/// Static configuration for a [`Debouncer`](crate::Debouncer).
#[derive(Debug, Clone)]
pub struct DebounceConfig {
    /// How long input must stay unchanged before it is submitted.
    pub quiet_period: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(500),
        }
    }
}

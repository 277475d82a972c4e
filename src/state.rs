//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::health::HealthState;
use crate::kill::KillSwitch;

/// Shared application state, cloneable across handlers.
///
/// Holds the resolved configuration, the readiness flag and the kill switch.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub health: HealthState,
    pub kill: KillSwitch,
}

impl AppState {
    /// Creates application state that starts out not ready.
    pub fn new(config: AppConfig) -> Self {
        let kill = KillSwitch::new(config.kill.exit_code);
        Self {
            config: Arc::new(config),
            health: HealthState::new(),
            kill,
        }
    }
}

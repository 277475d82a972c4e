//! Readiness state machine.
//!
//! # States
//! - NotReady: `/healthz` answers 500
//! - Ready: `/healthz` answers 200
//!
//! # State Transitions
//! ```text
//! NotReady → Ready:    init delay elapsed (once), or /heal
//! Ready    → NotReady: /damage
//! ```
//!
//! The startup timer sets the flag unconditionally when it fires, so a damage
//! request made during the init delay is overwritten.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Shared readiness flag, cloneable across handlers and background tasks.
#[derive(Clone, Debug, Default)]
pub struct HealthState {
    ready: Arc<AtomicBool>,
}

impl HealthState {
    /// Create a new health state starting as not ready.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Replace the readiness flag. Visible to every subsequent `is_ready`.
    pub fn set_ready(&self, ready: bool) {
        let previous = self.ready.swap(ready, Ordering::AcqRel);
        if previous != ready {
            tracing::debug!(ready, "Readiness changed");
        }
    }

    /// Report the server as unhealthy.
    pub fn damage(&self) {
        self.set_ready(false);
    }

    /// Report the server as healthy.
    pub fn heal(&self) {
        self.set_ready(true);
    }
}

/// Spawn the one-shot task that marks the server ready after `delay`.
///
/// The task cannot be cancelled through the health state and ignores any
/// damage that happened while it was sleeping.
pub fn spawn_readiness_timer(health: HealthState, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        health.set_ready(true);
        tracing::info!(delay = ?delay, "Initialization delay elapsed, reporting ready");
    })
}

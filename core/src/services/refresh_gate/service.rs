//! Refresh gate implementation

use std::sync::Arc;

use cal_shared::GateConfig;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::gate_state::GateState;
use crate::errors::DomainError;
use crate::repositories::CounterStore;

/// Namespace of gate keys inside the counter store
pub const GATE_KEY_NAMESPACE: &str = "cal_tkn";

/// Per-resource counter deciding between cached and regenerated exports
///
/// The read and the write of a decision are separate store calls. Concurrent
/// accesses to one key may both consume the same credit, so counts are
/// approximate under contention. A stored counter never drops below one and
/// consuming the last credit always writes a fresh window.
pub struct RefreshGate<S: CounterStore> {
    store: S,
    config: GateConfig,
    clock: Arc<dyn Clock>,
}

impl<S: CounterStore> RefreshGate<S> {
    pub fn new(store: S, config: GateConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, config: GateConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Store key for a resource name
    pub fn key_for(resource: &str) -> String {
        format!("{}:{}", GATE_KEY_NAMESPACE, resource)
    }

    /// Whether the cached artifact for `resource` may be served
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Serve the cached artifact
    /// * `Ok(false)` - Regenerate the artifact
    /// * `Err(DomainError::Unavailable)` - Counter store unreachable
    /// * `Err(DomainError::Internal)` - Stored counter is unreadable
    pub async fn should_use_cache(&self, resource: &str) -> Result<bool, DomainError> {
        let key = Self::key_for(resource);
        let now = self.clock.now().timestamp();

        let stored = self.store.get(&key).await.map_err(|e| {
            warn!(resource, "Failed to read refresh gate state: {}", e);
            e
        })?;

        let state = match stored {
            Some(raw) => raw.parse::<GateState>()?,
            None => {
                self.open_window(&key, now).await?;
                debug!(resource, "First access, opened refresh window");
                return Ok(true);
            }
        };

        if !state.is_within_window(now, self.config.window_seconds)? {
            // expired windows are left as they are until the next reset
            debug!(resource, "Refresh window expired, serving cache");
            return Ok(true);
        }

        if state.remaining <= 1 {
            self.open_window(&key, now).await?;
            info!(resource, "Refresh credits used up, forcing regeneration");
            return Ok(false);
        }

        let next = state.consume();
        self.store.set(&key, &next.to_string()).await?;
        debug!(resource, remaining = next.remaining, "Consumed refresh credit");

        Ok(true)
    }

    async fn open_window(&self, key: &str, now: i64) -> Result<(), DomainError> {
        let fresh = GateState::new(now, self.config.credits);
        self.store.set(key, &fresh.to_string()).await
    }
}

// src/config/config_manager.rs

use tokio::time::Duration;

/// Serving knobs, fixed at startup from the CLI.
#[derive(Clone, Debug)]
pub struct ServeConfig {
    /// Slot cardinality: how many ads one serve call may return.
    pub max_per_slot: usize,
    /// Wait budget for the store on the display path; past this the slot
    /// renders empty instead of blocking the page.
    pub store_wait_ms: u64,
}

impl ServeConfig {
    pub fn new(max_per_slot: usize, store_wait_ms: u64) -> Self {
        ServeConfig {
            max_per_slot: max_per_slot.max(1),
            store_wait_ms,
        }
    }

    pub fn store_wait(&self) -> Duration {
        Duration::from_millis(self.store_wait_ms)
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        ServeConfig::new(1, 150)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_cardinality_is_at_least_one() {
        assert_eq!(ServeConfig::new(0, 100).max_per_slot, 1);
        assert_eq!(ServeConfig::new(3, 100).max_per_slot, 3);
    }
}

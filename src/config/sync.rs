use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// What the displayed view does when the remote call fails
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Restore the last confirmed state and tally
    #[default]
    Rollback,
    /// Leave the optimistic value on screen until the next reload
    KeepOptimistic,
}

/// How a flip from one held direction to the opposite reaches the server
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SwitchStrategy {
    /// Single cast-vote call; the server replaces the existing vote
    #[default]
    Upsert,
    /// Remove-vote followed by cast-vote, still one logical submission
    RemoveThenCast,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SyncConfig {
    /// Upper bound for one logical submission, including both calls of a
    /// remove-then-cast switch. Expiry is reported as a failure.
    #[serde(default = "default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub switch_strategy: SwitchStrategy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            submit_timeout_ms: default_submit_timeout_ms(),
            failure_policy: FailurePolicy::default(),
            switch_strategy: SwitchStrategy::default(),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        if self.submit_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "sync.submit_timeout_ms must be at least 1ms".into(),
            ));
        }
        Ok(())
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }
}

fn default_submit_timeout_ms() -> u64 {
    5000
}

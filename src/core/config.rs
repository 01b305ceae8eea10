//! Environment configuration.

use serde::{Deserialize, Serialize};

use super::error::{EnvError, Result};

/// Largest action space an `ActionId` can address.
pub const MAX_ACTION_SPACE: usize = u32::MAX as usize;

/// Default size of the discrete action space.
pub const DEFAULT_MAX_ACTIONS: usize = 4096;

/// Seed used when neither `reset` nor the config supplies one.
pub const DEFAULT_SEED: u64 = 0;

/// Environment configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Codec capacity, which is also the action space size seen by agents.
    pub max_actions: usize,

    /// Seed for `reset(None)`.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Truncate both agents after this many applied moves (None = never).
    #[serde(default)]
    pub max_episode_steps: Option<u32>,

    /// Keep a per-episode log of applied moves.
    #[serde(default = "default_record_history")]
    pub record_history: bool,
}

fn default_record_history() -> bool {
    true
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            max_actions: DEFAULT_MAX_ACTIONS,
            seed: None,
            max_episode_steps: None,
            record_history: default_record_history(),
        }
    }
}

impl EnvConfig {
    /// Set the action space size.
    #[must_use]
    pub fn with_max_actions(mut self, max_actions: usize) -> Self {
        self.max_actions = max_actions;
        self
    }

    /// Set the default seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the truncation horizon.
    #[must_use]
    pub fn with_max_episode_steps(mut self, steps: u32) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    /// Enable or disable the step history.
    #[must_use]
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Check values that would otherwise trip construction-time asserts.
    pub fn validate(&self) -> Result<()> {
        if self.max_actions == 0 || self.max_actions > MAX_ACTION_SPACE {
            return Err(EnvError::InvalidConfig(format!(
                "max_actions must be in 1..={MAX_ACTION_SPACE}, got {}",
                self.max_actions
            )));
        }
        Ok(())
    }
}

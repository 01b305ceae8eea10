//! Reward and termination bookkeeping.
//!
//! Rewards are zero-sum: the engine reports one scalar from player_0's
//! perspective and player_1 receives its negation. Termination and
//! truncation always flip for both agents at once.

use serde::{Deserialize, Serialize};

use crate::core::{AgentId, AgentMap};

/// Instantaneous and cumulative rewards per agent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardLedger {
    rewards: AgentMap<f32>,
    cumulative: AgentMap<f32>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step's reward, mirrored for player_1.
    pub fn apply(&mut self, reward_p0: f32) {
        self.rewards[AgentId::PLAYER_0] = reward_p0;
        self.rewards[AgentId::PLAYER_1] = -reward_p0;

        for agent in AgentId::ALL {
            self.cumulative[agent] += self.rewards[agent];
        }
    }

    /// Zero both instantaneous and cumulative rewards.
    pub fn reset(&mut self) {
        self.rewards.fill_with(|_| 0.0);
        self.cumulative.fill_with(|_| 0.0);
    }

    /// Reward from the most recent step.
    #[must_use]
    pub fn reward(&self, agent: AgentId) -> f32 {
        self.rewards[agent]
    }

    /// Sum of rewards since the last reset.
    #[must_use]
    pub fn cumulative(&self, agent: AgentId) -> f32 {
        self.cumulative[agent]
    }
}

/// Terminated / truncated flags per agent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationLedger {
    terminated: AgentMap<bool>,
    truncated: AgentMap<bool>,
}

impl TerminationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every flag.
    pub fn reset(&mut self) {
        self.terminated.fill_with(|_| false);
        self.truncated.fill_with(|_| false);
    }

    /// Mark both agents terminated.
    pub fn terminate_all(&mut self) {
        self.terminated.fill_with(|_| true);
    }

    /// Mark both agents truncated.
    pub fn truncate_all(&mut self) {
        self.truncated.fill_with(|_| true);
    }

    #[must_use]
    pub fn terminated(&self, agent: AgentId) -> bool {
        self.terminated[agent]
    }

    #[must_use]
    pub fn truncated(&self, agent: AgentId) -> bool {
        self.truncated[agent]
    }

    /// True if `agent` can no longer act this episode.
    #[must_use]
    pub fn is_done(&self, agent: AgentId) -> bool {
        self.terminated[agent] || self.truncated[agent]
    }
}

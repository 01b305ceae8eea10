//! Agent identification and per-agent data storage.
//!
//! ## AgentId
//!
//! The environment is strictly two-player. `AgentId` names one of the two
//! seats (`player_0` moves first, `player_1` second). Any other identity is
//! rejected at the boundary with `EnvError::UnknownAgent`.
//!
//! ## AgentMap
//!
//! Fixed-size per-agent storage indexed by `AgentId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use super::error::EnvError;

/// Number of seats in every game.
pub const AGENT_COUNT: usize = 2;

/// One of the two fixed agent identities.
///
/// Deserialization goes through `TryFrom<u8>`, so a record can never carry
/// an out-of-range seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AgentId(u8);

impl AgentId {
    /// The first agent to move.
    pub const PLAYER_0: AgentId = AgentId(0);

    /// The second agent to move.
    pub const PLAYER_1: AgentId = AgentId(1);

    /// Both agents in declared (turn) order.
    pub const ALL: [AgentId; AGENT_COUNT] = [AgentId::PLAYER_0, AgentId::PLAYER_1];

    /// Look up an agent by seat index.
    pub fn from_index(index: usize) -> Result<Self, EnvError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| EnvError::UnknownAgent(format!("index {index}")))
    }

    /// Get the seat index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The canonical agent name (`player_0` / `player_1`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "player_0",
            _ => "player_1",
        }
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        AgentId(1 - self.0)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for AgentId {
    type Error = EnvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize)
    }
}

impl From<AgentId> for u8 {
    fn from(agent: AgentId) -> Self {
        agent.0
    }
}

impl FromStr for AgentId {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|agent| agent.name() == s)
            .ok_or_else(|| EnvError::UnknownAgent(s.to_string()))
    }
}

/// Per-agent data storage with O(1) access.
///
/// ```
/// use power_chess_env::core::{AgentId, AgentMap};
///
/// let mut totals: AgentMap<f32> = AgentMap::with_value(0.0);
/// totals[AgentId::PLAYER_1] = -1.0;
/// assert_eq!(totals[AgentId::PLAYER_0], 0.0);
/// assert_eq!(totals[AgentId::PLAYER_1], -1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentMap<T> {
    data: [T; AGENT_COUNT],
}

impl<T> AgentMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(AgentId) -> T) -> Self {
        Self {
            data: AgentId::ALL.map(factory),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, agent: AgentId) -> &T {
        &self.data[agent.index()]
    }

    pub fn get_mut(&mut self, agent: AgentId) -> &mut T {
        &mut self.data[agent.index()]
    }

    /// Iterate over (AgentId, &T) pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &T)> {
        AgentId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (AgentId, &mut T) pairs in declared order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AgentId, &mut T)> {
        AgentId::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Overwrite every entry with values from a factory function.
    pub fn fill_with(&mut self, factory: impl Fn(AgentId) -> T) {
        for (agent, slot) in self.iter_mut() {
            *slot = factory(agent);
        }
    }
}

impl<T: Default> Default for AgentMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<AgentId> for AgentMap<T> {
    type Output = T;

    fn index(&self, agent: AgentId) -> &Self::Output {
        self.get(agent)
    }
}

impl<T> IndexMut<AgentId> for AgentMap<T> {
    fn index_mut(&mut self, agent: AgentId) -> &mut Self::Output {
        self.get_mut(agent)
    }
}

//! Cyclic agent scheduler.
//!
//! An explicit ordered list of active agents plus a cursor. Removal is
//! well-defined at any point: the cursor is adjusted so the next call to
//! `next` lands on the agent that followed the removed one.
//!
//! ```text
//! Idle --reset--> Ready --next--> Ready
//!                   |
//!                   +--terminate_all--> Terminal --reset--> Ready
//! ```

use crate::core::{AgentId, AGENT_COUNT};

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePhase {
    /// No game started.
    Idle,
    /// Agents are taking turns.
    Ready,
    /// Every agent has been removed; absorbing until `reset`.
    Terminal,
}

/// Turn order over the live agents.
#[derive(Clone, Debug)]
pub struct TurnCycle {
    order: [AgentId; AGENT_COUNT],
    active: Vec<AgentId>,
    cursor: usize,
    /// Last agent handed the turn. Kept after termination so the caller can
    /// still address the agent that made the final move.
    selected: Option<AgentId>,
    phase: CyclePhase,
}

impl Default for TurnCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnCycle {
    /// Create an idle scheduler over both agents in declared order.
    pub fn new() -> Self {
        Self {
            order: AgentId::ALL,
            active: Vec::with_capacity(AGENT_COUNT),
            cursor: 0,
            selected: None,
            phase: CyclePhase::Idle,
        }
    }

    /// Restore every agent and point the cursor at the first one.
    pub fn reset(&mut self) -> AgentId {
        self.active.clear();
        self.active.extend_from_slice(&self.order);
        self.cursor = 0;
        self.selected = Some(self.order[0]);
        self.phase = CyclePhase::Ready;
        self.order[0]
    }

    /// Advance to the next active agent in cyclic order.
    ///
    /// Returns `None` when no agent is active.
    pub fn next(&mut self) -> Option<AgentId> {
        if self.active.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.active.len();
        let agent = self.active[self.cursor];
        self.selected = Some(agent);
        Some(agent)
    }

    /// The agent `next` would return, without advancing.
    #[must_use]
    pub fn peek_next(&self) -> Option<AgentId> {
        if self.active.is_empty() {
            return None;
        }
        Some(self.active[(self.cursor + 1) % self.active.len()])
    }

    /// The agent currently holding the turn.
    #[must_use]
    pub fn current(&self) -> Option<AgentId> {
        self.selected
    }

    /// Take `agent` out of future cycles.
    pub fn remove(&mut self, agent: AgentId) {
        let Some(pos) = self.active.iter().position(|&a| a == agent) else {
            return;
        };
        self.active.remove(pos);

        if self.active.is_empty() {
            self.cursor = 0;
            self.phase = CyclePhase::Terminal;
        } else if pos <= self.cursor {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.active.len() - 1);
        }
    }

    /// Remove every agent at once.
    pub fn terminate_all(&mut self) {
        self.active.clear();
        self.cursor = 0;
        self.phase = CyclePhase::Terminal;
    }

    #[must_use]
    pub fn is_active(&self, agent: AgentId) -> bool {
        self.active.contains(&agent)
    }

    /// Live agents in turn order.
    #[must_use]
    pub fn active_agents(&self) -> &[AgentId] {
        &self.active
    }

    /// All agents in declared order.
    #[must_use]
    pub fn possible_agents(&self) -> &[AgentId] {
        &self.order
    }

    #[must_use]
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: AgentId = AgentId::PLAYER_0;
    const P1: AgentId = AgentId::PLAYER_1;

    #[test]
    fn test_starts_idle() {
        let cycle = TurnCycle::new();
        assert_eq!(cycle.phase(), CyclePhase::Idle);
        assert_eq!(cycle.current(), None);
        assert!(cycle.active_agents().is_empty());
        assert_eq!(cycle.possible_agents(), &[P0, P1]);
    }

    #[test]
    fn test_reset_and_alternate() {
        let mut cycle = TurnCycle::new();
        assert_eq!(cycle.reset(), P0);
        assert_eq!(cycle.phase(), CyclePhase::Ready);
        assert_eq!(cycle.current(), Some(P0));

        assert_eq!(cycle.next(), Some(P1));
        assert_eq!(cycle.next(), Some(P0));
        assert_eq!(cycle.next(), Some(P1));
        assert_eq!(cycle.current(), Some(P1));
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut cycle = TurnCycle::new();
        assert_eq!(cycle.peek_next(), None);

        cycle.reset();
        assert_eq!(cycle.peek_next(), Some(P1));
        assert_eq!(cycle.current(), Some(P0));
        assert_eq!(cycle.next(), Some(P1));
        assert_eq!(cycle.peek_next(), Some(P0));
    }

    #[test]
    fn test_terminate_all_is_absorbing() {
        let mut cycle = TurnCycle::new();
        cycle.reset();
        cycle.next();
        cycle.terminate_all();

        assert_eq!(cycle.phase(), CyclePhase::Terminal);
        assert!(!cycle.is_active(P0));
        assert!(!cycle.is_active(P1));
        assert_eq!(cycle.next(), None);
        // The last mover stays selected.
        assert_eq!(cycle.current(), Some(P1));

        assert_eq!(cycle.reset(), P0);
        assert_eq!(cycle.active_agents(), &[P0, P1]);
    }

    #[test]
    fn test_remove_current_hands_turn_to_follower() {
        let mut cycle = TurnCycle::new();
        cycle.reset();

        cycle.remove(P0);
        assert_eq!(cycle.phase(), CyclePhase::Ready);
        assert_eq!(cycle.next(), Some(P1));
        assert_eq!(cycle.next(), Some(P1));
    }

    #[test]
    fn test_remove_other_agent() {
        let mut cycle = TurnCycle::new();
        cycle.reset();
        cycle.next(); // P1

        cycle.remove(P0);
        assert_eq!(cycle.next(), Some(P1));
    }

    #[test]
    fn test_removing_everyone_terminates() {
        let mut cycle = TurnCycle::new();
        cycle.reset();
        cycle.remove(P1);
        cycle.remove(P0);
        cycle.remove(P0);

        assert_eq!(cycle.phase(), CyclePhase::Terminal);
        assert_eq!(cycle.next(), None);
    }
}

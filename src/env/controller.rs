//! Environment controller: `reset` / `step` / `observe` over a board engine.
//!
//! ## State machine
//!
//! ```text
//! Uninitialized --reset--> Active --step(done)--> Terminated
//!                            ^  |                     |
//!                            |  +--step--> Active     |
//!                            +--------reset-----------+
//! ```
//!
//! The controller is the single owner of the engine state, turn cycle,
//! legal index and ledgers. The codec is only mutated through
//! `LegalActionIndex::sync`, which only the controller calls.
//!
//! ## Atomic steps
//!
//! A step computes everything that can fail (decoding the action, syncing
//! the next agent's legal actions) before it commits anything. A failed
//! `step` leaves every observable value unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{
    ActionId, AgentId, EnvConfig, EnvError, GameRng, MoveSignature, Result, DEFAULT_SEED,
};
use crate::rules::BoardEngine;

use super::codec::ActionCodec;
use super::legal::LegalActionIndex;
use super::observation::{Observation, ObservationBuilder};
use super::reward::{RewardLedger, TerminationLedger};
use super::turn::{CyclePhase, TurnCycle};

/// Environment lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvPhase {
    /// `reset` has not been called (or the codec was reset since).
    Uninitialized,
    /// Accepting steps.
    Active,
    /// The episode ended; only dead steps are accepted.
    Terminated,
}

/// What a successful `step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// The move was applied and the turn passed on.
    Continued,
    /// The move was applied and the engine ended the game.
    Terminated,
    /// The move was applied and the step limit truncated the episode.
    Truncated,
    /// The current agent was already done; nothing happened.
    DeadStep,
}

/// One applied move in the episode history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub agent: AgentId,
    pub action: ActionId,
    pub signature: MoveSignature,
    pub reward_p0: f32,
    pub done: bool,
}

/// Two-agent, turn-based environment over a `BoardEngine`.
pub struct EnvironmentController<E: BoardEngine> {
    engine: E,
    config: EnvConfig,
    codec: ActionCodec,
    observations: ObservationBuilder,
    state: Option<E::State>,
    turns: TurnCycle,
    legal: LegalActionIndex,
    rewards: RewardLedger,
    terminations: TerminationLedger,
    rng: GameRng,
    history: Vec<StepRecord>,
    steps_taken: u32,
    last_info: String,
}

impl<E: BoardEngine> EnvironmentController<E> {
    /// Create an uninitialized environment with an empty codec of
    /// `config.max_actions` entries.
    pub fn new(engine: E, config: EnvConfig) -> Self {
        let codec = ActionCodec::new(config.max_actions);
        Self::with_codec(engine, config, codec)
    }

    /// Create an environment that continues an existing action mapping.
    ///
    /// The action space size is taken from the codec.
    pub fn with_codec(engine: E, mut config: EnvConfig, codec: ActionCodec) -> Self {
        config.max_actions = codec.capacity();
        let observations = ObservationBuilder::new(engine.geometry(), codec.capacity());
        let rng = GameRng::new(config.seed.unwrap_or(DEFAULT_SEED));

        Self {
            engine,
            config,
            codec,
            observations,
            state: None,
            turns: TurnCycle::new(),
            legal: LegalActionIndex::new(),
            rewards: RewardLedger::new(),
            terminations: TerminationLedger::new(),
            rng,
            history: Vec::new(),
            steps_taken: 0,
            last_info: String::new(),
        }
    }

    // === Agent-facing API ===

    /// Start a new episode from the engine's initial position.
    ///
    /// The seed falls back to `config.seed`, then to a fixed default.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<()> {
        let seed = seed.or(self.config.seed).unwrap_or(DEFAULT_SEED);
        let state = self.engine.initial_state();
        let first = AgentId::ALL[0];
        let moves = self.engine.legal_moves(&state);

        self.legal.sync(&mut self.codec, first, &moves)?;

        self.turns.reset();
        self.rewards.reset();
        self.terminations.reset();
        self.rng = GameRng::new(seed);
        self.history.clear();
        self.steps_taken = 0;
        self.last_info.clear();
        self.state = Some(state);

        if moves.is_empty() {
            tracing::warn!(agent = %first, "initial position has no legal moves");
        }
        tracing::debug!(
            seed,
            agent = %first,
            legal = self.legal.legal_for(first).len(),
            codec_size = self.codec.size(),
            "environment reset"
        );
        Ok(())
    }

    /// Apply `action` for the agent holding the turn.
    pub fn step(&mut self, action: ActionId) -> Result<StepStatus> {
        if self.state.is_none() {
            return Err(EnvError::StaleStep);
        }
        let agent = self.turns.current().ok_or(EnvError::StaleStep)?;

        if self.terminations.is_done(agent) {
            tracing::warn!(%agent, %action, "dead step ignored");
            return Ok(StepStatus::DeadStep);
        }

        if !self.legal.contains(agent, action) {
            tracing::warn!(%agent, %action, "illegal action rejected");
            return Err(EnvError::IllegalAction { agent, action });
        }

        let signature = self.codec.decode(action)?;
        let outcome = match self.state.as_ref() {
            Some(state) => self.engine.apply_move(state, &signature),
            None => return Err(EnvError::StaleStep),
        };

        let steps_taken = self.steps_taken + 1;
        let truncate = !outcome.done
            && self
                .config
                .max_episode_steps
                .is_some_and(|limit| steps_taken >= limit);

        if !outcome.done && !truncate {
            let next = self.turns.peek_next().ok_or(EnvError::StaleStep)?;
            let moves = self.engine.legal_moves(&outcome.next_state);
            self.legal.sync(&mut self.codec, next, &moves)?;
        }

        // Commit.
        self.state = Some(outcome.next_state);
        self.rewards.apply(outcome.reward_p0);
        self.steps_taken = steps_taken;
        self.last_info = outcome.info;
        if self.config.record_history {
            self.history.push(StepRecord {
                agent,
                action,
                signature,
                reward_p0: outcome.reward_p0,
                done: outcome.done,
            });
        }

        tracing::debug!(
            %agent,
            %action,
            %signature,
            reward_p0 = outcome.reward_p0,
            step = steps_taken,
            "move applied"
        );

        let status = if outcome.done {
            self.terminations.terminate_all();
            StepStatus::Terminated
        } else if truncate {
            self.terminations.truncate_all();
            StepStatus::Truncated
        } else {
            self.turns.next();
            return Ok(StepStatus::Continued);
        };

        self.turns.terminate_all();
        self.legal.clear();
        tracing::info!(
            ?status,
            steps = self.steps_taken,
            reward_p0 = self.rewards.cumulative(AgentId::PLAYER_0),
            reward_p1 = self.rewards.cumulative(AgentId::PLAYER_1),
            info = %self.last_info,
            "episode ended"
        );
        Ok(status)
    }

    /// Step by move signature instead of id (e.g. when replaying records).
    pub fn step_move(&mut self, signature: &MoveSignature) -> Result<StepStatus> {
        if self.state.is_none() {
            return Err(EnvError::StaleStep);
        }
        let agent = self.turns.current().ok_or(EnvError::StaleStep)?;
        if self.terminations.is_done(agent) {
            return Ok(StepStatus::DeadStep);
        }

        let action = self
            .codec
            .lookup(signature)
            .filter(|&id| self.legal.contains(agent, id))
            .ok_or(EnvError::IllegalMove {
                agent,
                signature: *signature,
            })?;
        self.step(action)
    }

    /// What `agent` sees right now.
    ///
    /// Agents outside the live game get an all-zero observation.
    #[must_use]
    pub fn observe(&self, agent: AgentId) -> Observation {
        match &self.state {
            Some(state) if self.turns.is_active(agent) => {
                self.observations.build(state, self.legal.legal_for(agent))
            }
            _ => self.observations.empty(),
        }
    }

    /// Size of the discrete action space (the codec capacity).
    #[must_use]
    pub fn action_space_size(&self, _agent: AgentId) -> usize {
        self.observations.action_space_size()
    }

    /// Reward from the most recent step.
    #[must_use]
    pub fn reward(&self, agent: AgentId) -> f32 {
        self.rewards.reward(agent)
    }

    /// Total reward this episode.
    #[must_use]
    pub fn cumulative_reward(&self, agent: AgentId) -> f32 {
        self.rewards.cumulative(agent)
    }

    #[must_use]
    pub fn terminated(&self, agent: AgentId) -> bool {
        self.terminations.terminated(agent)
    }

    #[must_use]
    pub fn truncated(&self, agent: AgentId) -> bool {
        self.terminations.truncated(agent)
    }

    /// Uniformly sample one of `agent`'s legal actions.
    pub fn sample_action(&mut self, agent: AgentId) -> Option<ActionId> {
        self.rng.choose_iter(self.legal.legal_for(agent).iter()).copied()
    }

    // === Codec management ===

    /// Forget every action mapping and drop the current game.
    ///
    /// A fresh `reset` is required afterwards.
    pub fn reset_codec(&mut self) {
        self.codec.clear();
        self.state = None;
        self.turns = TurnCycle::new();
        self.legal.clear();
        self.rewards.reset();
        self.terminations.reset();
        self.history.clear();
        self.steps_taken = 0;
        self.last_info.clear();
        tracing::debug!("action codec reset");
    }

    // === Introspection ===

    #[must_use]
    pub fn phase(&self) -> EnvPhase {
        match (&self.state, self.turns.phase()) {
            (None, _) | (_, CyclePhase::Idle) => EnvPhase::Uninitialized,
            (Some(_), CyclePhase::Ready) => EnvPhase::Active,
            (Some(_), CyclePhase::Terminal) => EnvPhase::Terminated,
        }
    }

    /// The agent holding the turn (the last mover once the game is over).
    #[must_use]
    pub fn agent_selection(&self) -> Option<AgentId> {
        self.turns.current()
    }

    /// Live agents.
    #[must_use]
    pub fn agents(&self) -> &[AgentId] {
        self.turns.active_agents()
    }

    #[must_use]
    pub fn possible_agents(&self) -> &[AgentId] {
        self.turns.possible_agents()
    }

    #[must_use]
    pub fn legal_actions(&self, agent: AgentId) -> &BTreeSet<ActionId> {
        self.legal.legal_for(agent)
    }

    #[must_use]
    pub fn state(&self) -> Option<&E::State> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn codec(&self) -> &ActionCodec {
        &self.codec
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Moves applied this episode (empty if history is disabled).
    #[must_use]
    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    #[must_use]
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// The engine's info string for the latest step.
    #[must_use]
    pub fn last_info(&self) -> &str {
        &self.last_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{BoardState, EngineStep};

    /// Counter engine: every position offers moves `n -> n+1` and
    /// `n -> n+2` on a 2x2 board; the game ends once `n` reaches `goal`.
    #[derive(Clone)]
    struct Counter {
        goal: u8,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct CounterState {
        cells: Vec<u8>,
    }

    impl BoardState for CounterState {
        fn board(&self) -> &[u8] {
            &self.cells
        }
    }

    impl BoardEngine for Counter {
        type State = CounterState;

        fn initial_state(&self) -> CounterState {
            CounterState { cells: vec![0; 4] }
        }

        fn legal_moves(&self, state: &CounterState) -> Vec<MoveSignature> {
            let n = state.cells[0];
            vec![MoveSignature::quiet(n, n + 1), MoveSignature::quiet(n, n + 2)]
        }

        fn apply_move(&self, state: &CounterState, mv: &MoveSignature) -> EngineStep<CounterState> {
            let mut next = state.clone();
            next.cells[0] = mv.to_square;
            if mv.to_square >= self.goal {
                EngineStep::finished(next, 1.0, "goal reached")
            } else {
                let mut step = EngineStep::ongoing(next);
                step.reward_p0 = 0.25;
                step
            }
        }

        fn board_side(&self) -> usize {
            2
        }
    }

    fn env(goal: u8) -> EnvironmentController<Counter> {
        EnvironmentController::new(Counter { goal }, EnvConfig::default().with_max_actions(64))
    }

    fn first_legal(env: &EnvironmentController<Counter>) -> ActionId {
        let agent = env.agent_selection().unwrap();
        *env.legal_actions(agent).iter().next().unwrap()
    }

    #[test]
    fn test_step_before_reset_is_stale() {
        let mut env = env(10);
        assert_eq!(env.phase(), EnvPhase::Uninitialized);
        assert!(matches!(env.step(ActionId(0)), Err(EnvError::StaleStep)));
        assert_eq!(env.observe(AgentId::PLAYER_0), env.observations.empty());
    }

    #[test]
    fn test_reset_capacity_failure_stays_uninitialized() {
        // Two opening moves, room for one.
        let mut env = EnvironmentController::new(
            Counter { goal: 10 },
            EnvConfig::default().with_max_actions(1),
        );

        let err = env.reset(None).unwrap_err();
        assert!(matches!(err, EnvError::CapacityExhausted { capacity: 1 }));
        assert_eq!(env.phase(), EnvPhase::Uninitialized);
        assert_eq!(env.agent_selection(), None);
        assert!(env.state().is_none());
        assert!(env.legal_actions(AgentId::PLAYER_0).is_empty());
        assert!(matches!(env.step(ActionId(0)), Err(EnvError::StaleStep)));
    }

    #[test]
    fn test_reset_primes_first_agent() {
        let mut env = env(10);
        env.reset(Some(1)).unwrap();

        assert_eq!(env.phase(), EnvPhase::Active);
        assert_eq!(env.agent_selection(), Some(AgentId::PLAYER_0));
        assert_eq!(env.agents(), &[AgentId::PLAYER_0, AgentId::PLAYER_1]);
        assert_eq!(env.legal_actions(AgentId::PLAYER_0).len(), 2);
        assert!(env.legal_actions(AgentId::PLAYER_1).is_empty());
        assert_eq!(env.observe(AgentId::PLAYER_0).legal_count(), 2);
        assert_eq!(env.observe(AgentId::PLAYER_1).legal_count(), 0);
    }

    #[test]
    fn test_step_alternates_and_accumulates() {
        let mut env = env(10);
        env.reset(None).unwrap();

        assert_eq!(env.step(first_legal(&env)).unwrap(), StepStatus::Continued);
        assert_eq!(env.agent_selection(), Some(AgentId::PLAYER_1));
        assert_eq!(env.reward(AgentId::PLAYER_0), 0.25);
        assert_eq!(env.reward(AgentId::PLAYER_1), -0.25);

        assert_eq!(env.step(first_legal(&env)).unwrap(), StepStatus::Continued);
        assert_eq!(env.agent_selection(), Some(AgentId::PLAYER_0));
        assert_eq!(env.cumulative_reward(AgentId::PLAYER_0), 0.5);
        assert_eq!(env.cumulative_reward(AgentId::PLAYER_1), -0.5);
        assert_eq!(env.steps_taken(), 2);
        assert_eq!(env.history().len(), 2);
    }

    #[test]
    fn test_illegal_action_changes_nothing() {
        let mut env = env(10);
        env.reset(None).unwrap();
        let before = env.observe(AgentId::PLAYER_0);

        let err = env.step(ActionId(63)).unwrap_err();
        assert!(matches!(
            err,
            EnvError::IllegalAction { agent: AgentId::PLAYER_0, action: ActionId(63) }
        ));
        assert_eq!(env.observe(AgentId::PLAYER_0), before);
        assert_eq!(env.agent_selection(), Some(AgentId::PLAYER_0));
        assert_eq!(env.steps_taken(), 0);
    }

    #[test]
    fn test_termination_and_dead_steps() {
        let mut env = env(2);
        env.reset(None).unwrap();

        // 0 -> 2 reaches the goal.
        let to_two = env.codec().lookup(&MoveSignature::quiet(0, 2)).unwrap();
        assert_eq!(env.step(to_two).unwrap(), StepStatus::Terminated);

        assert_eq!(env.phase(), EnvPhase::Terminated);
        assert!(env.terminated(AgentId::PLAYER_0));
        assert!(env.terminated(AgentId::PLAYER_1));
        assert!(env.agents().is_empty());
        assert_eq!(env.last_info(), "goal reached");
        for agent in AgentId::ALL {
            assert!(env.legal_actions(agent).is_empty());
            assert_eq!(env.observe(agent).legal_count(), 0);
        }

        let state = env.state().cloned();
        assert_eq!(env.step(ActionId(0)).unwrap(), StepStatus::DeadStep);
        assert_eq!(env.step(ActionId(42)).unwrap(), StepStatus::DeadStep);
        assert_eq!(env.state().cloned(), state);
        assert_eq!(env.steps_taken(), 1);
    }

    #[test]
    fn test_truncation_after_step_limit() {
        let config = EnvConfig::default()
            .with_max_actions(64)
            .with_max_episode_steps(3);
        let mut env = EnvironmentController::new(Counter { goal: 100 }, config);
        env.reset(None).unwrap();

        assert_eq!(env.step(first_legal(&env)).unwrap(), StepStatus::Continued);
        assert_eq!(env.step(first_legal(&env)).unwrap(), StepStatus::Continued);
        assert_eq!(env.step(first_legal(&env)).unwrap(), StepStatus::Truncated);

        assert!(env.truncated(AgentId::PLAYER_0) && env.truncated(AgentId::PLAYER_1));
        assert!(!env.terminated(AgentId::PLAYER_0) && !env.terminated(AgentId::PLAYER_1));
        assert_eq!(env.phase(), EnvPhase::Terminated);
        assert_eq!(env.step(ActionId(0)).unwrap(), StepStatus::DeadStep);
    }

    #[test]
    fn test_capacity_exhaustion_fails_step_without_commit() {
        // Each position introduces two new signatures; capacity 3 runs out
        // while syncing the second agent's moves.
        let config = EnvConfig::default().with_max_actions(3);
        let mut env = EnvironmentController::new(Counter { goal: 100 }, config);
        env.reset(None).unwrap();
        let before = env.observe(AgentId::PLAYER_0);

        let to_one = env.codec().lookup(&MoveSignature::quiet(0, 1)).unwrap();
        let err = env.step(to_one).unwrap_err();

        assert!(matches!(err, EnvError::CapacityExhausted { capacity: 3 }));
        assert_eq!(env.observe(AgentId::PLAYER_0), before);
        assert_eq!(env.agent_selection(), Some(AgentId::PLAYER_0));
        assert_eq!(env.steps_taken(), 0);
    }

    #[test]
    fn test_step_move_resolves_signature() {
        let mut env = env(10);
        env.reset(None).unwrap();

        assert_eq!(
            env.step_move(&MoveSignature::quiet(0, 2)).unwrap(),
            StepStatus::Continued
        );
        assert_eq!(env.history()[0].signature, MoveSignature::quiet(0, 2));

        let err = env.step_move(&MoveSignature::quiet(0, 1)).unwrap_err();
        assert!(matches!(err, EnvError::IllegalMove { agent: AgentId::PLAYER_1, .. }));
    }

    #[test]
    fn test_reset_codec_requires_new_reset() {
        let mut env = env(10);
        env.reset(None).unwrap();
        env.step(first_legal(&env)).unwrap();

        env.reset_codec();
        assert!(env.codec().is_empty());
        assert_eq!(env.phase(), EnvPhase::Uninitialized);
        assert!(matches!(env.step(ActionId(0)), Err(EnvError::StaleStep)));

        env.reset(None).unwrap();
        assert_eq!(env.codec().size(), 2);
    }

    #[test]
    fn test_sample_action_is_seeded() {
        let mut a = env(100);
        let mut b = env(100);
        a.reset(Some(7)).unwrap();
        b.reset(Some(7)).unwrap();

        for _ in 0..20 {
            let agent = a.agent_selection().unwrap();
            let action = a.sample_action(agent).unwrap();
            assert_eq!(b.sample_action(agent), Some(action));
            assert!(a.legal_actions(agent).contains(&action));
            a.step(action).unwrap();
            b.step(action).unwrap();
        }

        // Only the agent holding the turn can be sampled for.
        let idle = a.agent_selection().unwrap().opponent();
        assert_eq!(a.sample_action(idle), None);
    }

    #[test]
    fn test_history_can_be_disabled() {
        let config = EnvConfig::default().with_max_actions(64).with_history(false);
        let mut env = EnvironmentController::new(Counter { goal: 10 }, config);
        env.reset(None).unwrap();
        env.step(first_legal(&env)).unwrap();
        assert!(env.history().is_empty());
    }
}

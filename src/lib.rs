//! # power-chess-env
//!
//! Two-player board game environment layer for RL training.
//!
//! Engines describe a game (board, move generation, outcome). The
//! environment turns them into an agent-cycling `reset` / `step` /
//! `observe` interface with integer actions, legal-action masks and
//! zero-sum rewards.
//!
//! ## Design Principles
//!
//! 1. **Engine-Agnostic**: The environment never inspects moves beyond
//!    their signature. Any `BoardEngine` can be plugged in.
//!
//! 2. **Stable Action Ids**: Move signatures are assigned dense ids in
//!    first-seen order and keep them for the life of the codec, so a
//!    policy output index always means the same move.
//!
//! 3. **Atomic Steps**: A step that fails commits nothing. Illegal
//!    actions and capacity exhaustion leave the episode untouched.
//!
//! ## Modules
//!
//! - `core`: Agents, move signatures, board geometry, RNG, configuration, errors
//! - `rules`: `BoardEngine` trait for game implementations
//! - `env`: Action codec, legal sets, turn cycle, rewards, observations, controller
//! - `games`: Bundled engines (`PawnDuel`)

pub mod core;
pub mod env;
pub mod games;
pub mod rules;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    ActionId, AgentId, AgentMap, BoardGeometry, EnvConfig, EnvError, GameRng,
    MoveKind, MoveSignature,
};

pub use crate::rules::{BoardEngine, BoardState, EngineStep};

pub use crate::env::{
    ActionCodec, EnvPhase, EnvironmentController, LegalActionIndex, Observation,
    ObservationBuilder, RewardLedger, StepRecord, StepStatus, TurnCycle,
};

pub use crate::games::duel::{DuelConfig, DuelState, PawnDuel};

//! Core value types: agents, move signatures, board geometry, RNG,
//! configuration and errors.
//!
//! Everything here is engine-agnostic. Engines plug in through
//! `rules::BoardEngine`.

pub mod agent;
pub mod board;
pub mod config;
pub mod error;
pub mod rng;
pub mod signature;

pub use agent::{AgentId, AgentMap, AGENT_COUNT};
pub use board::BoardGeometry;
pub use config::{EnvConfig, DEFAULT_MAX_ACTIONS, DEFAULT_SEED, MAX_ACTION_SPACE};
pub use error::{EnvError, Result};
pub use rng::GameRng;
pub use signature::{ActionId, MoveKind, MoveSignature};

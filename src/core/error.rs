//! Error taxonomy for the environment layer.
//!
//! Every failure here is a contract violation surfaced synchronously to the
//! caller. Nothing is retried internally.

use thiserror::Error;

use super::agent::AgentId;
use super::signature::{ActionId, MoveSignature};

/// Errors returned by the codec and the environment controller.
#[derive(Debug, Error)]
pub enum EnvError {
    /// `step` was called with an id outside the active agent's legal set.
    #[error("action {action} is illegal for agent '{agent}'")]
    IllegalAction { agent: AgentId, action: ActionId },

    /// A move signature is not among the active agent's legal moves.
    #[error("move {signature} is not legal for agent '{agent}'")]
    IllegalMove {
        agent: AgentId,
        signature: MoveSignature,
    },

    /// The codec already holds `capacity` distinct signatures.
    #[error("action codec exhausted its capacity of {capacity} unique moves")]
    CapacityExhausted { capacity: usize },

    /// `decode` was called with an id the codec never assigned.
    #[error("unknown action id: {0}")]
    UnknownActionId(ActionId),

    /// An agent identity outside `possible_agents`.
    #[error("unknown agent '{0}'")]
    UnknownAgent(String),

    /// `step` was called before any `reset`.
    #[error("environment must be reset before stepping")]
    StaleStep,

    /// A codec snapshot could not be decoded or breaks codec invariants.
    #[error("corrupt codec snapshot: {0}")]
    CorruptSnapshot(String),

    /// A configuration value outside its supported range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<bincode::Error> for EnvError {
    fn from(err: bincode::Error) -> Self {
        EnvError::CorruptSnapshot(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EnvError>;

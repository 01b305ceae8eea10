//! Board engine trait for game implementations.
//!
//! Engines implement `BoardEngine` to define:
//! - Legal moves for each state
//! - How a move produces the next state
//! - When the game ends and who it rewards
//!
//! The environment calls into `BoardEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{BoardEngine, BoardState, EngineStep};

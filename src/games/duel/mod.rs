//! Pawn duel: a small chess variant.
//!
//! Each side starts with a king on its back rank and a full rank of pawns
//! in front of it. Pawns that reach the far rank promote to rooks. The game
//! ends when a king is captured, when the side to move has no moves, or
//! after a fixed number of plies.
//!
//! Useful as a reference engine for the environment layer and for tests.

mod game;
pub mod piece;

pub use game::{DuelConfig, DuelState, PawnDuel};

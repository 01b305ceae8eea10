//! Board engine trait for game implementations.
//!
//! Engines own everything game-specific: board representation, move
//! generation, terminal detection and the reward for a move. The
//! environment only sees move signatures, a flat board and the outcome of
//! applying a move.

use crate::core::{BoardGeometry, MoveSignature};

/// Read access to the board carried by an engine state.
///
/// The board is a flat, row-major slice of `side * side` small
/// non-negative integers, one per square, `0` meaning empty.
pub trait BoardState: Clone {
    fn board(&self) -> &[u8];
}

/// Result of applying one move.
///
/// The engine returns a successor state rather than mutating in place.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineStep<S> {
    /// The state after the move.
    pub next_state: S,

    /// Reward from player_0's perspective.
    pub reward_p0: f32,

    /// True if the game is over.
    pub done: bool,

    /// Optional diagnostic text (termination reason, etc.).
    pub info: String,
}

impl<S> EngineStep<S> {
    /// A non-terminal step with zero reward.
    pub fn ongoing(next_state: S) -> Self {
        Self {
            next_state,
            reward_p0: 0.0,
            done: false,
            info: String::new(),
        }
    }

    /// A terminal step.
    pub fn finished(next_state: S, reward_p0: f32, info: impl Into<String>) -> Self {
        Self {
            next_state,
            reward_p0,
            done: true,
            info: info.into(),
        }
    }
}

/// Two-player board engine.
///
/// ## Implementation Notes
///
/// - `legal_moves` enumerates moves for the side to move; order must be
///   deterministic, since action ids are assigned in first-seen order.
/// - `apply_move` is only called with a move `legal_moves` produced for
///   the same state.
/// - `board_side` must match the length of every `BoardState::board`.
pub trait BoardEngine {
    type State: BoardState;

    /// A fresh initial position.
    fn initial_state(&self) -> Self::State;

    /// All legal moves for the side to move.
    fn legal_moves(&self, state: &Self::State) -> Vec<MoveSignature>;

    /// Apply a legal move, returning the successor state and outcome.
    fn apply_move(&self, state: &Self::State, mv: &MoveSignature) -> EngineStep<Self::State>;

    /// Number of rows (and columns) of the board.
    fn board_side(&self) -> usize;

    // === Convenience Methods ===

    /// Legal moves starting from one square.
    ///
    /// Default implementation filters `legal_moves`.
    fn legal_moves_from(&self, state: &Self::State, origin: u8) -> Vec<MoveSignature> {
        self.legal_moves(state)
            .into_iter()
            .filter(|mv| mv.from_square == origin)
            .collect()
    }

    /// Board geometry derived from `board_side`.
    fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.board_side())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Cells(Vec<u8>);

    impl BoardState for Cells {
        fn board(&self) -> &[u8] {
            &self.0
        }
    }

    struct Fixed;

    impl BoardEngine for Fixed {
        type State = Cells;

        fn initial_state(&self) -> Cells {
            Cells(vec![0; 4])
        }

        fn legal_moves(&self, _state: &Cells) -> Vec<MoveSignature> {
            vec![
                MoveSignature::quiet(0, 1),
                MoveSignature::quiet(2, 3),
                MoveSignature::quiet(0, 2),
            ]
        }

        fn apply_move(&self, state: &Cells, _mv: &MoveSignature) -> EngineStep<Cells> {
            EngineStep::ongoing(state.clone())
        }

        fn board_side(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_legal_moves_from_filters_origin() {
        let engine = Fixed;
        let state = engine.initial_state();

        let from_zero = engine.legal_moves_from(&state, 0);
        assert_eq!(from_zero, vec![MoveSignature::quiet(0, 1), MoveSignature::quiet(0, 2)]);
        assert!(engine.legal_moves_from(&state, 3).is_empty());
    }

    #[test]
    fn test_geometry_from_side() {
        assert_eq!(Fixed.geometry().area(), 4);
    }

    #[test]
    fn test_engine_step_constructors() {
        let step = EngineStep::ongoing(1u8);
        assert!(!step.done);
        assert_eq!(step.reward_p0, 0.0);

        let step = EngineStep::finished(2u8, -1.0, "king captured");
        assert!(step.done);
        assert_eq!(step.reward_p0, -1.0);
        assert_eq!(step.info, "king captured");
    }
}

//! Agent observations: the board plus a legal-action mask.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{ActionId, BoardGeometry};
use crate::rules::BoardState;

/// What an agent sees on its turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Row-major `side * side` board cells, `0` meaning empty.
    pub board: Vec<u8>,

    /// Number of rows (and columns) in `board`.
    pub side: usize,

    /// `action_mask[i] == 1` iff action `i` is legal for this agent.
    pub action_mask: Vec<u8>,
}

impl Observation {
    /// Cell value at `(row, col)`, `None` off the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.board.get(row * self.side + col).copied()
    }

    /// True if the mask marks `action` legal.
    #[must_use]
    pub fn is_legal(&self, action: ActionId) -> bool {
        self.action_mask.get(action.index()).copied() == Some(1)
    }

    /// Number of legal actions in the mask.
    #[must_use]
    pub fn legal_count(&self) -> usize {
        self.action_mask.iter().filter(|&&bit| bit == 1).count()
    }

    /// Ids set in the mask, in increasing order.
    pub fn legal_actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.action_mask
            .iter()
            .enumerate()
            .filter(|(_, &bit)| bit == 1)
            .map(|(i, _)| ActionId::new(i as u32))
    }
}

/// Builds fixed-shape observations for one environment.
#[derive(Clone, Copy, Debug)]
pub struct ObservationBuilder {
    geometry: BoardGeometry,
    action_space_size: usize,
}

impl ObservationBuilder {
    pub fn new(geometry: BoardGeometry, action_space_size: usize) -> Self {
        Self {
            geometry,
            action_space_size,
        }
    }

    /// Observation of `state` with the given legal ids masked in.
    ///
    /// Ids outside the action space are ignored.
    pub fn build<S: BoardState>(&self, state: &S, legal: &BTreeSet<ActionId>) -> Observation {
        let board = state.board();
        assert_eq!(
            board.len(),
            self.geometry.area(),
            "Engine board length must equal side * side"
        );

        let mut action_mask = vec![0u8; self.action_space_size];
        for id in legal {
            if let Some(bit) = action_mask.get_mut(id.index()) {
                *bit = 1;
            }
        }

        Observation {
            board: board.to_vec(),
            side: self.geometry.side(),
            action_mask,
        }
    }

    /// All-zero board and mask, for agents outside the live game.
    #[must_use]
    pub fn empty(&self) -> Observation {
        Observation {
            board: vec![0; self.geometry.area()],
            side: self.geometry.side(),
            action_mask: vec![0; self.action_space_size],
        }
    }

    #[must_use]
    pub fn action_space_size(&self) -> usize {
        self.action_space_size
    }
}

//! Square board geometry.
//!
//! Engines expose their board as a flat, row-major slice of `side * side`
//! cells. Row/column to index conversion is a pure function of the side
//! length.

use serde::{Deserialize, Serialize};

/// Geometry of a square board with `side` rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardGeometry {
    side: usize,
}

impl BoardGeometry {
    /// Create a geometry for a `side x side` board.
    pub fn new(side: usize) -> Self {
        assert!(side > 0, "Board side must be positive");
        assert!(side * side <= 256, "Squares must fit in a u8");
        Self { side }
    }

    #[must_use]
    pub const fn side(self) -> usize {
        self.side
    }

    /// Total number of squares.
    #[must_use]
    pub const fn area(self) -> usize {
        self.side * self.side
    }

    /// Flat index of `(row, col)`.
    #[must_use]
    pub const fn index(self, row: usize, col: usize) -> usize {
        row * self.side + col
    }

    #[must_use]
    pub const fn row(self, index: usize) -> usize {
        index / self.side
    }

    #[must_use]
    pub const fn col(self, index: usize) -> usize {
        index % self.side
    }

    /// The square reached from `index` by moving `(d_row, d_col)`, if it is
    /// still on the board.
    #[must_use]
    pub fn offset(self, index: usize, d_row: i32, d_col: i32) -> Option<usize> {
        let row = self.row(index) as i32 + d_row;
        let col = self.col(index) as i32 + d_col;
        let side = self.side as i32;
        if (0..side).contains(&row) && (0..side).contains(&col) {
            Some(self.index(row as usize, col as usize))
        } else {
            None
        }
    }
}

//! One-byte piece encoding.
//!
//! ```text
//! bit  7 6 5 | 4    | 3     | 2 1 0
//!      unused | side | moved | kind
//! ```
//!
//! `0` is an empty square. Side bit clear is player_0, set is player_1.

use crate::core::AgentId;

pub const KIND_MASK: u8 = 0b0000_0111;
pub const MOVED_MASK: u8 = 0b0000_1000;
pub const SIDE_MASK: u8 = 0b0001_0000;

/// Piece kinds used by the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Pawn = 1,
    Rook = 4,
    King = 6,
}

impl Kind {
    fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Kind::Pawn),
            4 => Some(Kind::Rook),
            6 => Some(Kind::King),
            _ => None,
        }
    }
}

/// Encode a piece.
#[must_use]
pub const fn make(kind: Kind, side: AgentId, moved: bool) -> u8 {
    let side_bits = if side.index() == 0 { 0 } else { SIDE_MASK };
    let moved_bits = if moved { MOVED_MASK } else { 0 };
    (kind as u8) | side_bits | moved_bits
}

#[must_use]
pub const fn is_empty(code: u8) -> bool {
    code & KIND_MASK == 0
}

#[must_use]
pub fn kind(code: u8) -> Option<Kind> {
    Kind::from_bits(code & KIND_MASK)
}

/// Owner of the piece, `None` for an empty square.
#[must_use]
pub fn side(code: u8) -> Option<AgentId> {
    if is_empty(code) {
        None
    } else if code & SIDE_MASK == 0 {
        Some(AgentId::PLAYER_0)
    } else {
        Some(AgentId::PLAYER_1)
    }
}

#[must_use]
pub const fn has_moved(code: u8) -> bool {
    code & MOVED_MASK != 0
}

#[must_use]
pub const fn set_moved(code: u8) -> u8 {
    code | MOVED_MASK
}

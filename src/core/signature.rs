//! Move signatures and action ids.
//!
//! A `MoveSignature` is the canonical value identity of an engine move:
//! two moves are the same action iff their signatures compare equal
//! field-by-field. An `ActionId` is the small integer the codec assigns to
//! a signature the first time it is seen.

use serde::{Deserialize, Serialize};

/// Kind of move, as reported by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MoveKind {
    /// Move to an empty square.
    #[default]
    Quiet = 0,
    /// Move that captures an enemy piece.
    Capture = 1,
    /// Promotion without capture.
    Promote = 2,
    /// Capture and promotion.
    CapturePromote = 3,
    /// Engine-specific effect carried by `special_code`.
    Special = 4,
}

impl MoveKind {
    /// True for `Capture` and `CapturePromote`.
    #[must_use]
    pub const fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture | MoveKind::CapturePromote)
    }

    /// True for `Promote` and `CapturePromote`.
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveKind::Promote | MoveKind::CapturePromote)
    }
}

impl TryFrom<u8> for MoveKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MoveKind::Quiet),
            1 => Ok(MoveKind::Capture),
            2 => Ok(MoveKind::Promote),
            3 => Ok(MoveKind::CapturePromote),
            4 => Ok(MoveKind::Special),
            other => Err(format!("invalid move kind {other}")),
        }
    }
}

impl From<MoveKind> for u8 {
    fn from(kind: MoveKind) -> Self {
        kind as u8
    }
}

/// Canonical, immutable identity of a move.
///
/// Field aliases let replay records (`from`/`from_`, `to`, `type`,
/// `promo_piece`) deserialize directly.
///
/// ```
/// use power_chess_env::core::{MoveKind, MoveSignature};
///
/// let a = MoveSignature::new(52, 44, MoveKind::Quiet, 0, 0);
/// let b = MoveSignature::quiet(52, 44);
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveSignature {
    #[serde(alias = "from", alias = "from_")]
    pub from_square: u8,

    #[serde(alias = "to")]
    pub to_square: u8,

    #[serde(alias = "type", default)]
    pub move_kind: MoveKind,

    /// Fully encoded piece code for promotions, 0 otherwise.
    #[serde(alias = "promo_piece", default)]
    pub promotion_piece: u8,

    /// Payload for `Special` moves, 0 otherwise.
    #[serde(default)]
    pub special_code: u16,
}

impl MoveSignature {
    #[must_use]
    pub const fn new(
        from_square: u8,
        to_square: u8,
        move_kind: MoveKind,
        promotion_piece: u8,
        special_code: u16,
    ) -> Self {
        Self {
            from_square,
            to_square,
            move_kind,
            promotion_piece,
            special_code,
        }
    }

    /// A plain move to an empty square.
    #[must_use]
    pub const fn quiet(from_square: u8, to_square: u8) -> Self {
        Self::new(from_square, to_square, MoveKind::Quiet, 0, 0)
    }
}

impl std::fmt::Display for MoveSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{} {:?}", self.from_square, self.to_square, self.move_kind)?;
        if self.promotion_piece != 0 {
            write!(f, " promo={}", self.promotion_piece)?;
        }
        if self.special_code != 0 {
            write!(f, " special={}", self.special_code)?;
        }
        Ok(())
    }
}

/// Discrete action identifier in `[0, capacity)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u32);

impl ActionId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Position in the action mask.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_equality_is_fieldwise() {
        let a = MoveSignature::new(1, 2, MoveKind::Capture, 0, 0);
        assert_eq!(a, MoveSignature::new(1, 2, MoveKind::Capture, 0, 0));
        assert_ne!(a, MoveSignature::new(1, 2, MoveKind::Quiet, 0, 0));
        assert_ne!(a, MoveSignature::new(1, 2, MoveKind::Capture, 4, 0));
        assert_ne!(a, MoveSignature::new(1, 2, MoveKind::Capture, 0, 9));
    }

    #[test]
    fn test_move_kind_flags() {
        assert!(MoveKind::CapturePromote.is_capture());
        assert!(MoveKind::CapturePromote.is_promotion());
        assert!(!MoveKind::Quiet.is_capture());
        assert!(MoveKind::Promote.is_promotion());
        assert!(!MoveKind::Special.is_promotion());
    }

    #[test]
    fn test_move_kind_from_u8() {
        assert_eq!(MoveKind::try_from(3).unwrap(), MoveKind::CapturePromote);
        assert!(MoveKind::try_from(5).is_err());
        assert_eq!(u8::from(MoveKind::Special), 4);
    }

    #[test]
    fn test_signature_display() {
        let sig = MoveSignature::new(9, 1, MoveKind::Promote, 20, 0);
        assert_eq!(sig.to_string(), "9->1 Promote promo=20");
    }

    #[test]
    fn test_signature_serialization() {
        let sig = MoveSignature::new(9, 1, MoveKind::CapturePromote, 20, 3);
        let json = serde_json::to_string(&sig).unwrap();
        let deserialized: MoveSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, deserialized);
    }

    #[test]
    fn test_signature_accepts_replay_field_names() {
        let record = r#"{"from_": 12, "to": 4, "type": 1, "promo_piece": 0, "special_code": 0}"#;
        let sig: MoveSignature = serde_json::from_str(record).unwrap();
        assert_eq!(sig, MoveSignature::new(12, 4, MoveKind::Capture, 0, 0));

        // Optional fields default to zero.
        let sparse: MoveSignature = serde_json::from_str(r#"{"from": 3, "to": 5}"#).unwrap();
        assert_eq!(sparse, MoveSignature::quiet(3, 5));
    }

    #[test]
    fn test_invalid_move_kind_rejected() {
        let record = r#"{"from": 1, "to": 2, "type": 9}"#;
        assert!(serde_json::from_str::<MoveSignature>(record).is_err());
    }

    #[test]
    fn test_action_id() {
        let id = ActionId::new(17);
        assert_eq!(id.index(), 17);
        assert_eq!(id.raw(), 17);
        assert_eq!(id.to_string(), "17");
        assert_eq!(serde_json::to_string(&id).unwrap(), "17");
    }
}

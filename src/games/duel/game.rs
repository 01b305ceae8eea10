//! Pawn duel rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AgentId, BoardGeometry, MoveKind, MoveSignature};
use crate::rules::{BoardEngine, BoardState, EngineStep};

use super::piece::{self, Kind};

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_RAYS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Duel configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Rows and columns of the board (4..=16).
    pub board_side: usize,

    /// The game is drawn after this many plies.
    pub max_plies: u32,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            board_side: 6,
            max_plies: 200,
        }
    }
}

impl DuelConfig {
    #[must_use]
    pub fn with_board_side(mut self, side: usize) -> Self {
        self.board_side = side;
        self
    }

    #[must_use]
    pub fn with_max_plies(mut self, plies: u32) -> Self {
        self.max_plies = plies;
        self
    }
}

/// Duel position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuelState {
    cells: Vec<u8>,
    to_move: AgentId,
    ply: u32,
}

impl DuelState {
    /// Build a position from raw cells (row-major piece codes).
    pub fn from_cells(cells: Vec<u8>, to_move: AgentId, ply: u32) -> Self {
        Self { cells, to_move, ply }
    }

    /// Side to move.
    #[must_use]
    pub fn to_move(&self) -> AgentId {
        self.to_move
    }

    /// Plies played so far.
    #[must_use]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// True if `side` still has its king.
    #[must_use]
    pub fn has_king(&self, side: AgentId) -> bool {
        self.cells
            .iter()
            .any(|&c| piece::kind(c) == Some(Kind::King) && piece::side(c) == Some(side))
    }
}

impl BoardState for DuelState {
    fn board(&self) -> &[u8] {
        &self.cells
    }
}

/// Two kings, a rank of pawns each, pawns promote to rooks.
///
/// - Pawns step forward onto an empty square and capture diagonally
///   forward. Reaching the far rank promotes to a rook.
/// - Rooks slide orthogonally until blocked.
/// - Kings step one square in any direction.
/// - Capturing the enemy king wins (+1 / -1 for player_0). Running out of
///   plies, or leaving the side to move without moves, is a draw.
#[derive(Clone, Debug)]
pub struct PawnDuel {
    config: DuelConfig,
    geometry: BoardGeometry,
}

impl Default for PawnDuel {
    fn default() -> Self {
        Self::new(DuelConfig::default())
    }
}

impl PawnDuel {
    pub fn new(config: DuelConfig) -> Self {
        assert!(
            (4..=16).contains(&config.board_side),
            "Board side must be 4-16"
        );
        let geometry = BoardGeometry::new(config.board_side);
        Self { config, geometry }
    }

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Row direction pawns of `side` advance in.
    fn forward(side: AgentId) -> i32 {
        if side == AgentId::PLAYER_0 {
            -1
        } else {
            1
        }
    }

    /// Row on which pawns of `side` promote.
    fn promotion_row(&self, side: AgentId) -> usize {
        if side == AgentId::PLAYER_0 {
            0
        } else {
            self.geometry.side() - 1
        }
    }

    fn pawn_moves(&self, state: &DuelState, from: usize, side: AgentId, out: &mut Vec<MoveSignature>) {
        let dir = Self::forward(side);
        let promo = piece::make(Kind::Rook, side, true);
        let mut targets: SmallVec<[(usize, bool); 3]> = SmallVec::new();

        if let Some(to) = self.geometry.offset(from, dir, 0) {
            if piece::is_empty(state.cells[to]) {
                targets.push((to, false));
            }
        }
        for d_col in [-1, 1] {
            if let Some(to) = self.geometry.offset(from, dir, d_col) {
                if piece::side(state.cells[to]) == Some(side.opponent()) {
                    targets.push((to, true));
                }
            }
        }

        for (to, capture) in targets {
            let promotes = self.geometry.row(to) == self.promotion_row(side);
            let (kind, promo_piece) = match (capture, promotes) {
                (false, false) => (MoveKind::Quiet, 0),
                (true, false) => (MoveKind::Capture, 0),
                (false, true) => (MoveKind::Promote, promo),
                (true, true) => (MoveKind::CapturePromote, promo),
            };
            out.push(MoveSignature::new(from as u8, to as u8, kind, promo_piece, 0));
        }
    }

    fn step_moves(
        &self,
        state: &DuelState,
        from: usize,
        side: AgentId,
        steps: &[(i32, i32)],
        sliding: bool,
        out: &mut Vec<MoveSignature>,
    ) {
        for &(d_row, d_col) in steps {
            let mut at = from;
            while let Some(to) = self.geometry.offset(at, d_row, d_col) {
                match piece::side(state.cells[to]) {
                    None => out.push(MoveSignature::quiet(from as u8, to as u8)),
                    Some(owner) if owner != side => {
                        out.push(MoveSignature::new(from as u8, to as u8, MoveKind::Capture, 0, 0));
                        break;
                    }
                    Some(_) => break,
                }
                if !sliding {
                    break;
                }
                at = to;
            }
        }
    }
}

impl BoardEngine for PawnDuel {
    type State = DuelState;

    fn initial_state(&self) -> DuelState {
        let n = self.geometry.side();
        let mut cells = vec![0u8; self.geometry.area()];

        for col in 0..n {
            cells[self.geometry.index(1, col)] = piece::make(Kind::Pawn, AgentId::PLAYER_1, false);
            cells[self.geometry.index(n - 2, col)] = piece::make(Kind::Pawn, AgentId::PLAYER_0, false);
        }
        cells[self.geometry.index(0, n / 2)] = piece::make(Kind::King, AgentId::PLAYER_1, false);
        cells[self.geometry.index(n - 1, n / 2)] = piece::make(Kind::King, AgentId::PLAYER_0, false);

        DuelState::from_cells(cells, AgentId::PLAYER_0, 0)
    }

    fn legal_moves(&self, state: &DuelState) -> Vec<MoveSignature> {
        let side = state.to_move;
        let mut moves = Vec::with_capacity(32);

        for (from, &code) in state.cells.iter().enumerate() {
            if piece::side(code) != Some(side) {
                continue;
            }
            match piece::kind(code) {
                Some(Kind::Pawn) => self.pawn_moves(state, from, side, &mut moves),
                Some(Kind::King) => self.step_moves(state, from, side, &KING_STEPS, false, &mut moves),
                Some(Kind::Rook) => self.step_moves(state, from, side, &ROOK_RAYS, true, &mut moves),
                None => {}
            }
        }
        moves
    }

    fn apply_move(&self, state: &DuelState, mv: &MoveSignature) -> EngineStep<DuelState> {
        let from = mv.from_square as usize;
        let to = mv.to_square as usize;
        let mover = state.to_move;
        let captured = state.cells[to];

        let mut next = state.clone();
        next.cells[to] = if mv.move_kind.is_promotion() {
            piece::set_moved(mv.promotion_piece)
        } else {
            piece::set_moved(state.cells[from])
        };
        next.cells[from] = 0;
        next.ply += 1;
        next.to_move = mover.opponent();

        if piece::kind(captured) == Some(Kind::King) {
            let reward_p0 = if mover == AgentId::PLAYER_0 { 1.0 } else { -1.0 };
            return EngineStep::finished(next, reward_p0, "king captured");
        }
        if next.ply >= self.config.max_plies {
            return EngineStep::finished(next, 0.0, "ply limit reached");
        }
        if self.legal_moves(&next).is_empty() {
            return EngineStep::finished(next, 0.0, "no legal moves");
        }
        EngineStep::ongoing(next)
    }

    fn board_side(&self) -> usize {
        self.geometry.side()
    }
}

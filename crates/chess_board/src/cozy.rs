//! `Position` shim over the cozy-chess rules engine.

use cozy_chess::{BitBoard, Board, FenParseError, Move, Piece, Square};

use crate::adapter::Position;
use crate::types::{Color, PieceCounts, PieceKind};

/// Board state backed by [`cozy_chess::Board`].
///
/// cozy-chess plays moves in place but has no unmake, so `apply` stashes
/// a snapshot of the pre-move board on an internal stack and `undo`
/// restores it. Snapshots are a few bitboards, so this keeps the in-place
/// apply/undo contract without rebuilding state from scratch.
#[derive(Clone, Debug)]
pub struct CozyPosition {
    board: Board,
    history: Vec<(Board, Move)>,
}

impl CozyPosition {
    pub fn startpos() -> Self {
        Self {
            board: Board::default(),
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        Ok(Self {
            board: Board::from_fen(fen, false)?,
            history: Vec::new(),
        })
    }

    /// The wrapped board, for rules-engine-specific plumbing such as
    /// UCI move parsing.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// FEN of the current state.
    pub fn fen(&self) -> String {
        format!("{}", self.board)
    }

    /// Zobrist hash of the current state.
    pub fn hash(&self) -> u64 {
        self.board.hash()
    }

    pub fn halfmove_clock(&self) -> u8 {
        self.board.halfmove_clock()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    fn has_moves(&self) -> bool {
        // generate_moves returns true when the listener stopped early,
        // i.e. at least one legal move exists.
        self.board.generate_moves(|_| true)
    }

    fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }
}

impl Position for CozyPosition {
    type Move = Move;

    fn side_to_move(&self) -> Color {
        match self.board.side_to_move() {
            cozy_chess::Color::White => Color::White,
            cozy_chess::Color::Black => Color::Black,
        }
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }

    fn apply(&mut self, mv: Move) {
        self.history.push((self.board.clone(), mv));
        self.board.play(mv);
    }

    fn undo(&mut self, mv: Move) {
        let (prev, applied) = self
            .history
            .pop()
            .expect("undo called without a matching apply");
        debug_assert_eq!(applied, mv, "undo out of order");
        self.board = prev;
    }

    fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_moves()
    }

    fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_moves()
    }

    fn is_draw_by_material(&self) -> bool {
        let heavy = self.board.pieces(Piece::Pawn)
            | self.board.pieces(Piece::Rook)
            | self.board.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = self.board.pieces(Piece::Knight);
        let bishops = self.board.pieces(Piece::Bishop);
        match (knights.len() + bishops.len(), knights.is_empty()) {
            // Bare kings, or a single minor piece.
            (0, _) | (1, _) => true,
            // Bishops only, all on squares of one color.
            (_, true) => same_square_color(bishops),
            _ => false,
        }
    }

    fn is_game_over(&self) -> bool {
        !self.has_moves() || self.is_draw_by_material() || self.is_fifty_move_draw()
    }

    fn piece_counts(&self) -> PieceCounts {
        let mut counts = PieceCounts::default();
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let bb = self
                    .board
                    .colored_pieces(color_to_cozy(color), kind_to_cozy(kind));
                counts.set(color, kind, bb.len() as u8);
            }
        }
        counts
    }
}

fn same_square_color(bb: BitBoard) -> bool {
    let mut parity = None;
    for sq in bb {
        let p = square_parity(sq);
        match parity {
            None => parity = Some(p),
            Some(q) if q != p => return false,
            Some(_) => {}
        }
    }
    true
}

fn square_parity(sq: Square) -> u8 {
    ((sq.rank() as u8) + (sq.file() as u8)) % 2
}

fn color_to_cozy(color: Color) -> cozy_chess::Color {
    match color {
        Color::White => cozy_chess::Color::White,
        Color::Black => cozy_chess::Color::Black,
    }
}

fn kind_to_cozy(kind: PieceKind) -> Piece {
    match kind {
        PieceKind::Pawn => Piece::Pawn,
        PieceKind::Knight => Piece::Knight,
        PieceKind::Bishop => Piece::Bishop,
        PieceKind::Rook => Piece::Rook,
        PieceKind::Queen => Piece::Queen,
        PieceKind::King => Piece::King,
    }
}

#[cfg(test)]
#[path = "cozy_tests.rs"]
mod cozy_tests;

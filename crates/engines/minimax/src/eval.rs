//! Material-based position evaluation

use chess_board::{Color, PieceKind, Position};

/// Evaluation score. Positive favors White, negative favors Black.
pub type Score = i32;

/// Score of a checkmated position, from the winner's point of view.
///
/// Mate scores are depth-independent: the search cannot tell a mate in
/// one from a mate in five. Kept that way on purpose; see DESIGN.md.
pub const MATE: Score = 1_000_000;

/// Per-piece-type material weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialWeights {
    pub pawn: Score,
    pub knight: Score,
    pub bishop: Score,
    pub rook: Score,
    pub queen: Score,
    pub king: Score,
}

impl MaterialWeights {
    /// The classic 1/3/3/5/9 scale. Kings are never captured, so they
    /// carry no material weight.
    pub const CLASSIC: MaterialWeights = MaterialWeights {
        pawn: 1,
        knight: 3,
        bishop: 3,
        rook: 5,
        queen: 9,
        king: 0,
    };

    pub fn value(&self, kind: PieceKind) -> Score {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

impl Default for MaterialWeights {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Pure static evaluator: material count is the entire heuristic.
///
/// Weights are fixed at construction, so evaluators with different
/// weights can coexist and a single evaluator can be shared freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator {
    weights: MaterialWeights,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: MaterialWeights) -> Self {
        Self { weights }
    }

    /// Evaluates the position from White's perspective.
    ///
    /// - Checkmate scores `MATE` for the side that delivered it.
    /// - Any other terminal state (stalemate, insufficient material,
    ///   clock draws) scores 0.
    /// - Otherwise White's material total minus Black's.
    pub fn evaluate<P: Position>(&self, pos: &P) -> Score {
        if pos.is_checkmate() {
            // The side to move has just been mated.
            return match pos.side_to_move() {
                Color::White => -MATE,
                Color::Black => MATE,
            };
        }
        if pos.is_game_over() {
            return 0;
        }

        let counts = pos.piece_counts();
        let mut score = 0;
        for kind in PieceKind::ALL {
            let diff = counts.get(Color::White, kind) as Score
                - counts.get(Color::Black, kind) as Score;
            score += self.weights.value(kind) * diff;
        }
        score
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;

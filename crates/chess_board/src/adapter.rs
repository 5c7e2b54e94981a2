//! Position adapter contract consumed by search engines.

use crate::types::{Color, PieceCounts};

/// Full board state plus the rules queries a search engine needs.
///
/// Implementations wrap a rules/legality engine; the search engine never
/// generates moves or classifies terminal states itself. The contract:
///
/// - `legal_moves` returns the same sequence in the same order every time
///   it is called on the same state (stable within one search call).
/// - `apply` and `undo` are exact inverses, including castling rights,
///   en-passant target, and move clocks. Calls must nest like a stack:
///   every `apply` is undone by a matching `undo` before any earlier
///   move is undone.
/// - A position with no legal moves must be reported as game over
///   (checkmate or stalemate); anything else is a contract violation the
///   search engine treats as fatal.
pub trait Position {
    /// Opaque move token. Produced by `legal_moves`, consumed by
    /// `apply`/`undo`, immutable once produced.
    type Move: Copy + Eq + std::fmt::Debug;

    fn side_to_move(&self) -> Color;

    /// All legal moves for the side to move, in a stable order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Plays `mv` in place. `mv` must come from `legal_moves` on the
    /// current state.
    fn apply(&mut self, mv: Self::Move);

    /// Reverts the most recent `apply`. `mv` must be the move that was
    /// applied last.
    fn undo(&mut self, mv: Self::Move);

    /// Side to move has no legal moves and is in check.
    fn is_checkmate(&self) -> bool;

    /// Side to move has no legal moves and is not in check.
    fn is_stalemate(&self) -> bool;

    /// Neither side retains enough material to deliver mate.
    fn is_draw_by_material(&self) -> bool;

    /// Logical OR of every terminal condition this adapter reports.
    /// Implementations may add conditions beyond the three above (e.g.
    /// the fifty-move rule); any non-checkmate terminal is scored as a
    /// draw by the evaluator.
    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_draw_by_material()
    }

    /// Piece census used for material evaluation.
    fn piece_counts(&self) -> PieceCounts;
}

//! Minimax Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material-only
//! evaluation. The engine is generic over the `chess_board::Position`
//! adapter and holds no state between calls beyond node statistics.
//!
//! Deliberate simplifications (see DESIGN.md): no move ordering, no
//! transposition table, no quiescence, no iterative deepening, and
//! depth-independent mate scores.

mod eval;
mod limits;
mod search;

use chess_board::Position;

pub use eval::{Evaluator, MaterialWeights, Score, MATE};
pub use limits::{SearchLimits, TimeControl};
pub use search::{pick_best_move, search, SearchContext, SearchError, SearchResult, Window};

/// Minimax engine bundling an evaluator with its search entry points.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    evaluator: Evaluator,
    /// Node count of the most recent search, for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine evaluating with non-standard material weights.
    pub fn with_weights(weights: MaterialWeights) -> Self {
        Self {
            evaluator: Evaluator::with_weights(weights),
            nodes: 0,
        }
    }

    /// Full search with explicit limits.
    pub fn search<P: Position>(
        &mut self,
        pos: &mut P,
        limits: &SearchLimits,
    ) -> Result<SearchResult<P::Move>, SearchError> {
        let result = pick_best_move(pos, limits, &self.evaluator)?;
        self.nodes = result.nodes;
        Ok(result)
    }

    /// The difficulty-knob entry point: best move at a fixed ply depth,
    /// or `None` when the game is already over.
    pub fn find_best_move<P: Position>(
        &mut self,
        pos: &mut P,
        depth: u8,
    ) -> Result<Option<P::Move>, SearchError> {
        Ok(self.search(pos, &SearchLimits::depth(depth))?.best_move)
    }

    /// Nodes searched by the most recent call.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn new_game(&mut self) {
        self.nodes = 0;
    }
}

/// Convenience wrapper using the classic material weights.
pub fn find_best_move<P: Position>(
    pos: &mut P,
    depth: u8,
) -> Result<Option<P::Move>, SearchError> {
    MinimaxEngine::new().find_best_move(pos, depth)
}

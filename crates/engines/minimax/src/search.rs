//! Minimax search with alpha-beta pruning

use chess_board::{Color, Position};
use thiserror::Error;

use crate::eval::{Evaluator, Score};
use crate::limits::{SearchLimits, TimeControl};

/// Alpha-beta bounds threaded through the recursion. `alpha <= beta`
/// holds on entry to every node; a node stops expanding siblings once
/// `beta <= alpha`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub alpha: Score,
    pub beta: Score,
}

impl Window {
    /// The unbounded window used at the root.
    pub const FULL: Window = Window {
        alpha: Score::MIN,
        beta: Score::MAX,
    };

    #[inline]
    pub fn is_cutoff(&self) -> bool {
        self.beta <= self.alpha
    }
}

/// Result of one search call.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// The best move found (None when the root is already terminal)
    pub best_move: Option<M>,
    /// Backed-up score, from White's perspective
    pub score: Score,
    /// Requested search depth in plies
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether search was stopped early due to time
    pub stopped: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Search depth of zero plies passed to the root entry point.
    #[error("search depth must be at least 1 ply")]
    InvalidDepth,
    /// The position adapter reported a live position with no legal
    /// moves. Fatal: the adapter's terminal classification and its move
    /// generator disagree, so any score would be meaningless.
    #[error("adapter reported a non-terminal position with no legal moves")]
    AdapterViolation,
}

/// Per-call search state: the evaluator, node accounting, and the
/// cooperative stop flag. Nothing survives past one root call.
pub struct SearchContext<'a> {
    evaluator: &'a Evaluator,
    time_control: Option<&'a TimeControl>,
    nodes: u64,
    stopped: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(evaluator: &'a Evaluator) -> Self {
        Self {
            evaluator,
            time_control: None,
            nodes: 0,
            stopped: false,
        }
    }

    pub fn with_time_control(evaluator: &'a Evaluator, tc: &'a TimeControl) -> Self {
        Self {
            evaluator,
            time_control: Some(tc),
            nodes: 0,
            stopped: false,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    fn check_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(tc) = self.time_control {
            if tc.should_check_time(self.nodes) && tc.check_time() {
                self.stopped = true;
            }
        }
        self.stopped
    }
}

/// Recursive minimax over the legal-move tree.
///
/// Leaves (depth 0 or terminal positions) return the static evaluation
/// and no move. Interior nodes try moves in the order the adapter
/// enumerates them; the first move scoring strictly better than the
/// running best replaces it, so ties keep the earliest move. Pruning on
/// `beta <= alpha` only skips branches that cannot change the result;
/// scores and chosen moves match a full-width minimax over the same
/// tree.
///
/// The position is mutated in place through apply/undo pairs and is
/// restored before this returns, on every path including errors.
pub fn search<P: Position>(
    pos: &mut P,
    depth: u8,
    mut window: Window,
    maximizing: bool,
    ctx: &mut SearchContext<'_>,
) -> Result<(Score, Option<P::Move>), SearchError> {
    if depth == 0 || pos.is_game_over() {
        return Ok((ctx.evaluator.evaluate(pos), None));
    }

    let moves = pos.legal_moves();
    if moves.is_empty() {
        return Err(SearchError::AdapterViolation);
    }

    let mut best_score = if maximizing { Score::MIN } else { Score::MAX };
    // Preset so a time-stopped node still returns a legal move.
    let mut best_move = Some(moves[0]);

    for mv in moves {
        if ctx.check_stop() {
            break;
        }

        pos.apply(mv);
        ctx.nodes += 1;
        let child = search(pos, depth - 1, window, !maximizing, ctx);
        pos.undo(mv);
        let (score, _) = child?;

        // A stopped child searched only part of its subtree; its score
        // is a bound, not a value, so it must not pick the move here.
        if ctx.stopped {
            break;
        }

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if best_score > window.alpha {
                window.alpha = best_score;
            }
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if best_score < window.beta {
                window.beta = best_score;
            }
        }

        if window.is_cutoff() {
            break; // alpha-beta cutoff
        }
    }

    Ok((best_score, best_move))
}

/// Searches the position and returns the best move with its score.
///
/// Root wrapper around [`search`]: full window, White maximizes. A root
/// that is already game over yields no move and its static score, which
/// lets the caller declare the game finished.
pub fn pick_best_move<P: Position>(
    pos: &mut P,
    limits: &SearchLimits,
    evaluator: &Evaluator,
) -> Result<SearchResult<P::Move>, SearchError> {
    if limits.depth == 0 {
        return Err(SearchError::InvalidDepth);
    }

    if pos.is_game_over() {
        return Ok(SearchResult {
            best_move: None,
            score: evaluator.evaluate(pos),
            depth: limits.depth,
            nodes: 0,
            stopped: false,
        });
    }

    limits.start();
    let mut ctx = SearchContext::with_time_control(evaluator, &limits.time_control);
    let maximizing = pos.side_to_move() == Color::White;
    let (score, best_move) = search(pos, limits.depth, Window::FULL, maximizing, &mut ctx)?;

    Ok(SearchResult {
        best_move,
        score,
        depth: limits.depth,
        nodes: ctx.nodes(),
        stopped: ctx.stopped(),
    })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;

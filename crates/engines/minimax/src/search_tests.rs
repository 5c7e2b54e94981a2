use super::*;
use std::time::Duration;

use chess_board::{Color, CozyPosition, PieceCounts, Position};

use crate::eval::MATE;
use crate::limits::SearchLimits;
use crate::MinimaxEngine;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Full-width minimax over the same tree and move order, no pruning.
/// Reference implementation for the value-equivalence tests.
fn minimax_plain<P: Position>(
    pos: &mut P,
    depth: u8,
    maximizing: bool,
    eval: &Evaluator,
) -> (Score, Option<P::Move>) {
    if depth == 0 || pos.is_game_over() {
        return (eval.evaluate(pos), None);
    }
    let moves = pos.legal_moves();
    assert!(!moves.is_empty());

    let mut best_score = if maximizing { Score::MIN } else { Score::MAX };
    let mut best_move = None;
    for mv in moves {
        pos.apply(mv);
        let (score, _) = minimax_plain(pos, depth - 1, !maximizing, eval);
        pos.undo(mv);
        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better {
            best_score = score;
            best_move = Some(mv);
        }
    }
    (best_score, best_move)
}

#[test]
fn test_pick_best_move_start_position() {
    let mut pos = CozyPosition::startpos();
    let result = pick_best_move(&mut pos, &SearchLimits::depth(3), &Evaluator::new()).unwrap();
    assert!(result.best_move.is_some());
    assert!(result.nodes > 0);
    assert!(!result.stopped);
}

#[test]
fn test_finds_mate_in_one() {
    // Qe8 is mate on the back rank.
    let mut pos = CozyPosition::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let result = pick_best_move(&mut pos, &SearchLimits::depth(2), &Evaluator::new()).unwrap();
    let mv = result.best_move.expect("a mating move exists");
    assert_eq!(result.score, MATE);
    pos.apply(mv);
    assert!(pos.is_checkmate());
}

#[test]
fn test_black_finds_mate_in_one() {
    // Mirrored back-rank mate, Qe1 for Black.
    let mut pos = CozyPosition::from_fen("4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let result = pick_best_move(&mut pos, &SearchLimits::depth(2), &Evaluator::new()).unwrap();
    let mv = result.best_move.expect("a mating move exists");
    assert_eq!(result.score, -MATE);
    pos.apply(mv);
    assert!(pos.is_checkmate());
}

#[test]
fn test_avoids_immediate_mate() {
    // White threatens Re8#; at depth 2 Black must not allow it.
    let mut pos = CozyPosition::from_fen("r5k1/5ppp/8/8/8/8/5PPP/4R1K1 b - - 0 1").unwrap();
    let result = pick_best_move(&mut pos, &SearchLimits::depth(2), &Evaluator::new()).unwrap();
    let mv = result.best_move.expect("Black has moves");
    assert!(result.score > -MATE);

    pos.apply(mv);
    let mut mate_available = false;
    for reply in pos.legal_moves() {
        pos.apply(reply);
        if pos.is_checkmate() {
            mate_available = true;
        }
        pos.undo(reply);
    }
    assert!(!mate_available, "chosen move allows mate in one");
}

#[test]
fn test_depth_zero_is_static_eval() {
    let eval = Evaluator::new();
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "1nbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQk - 0 1",
        KIWIPETE,
    ] {
        let mut pos = CozyPosition::from_fen(fen).unwrap();
        for maximizing in [true, false] {
            let mut ctx = SearchContext::new(&eval);
            let (score, mv) = search(&mut pos, 0, Window::FULL, maximizing, &mut ctx).unwrap();
            assert_eq!(score, eval.evaluate(&pos));
            assert_eq!(mv, None);
        }
    }
}

#[test]
fn test_zero_depth_root_rejected() {
    let mut pos = CozyPosition::startpos();
    let err = pick_best_move(&mut pos, &SearchLimits::depth(0), &Evaluator::new());
    assert_eq!(err.unwrap_err(), SearchError::InvalidDepth);

    let mut engine = MinimaxEngine::new();
    assert!(engine.find_best_move(&mut pos, 0).is_err());
}

/// Adapter that breaks the contract: claims the game is live while
/// producing no legal moves.
struct BrokenAdapter;

impl Position for BrokenAdapter {
    type Move = u8;

    fn side_to_move(&self) -> Color {
        Color::White
    }
    fn legal_moves(&self) -> Vec<u8> {
        Vec::new()
    }
    fn apply(&mut self, _mv: u8) {}
    fn undo(&mut self, _mv: u8) {}
    fn is_checkmate(&self) -> bool {
        false
    }
    fn is_stalemate(&self) -> bool {
        false
    }
    fn is_draw_by_material(&self) -> bool {
        false
    }
    fn piece_counts(&self) -> PieceCounts {
        PieceCounts::default()
    }
}

#[test]
fn test_moveless_live_position_is_fatal() {
    // Non-terminal with zero legal moves must surface as an error, not
    // as a quiet "no move".
    let mut pos = BrokenAdapter;
    let result = pick_best_move(&mut pos, &SearchLimits::depth(2), &Evaluator::new());
    assert_eq!(result.unwrap_err(), SearchError::AdapterViolation);

    let evaluator = Evaluator::new();
    let mut ctx = SearchContext::new(&evaluator);
    let result = search(&mut BrokenAdapter, 1, Window::FULL, true, &mut ctx);
    assert_eq!(result.unwrap_err(), SearchError::AdapterViolation);
}

#[test]
fn test_terminal_root_returns_no_move() {
    // Checkmated root: no move, mate score for the winner.
    let mut pos = CozyPosition::from_fen(
        "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1",
    )
    .unwrap();
    let result = pick_best_move(&mut pos, &SearchLimits::depth(3), &Evaluator::new()).unwrap();
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, MATE);
    assert_eq!(result.nodes, 0);

    // Stalemated root: no move, drawn score.
    let mut pos = CozyPosition::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();
    let result = pick_best_move(&mut pos, &SearchLimits::depth(3), &Evaluator::new()).unwrap();
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

#[test]
fn test_search_is_deterministic() {
    let run = || {
        let mut pos = CozyPosition::from_fen(KIWIPETE).unwrap();
        let result =
            pick_best_move(&mut pos, &SearchLimits::depth(3), &Evaluator::new()).unwrap();
        (result.best_move, result.score)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_position_restored_after_search() {
    let mut pos = CozyPosition::from_fen(KIWIPETE).unwrap();
    let fen = pos.fen();
    let hash = pos.hash();
    pick_best_move(&mut pos, &SearchLimits::depth(3), &Evaluator::new()).unwrap();
    assert_eq!(pos.fen(), fen);
    assert_eq!(pos.hash(), hash);
}

#[test]
fn test_tie_break_keeps_first_move() {
    // At depth 1 from the start every move evaluates to 0, so the move
    // enumerated first must win the tie.
    let mut pos = CozyPosition::startpos();
    let first = pos.legal_moves()[0];
    let result = pick_best_move(&mut pos, &SearchLimits::depth(1), &Evaluator::new()).unwrap();
    assert_eq!(result.best_move, Some(first));
    assert_eq!(result.score, 0);
}

#[test]
fn test_alpha_beta_matches_full_minimax() {
    let eval = Evaluator::new();
    let cases = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
        ("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 0 1", 3),
        ("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2", 2),
        ("8/2k5/8/8/3QK3/8/8/8 w - - 0 1", 3),
    ];
    for (fen, depth) in cases {
        let mut pos = CozyPosition::from_fen(fen).unwrap();
        let maximizing = pos.side_to_move() == chess_board::Color::White;

        let mut ctx = SearchContext::new(&eval);
        let (score, best) = search(&mut pos, depth, Window::FULL, maximizing, &mut ctx).unwrap();
        let (plain_score, plain_best) = minimax_plain(&mut pos, depth, maximizing, &eval);

        assert_eq!(score, plain_score, "score diverged on {fen}");
        assert_eq!(best, plain_best, "move diverged on {fen}");
    }
}

#[test]
fn test_time_limit_stops_search() {
    // Depth 12 without move ordering cannot finish in 10ms; the stop
    // flag must trip and a legal move must still come back.
    let mut pos = CozyPosition::startpos();
    let limits = SearchLimits::depth_and_time(12, Duration::from_millis(10));
    let result = pick_best_move(&mut pos, &limits, &Evaluator::new()).unwrap();
    assert!(result.stopped);
    assert!(result.best_move.is_some());
    assert!(result.nodes > 0);
}

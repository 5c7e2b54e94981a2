use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use chess_board::{CozyPosition, Position};
use cozy_chess::util::{display_uci_move, parse_uci_move};
use log::{debug, warn};
use minimax_engine::{MinimaxEngine, SearchLimits};

fn main() -> Result<()> {
    env_logger::init();

    // UCI engines communicate via stdin/stdout.
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut engine = MinimaxEngine::new();
    let mut pos = CozyPosition::startpos();
    let mut depth: u8 = 3; // simple default

    for line in stdin.lock().lines() {
        let line = line?;
        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                writeln!(stdout, "id name MiniChess 0.1")?;
                writeln!(stdout, "id author minichess")?;
                writeln!(stdout, "option name Depth type spin default 3 min 1 max 8")?;
                writeln!(stdout, "uciok")?;
                stdout.flush()?;
            }
            "isready" => {
                writeln!(stdout, "readyok")?;
                stdout.flush()?;
            }
            "setoption" => {
                // Example: setoption name Depth value 4
                if let Some(value) = option_value(&parts, "Depth") {
                    if let Ok(d) = value.parse::<u8>() {
                        depth = d.clamp(1, 8);
                        debug!("depth set to {depth}");
                    }
                }
            }
            "ucinewgame" => {
                pos = CozyPosition::startpos();
                engine.new_game();
            }
            "position" => {
                set_position(&mut pos, &parts[1..]);
            }
            "go" => {
                let limits = parse_go(&parts[1..], depth);
                match engine.search(&mut pos, &limits) {
                    Ok(result) => {
                        // The evaluator scores in pawns; UCI cp wants
                        // centipawns.
                        writeln!(
                            stdout,
                            "info depth {} score cp {} nodes {}",
                            result.depth,
                            result.score.saturating_mul(100),
                            result.nodes
                        )?;
                        match result.best_move {
                            Some(mv) => {
                                writeln!(stdout, "bestmove {}", display_uci_move(pos.board(), mv))?
                            }
                            None => writeln!(stdout, "bestmove 0000")?, // game over
                        }
                    }
                    Err(err) => warn!("search failed: {err}"),
                }
                stdout.flush()?;
            }
            "quit" => break,
            _ => {
                debug!("ignoring unknown command: {line}");
            }
        }
    }

    Ok(())
}

/// Applies `position [startpos | fen <fen>] [moves <m1> <m2> ...]`.
fn set_position(pos: &mut CozyPosition, parts: &[&str]) {
    let mut rest = parts;
    match parts.first() {
        Some(&"startpos") => {
            *pos = CozyPosition::startpos();
            rest = &parts[1..];
        }
        Some(&"fen") => {
            let end = parts
                .iter()
                .position(|&p| p == "moves")
                .unwrap_or(parts.len());
            let fen = parts[1..end].join(" ");
            match CozyPosition::from_fen(&fen) {
                Ok(parsed) => *pos = parsed,
                Err(err) => {
                    warn!("bad FEN {fen:?}: {err}");
                    return;
                }
            }
            rest = &parts[end..];
        }
        _ => {
            warn!("malformed position command");
            return;
        }
    }

    if rest.first() == Some(&"moves") {
        for token in &rest[1..] {
            let mv = match parse_uci_move(pos.board(), token) {
                Ok(mv) => mv,
                Err(err) => {
                    warn!("bad move {token:?}: {err}");
                    return;
                }
            };
            if !pos.legal_moves().contains(&mv) {
                warn!("illegal move {token:?}");
                return;
            }
            pos.apply(mv);
        }
    }
}

/// Parses `go [depth <n>] [movetime <ms>]`; anything else falls back to
/// the configured default depth.
fn parse_go(parts: &[&str], default_depth: u8) -> SearchLimits {
    let mut depth = default_depth;
    let mut move_time = None;

    let mut iter = parts.iter();
    while let Some(&word) = iter.next() {
        match word {
            "depth" => {
                if let Some(d) = iter.next().and_then(|v| v.parse::<u8>().ok()) {
                    depth = d.max(1);
                }
            }
            "movetime" => {
                if let Some(ms) = iter.next().and_then(|v| v.parse::<u64>().ok()) {
                    move_time = Some(Duration::from_millis(ms));
                }
            }
            _ => {}
        }
    }

    match move_time {
        Some(t) => SearchLimits::depth_and_time(depth, t),
        None => SearchLimits::depth(depth),
    }
}

/// Extracts `value` for `setoption name <name> value <value>`.
fn option_value<'a>(parts: &[&'a str], name: &str) -> Option<&'a str> {
    let idx_name = parts.iter().position(|&x| x == "name")?;
    if parts.get(idx_name + 1) != Some(&name) {
        return None;
    }
    let idx_val = parts.iter().position(|&x| x == "value")?;
    parts.get(idx_val + 1).copied()
}
